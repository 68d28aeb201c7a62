//! Discord event handler.

use std::sync::Arc;
use std::time::Duration;

use ledgerbot_google::{GoogleExporter, GoogleSheets};
use serenity::all::{Context, EventHandler, Message, Ready, ShardManager};
use serenity::async_trait;
use serenity::prelude::TypeMapKey;
use tracing::{error, info};

use crate::gateway::Gateway;
use crate::reply::ChannelSink;

/// Gateway over the Google adapters.
pub type LedgerGateway = Gateway<GoogleSheets, GoogleExporter>;

/// Type-map slot for the shard manager, used to read heartbeat latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Forwards user messages to the gateway.
pub struct Handler {
    gateway: Arc<LedgerGateway>,
}

impl Handler {
    /// Creates a handler.
    #[must_use]
    pub fn new(gateway: Arc<LedgerGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let latency = shard_latency(&ctx).await;
        let sink = ChannelSink::new(ctx.http.clone(), msg.channel_id);
        let channel_id = msg.channel_id.get();

        if let Err(e) = self
            .gateway
            .handle(channel_id, &msg.content, latency, &sink)
            .await
        {
            error!(
                channel_id,
                code = e.error_code(),
                error = %e,
                "Failed to deliver reply"
            );
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, prefix = self.gateway.prefix(), "Logged in");
    }
}

/// Last heartbeat round trip of the shard that delivered the event.
async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>().cloned()
    }?;
    let runners = manager.runners.lock().await;
    runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
}
