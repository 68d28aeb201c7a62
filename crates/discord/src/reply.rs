//! Outgoing chat replies.

use std::future::Future;
use std::sync::Arc;

use ledgerbot_shared::{AppError, AppResult};
use serenity::all::{ChannelId, CreateAttachment, CreateMessage, Http};

/// A single reply to the invoking channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message.
    Text(String),
    /// One attached image.
    Image {
        /// Attachment filename.
        filename: String,
        /// PNG bytes.
        png: Vec<u8>,
    },
}

impl Reply {
    /// Creates a text reply.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Destination for replies of one invocation.
pub trait ReplySink: Send + Sync {
    /// Delivers one reply.
    fn send(&self, reply: Reply) -> impl Future<Output = AppResult<()>> + Send;
}

/// Sends replies to a Discord channel.
#[derive(Clone)]
pub struct ChannelSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelSink {
    /// Creates a sink for one channel.
    #[must_use]
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

impl ReplySink for ChannelSink {
    async fn send(&self, reply: Reply) -> AppResult<()> {
        let message = match reply {
            Reply::Text(text) => CreateMessage::new().content(text),
            Reply::Image { filename, png } => {
                CreateMessage::new().add_file(CreateAttachment::bytes(png, filename))
            }
        };

        self.channel_id
            .send_message(&self.http, message)
            .await
            .map_err(|e| AppError::ChatTransport(e.to_string()))?;
        Ok(())
    }
}
