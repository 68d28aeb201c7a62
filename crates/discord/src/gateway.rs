//! Command dispatch for incoming chat messages.

use std::time::Duration;

use ledgerbot_core::cooldown::{Clock, Cooldown, SystemClock};
use ledgerbot_core::sheet::{LedgerService, SpreadsheetBackend};
use ledgerbot_core::snapshot::SnapshotExporter;
use ledgerbot_shared::AppResult;
use tracing::debug;

use crate::commands::{Command, Invocation, ledger, ping};
use crate::reply::ReplySink;

/// Routes command messages to the ledger and ping commands.
pub struct Gateway<B, E, C = SystemClock>
where
    B: SpreadsheetBackend,
    E: SnapshotExporter,
    C: Clock,
{
    service: LedgerService<B, E>,
    ping_cooldown: Cooldown<C>,
    prefix: String,
    snapshot_filename: String,
}

impl<B, E, C> Gateway<B, E, C>
where
    B: SpreadsheetBackend,
    E: SnapshotExporter,
    C: Clock,
{
    /// Creates a gateway.
    #[must_use]
    pub fn new(
        service: LedgerService<B, E>,
        ping_cooldown: Cooldown<C>,
        prefix: impl Into<String>,
        snapshot_filename: impl Into<String>,
    ) -> Self {
        Self {
            service,
            ping_cooldown,
            prefix: prefix.into(),
            snapshot_filename: snapshot_filename.into(),
        }
    }

    /// Command prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handles one message, returning the command that ran, if any.
    ///
    /// # Errors
    ///
    /// Returns an error only if a reply cannot be delivered.
    pub async fn handle<S: ReplySink>(
        &self,
        channel_id: u64,
        content: &str,
        latency: Option<Duration>,
        sink: &S,
    ) -> AppResult<Option<Command>> {
        let Some(invocation) = Invocation::parse(content, &self.prefix) else {
            return Ok(None);
        };
        debug!(channel_id, command = invocation.command.name(), "Dispatching command");

        match invocation.command {
            Command::Ping => {
                sink.send(ping::run(&self.ping_cooldown, channel_id, latency))
                    .await?;
            }
            command => {
                ledger::run(
                    &self.service,
                    command,
                    &invocation.joined_args(),
                    &self.snapshot_filename,
                    sink,
                )
                .await?;
            }
        }
        Ok(Some(invocation.command))
    }
}
