//! Ledger commands.
//!
//! Every command is built from the service's independent fetches. A
//! failed fetch is reported to the channel instead of propagating; only
//! a failure to deliver a reply is returned to the caller.

use ledgerbot_core::sheet::{LedgerService, SheetError, SpreadsheetBackend};
use ledgerbot_core::snapshot::SnapshotExporter;
use ledgerbot_shared::AppResult;
use tracing::{info, warn};

use super::Command;
use crate::reply::{Reply, ReplySink};

/// Reply when the ledger resolves to no transactions.
pub const NOTHING_OWED: &str = "No outstanding transactions.";

/// Formats a fetch failure for the channel.
#[must_use]
pub fn error_reply(err: &SheetError) -> Reply {
    Reply::Text(format!("An error occurred: {err}"))
}

/// Runs one ledger command against the tab titled `title`.
///
/// `Command::Ping` is not a ledger command and produces no replies.
///
/// # Errors
///
/// Returns an error only if a reply cannot be delivered.
pub async fn run<B, E, S>(
    service: &LedgerService<B, E>,
    command: Command,
    title: &str,
    snapshot_filename: &str,
    sink: &S,
) -> AppResult<()>
where
    B: SpreadsheetBackend,
    E: SnapshotExporter,
    S: ReplySink,
{
    info!(command = command.name(), tab = title, "Running ledger command");

    let replies = match command {
        Command::LedgerText => service
            .fetch_summary(title)
            .await
            .map(|text| vec![Reply::Text(text)]),
        Command::LedgerImage => service
            .fetch_snapshot(title)
            .await
            .map(|png| vec![image_reply(snapshot_filename, png)]),
        Command::Ledger => combined(service, title, snapshot_filename).await,
        Command::LedgerOwes => service.fetch_settlement(title).await.map(|settlement| {
            if settlement.is_empty() {
                vec![Reply::text(NOTHING_OWED)]
            } else {
                vec![Reply::Text(settlement.message)]
            }
        }),
        Command::Ping => Ok(Vec::new()),
    };

    match replies {
        Ok(replies) => {
            for reply in replies {
                sink.send(reply).await?;
            }
        }
        Err(err) => {
            warn!(command = command.name(), tab = title, error = %err, "Ledger command failed");
            sink.send(error_reply(&err)).await?;
        }
    }
    Ok(())
}

/// Fetches the summary and the snapshot; replies are image first, then text.
async fn combined<B, E>(
    service: &LedgerService<B, E>,
    title: &str,
    snapshot_filename: &str,
) -> Result<Vec<Reply>, SheetError>
where
    B: SpreadsheetBackend,
    E: SnapshotExporter,
{
    let summary = service.fetch_summary(title).await?;
    let png = service.fetch_snapshot(title).await?;
    Ok(vec![image_reply(snapshot_filename, png), Reply::Text(summary)])
}

fn image_reply(filename: &str, png: Vec<u8>) -> Reply {
    Reply::Image {
        filename: filename.to_string(),
        png,
    }
}
