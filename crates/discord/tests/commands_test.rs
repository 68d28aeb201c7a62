//! Integration tests for chat command handling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use ledgerbot_core::cooldown::{Cooldown, ManualClock};
use ledgerbot_core::sheet::{Grid, LedgerService, SheetError, SpreadsheetBackend, TabInfo};
use ledgerbot_core::snapshot::{CropBox, SnapshotExporter};
use ledgerbot_discord::{Command, Gateway, Reply, ReplySink};
use ledgerbot_shared::{AppError, AppResult, SheetConfig};

/// In-memory spreadsheet.
#[derive(Default)]
struct FakeSheets {
    tabs: Vec<TabInfo>,
    ranges: HashMap<(String, String), Grid>,
}

impl FakeSheets {
    fn with_range(mut self, tab: &str, range: &str, rows: &[&[&str]]) -> Self {
        let grid = rows
            .iter()
            .map(|r| r.iter().map(|c| (*c).to_string()).collect())
            .collect();
        self.ranges.insert((tab.to_string(), range.to_string()), grid);
        self
    }
}

impl SpreadsheetBackend for FakeSheets {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>, SheetError> {
        Ok(self.tabs.clone())
    }

    async fn read_range(&self, tab_title: &str, range: &str) -> Result<Grid, SheetError> {
        Ok(self
            .ranges
            .get(&(tab_title.to_string(), range.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Exporter returning a fixed page, or a fixed failure.
struct FakeExporter {
    fail_with_status: Option<u16>,
}

impl SnapshotExporter for FakeExporter {
    async fn render_first_page(&self, _tab_id: i64) -> Result<DynamicImage, SheetError> {
        if let Some(status) = self.fail_with_status {
            return Err(SheetError::export(status, "export refused"));
        }
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            200,
            100,
            Rgb([10, 20, 30]),
        )))
    }
}

/// Sink that records replies.
#[derive(Default)]
struct RecordingSink {
    replies: Mutex<Vec<Reply>>,
    fail: bool,
}

impl RecordingSink {
    fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }
}

impl ReplySink for RecordingSink {
    async fn send(&self, reply: Reply) -> AppResult<()> {
        if self.fail {
            return Err(AppError::ChatTransport("channel gone".into()));
        }
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}

fn sheets() -> FakeSheets {
    FakeSheets {
        tabs: vec![TabInfo::new("Venmo", 0), TabInfo::new("March 3", 1482)],
        ..FakeSheets::default()
    }
    .with_range("March 3", "T31", &[&["Alice owes Bob $10"]])
    .with_range(
        "March 3",
        "N1:T27",
        &[
            &["Sender", "Sender Venmo", "Amount", "Receiver", "Receiver Venmo"],
            &["Alice", "@alice", "10", "Bob", "@bobvenmo"],
            &["", "", "", "", ""],
            &["Zed", "", "99", "Yan", ""],
        ],
    )
    .with_range(
        "Venmo",
        "A1:C200",
        &[&["Venmo", "Name", "Discord"], &[" alice ", "Alice", "alicetag"]],
    )
}

fn gateway_with(
    sheets: FakeSheets,
    exporter: FakeExporter,
) -> (Gateway<FakeSheets, FakeExporter, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let service = LedgerService::new(
        Arc::new(sheets),
        Arc::new(exporter),
        SheetConfig::default(),
        CropBox::new(20, 10, 120, 60),
    );
    let gateway = Gateway::new(
        service,
        Cooldown::with_clock(Duration::from_secs(10), clock.clone()),
        "$",
        "ledger.png",
    );
    (gateway, clock)
}

fn gateway() -> (Gateway<FakeSheets, FakeExporter, ManualClock>, ManualClock) {
    gateway_with(
        sheets(),
        FakeExporter {
            fail_with_status: None,
        },
    )
}

fn assert_image(reply: &Reply, width: u32, height: u32) {
    let Reply::Image { filename, png } = reply else {
        panic!("expected image reply, got {reply:?}");
    };
    assert_eq!(filename, "ledger.png");
    let img = image::load_from_memory(png).expect("attachment should be a PNG");
    assert_eq!(img.dimensions(), (width, height));
}

#[tokio::test]
async fn test_ledger_text_replies_with_summary() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    let ran = gateway
        .handle(1, "$ledger_text march 3", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(ran, Some(Command::LedgerText));
    assert_eq!(sink.replies(), vec![Reply::text("Alice owes Bob $10")]);
}

#[tokio::test]
async fn test_unknown_tab_is_reported() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger_text April 1", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(
        sink.replies(),
        vec![Reply::text("An error occurred: Sheet titled 'April 1' not found.")]
    );
}

#[tokio::test]
async fn test_ledger_img_replies_with_cropped_png() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger_img March 3", None, &sink)
        .await
        .expect("reply should be delivered");

    let replies = sink.replies();
    assert_eq!(replies.len(), 1);
    assert_image(&replies[0], 100, 50);
}

#[tokio::test]
async fn test_ledger_sends_image_then_text() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger March 3", None, &sink)
        .await
        .expect("reply should be delivered");

    let replies = sink.replies();
    assert_eq!(replies.len(), 2);
    assert_image(&replies[0], 100, 50);
    assert_eq!(replies[1], Reply::text("Alice owes Bob $10"));
}

#[tokio::test]
async fn test_ledger_export_failure_sends_only_error() {
    let (gateway, _) = gateway_with(
        sheets(),
        FakeExporter {
            fail_with_status: Some(403),
        },
    );
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger March 3", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(
        sink.replies(),
        vec![Reply::text(
            "An error occurred: Failed to export PDF: 403 export refused"
        )]
    );
}

#[tokio::test]
async fn test_ledger_owes_resolves_settlement() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger_owes March 3", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(
        sink.replies(),
        vec![Reply::text(
            "@alicetag owes Bob $10 (Payment Info: @bobvenmo)."
        )]
    );
}

#[tokio::test]
async fn test_ledger_owes_with_nothing_owed() {
    let sheets = FakeSheets {
        tabs: vec![TabInfo::new("Empty", 5)],
        ..FakeSheets::default()
    }
    .with_range("Empty", "N1:T27", &[&["Sender", "Receiver"], &["", ""]])
    .with_range("Venmo", "A1:C200", &[&["Venmo", "Name", "Discord"]]);
    let (gateway, _) = gateway_with(
        sheets,
        FakeExporter {
            fail_with_status: None,
        },
    );
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger_owes empty", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(
        sink.replies(),
        vec![Reply::text("No outstanding transactions.")]
    );
}

#[tokio::test]
async fn test_ledger_text_without_summary() {
    let sheets = FakeSheets {
        tabs: vec![TabInfo::new("Blank", 9)],
        ..FakeSheets::default()
    };
    let (gateway, _) = gateway_with(
        sheets,
        FakeExporter {
            fail_with_status: None,
        },
    );
    let sink = RecordingSink::default();

    gateway
        .handle(1, "$ledger_text Blank", None, &sink)
        .await
        .expect("reply should be delivered");

    assert_eq!(
        sink.replies(),
        vec![Reply::text("An error occurred: No data found in the sheet.")]
    );
}

#[tokio::test]
async fn test_ping_cooldown_per_channel() {
    let (gateway, clock) = gateway();
    let sink = RecordingSink::default();
    let latency = Some(Duration::from_millis(50));

    gateway.handle(1, "$ping", latency, &sink).await.unwrap();
    clock.advance(Duration::from_millis(2_500));
    gateway.handle(1, "$ping", latency, &sink).await.unwrap();
    gateway.handle(2, "$ping", latency, &sink).await.unwrap();
    clock.advance(Duration::from_millis(7_500));
    gateway.handle(1, "$ping", latency, &sink).await.unwrap();

    assert_eq!(
        sink.replies(),
        vec![
            Reply::text("Ping! **50.0**ms"),
            Reply::text("**Try after 7.5 second "),
            Reply::text("Ping! **50.0**ms"),
            Reply::text("Ping! **50.0**ms"),
        ]
    );
}

#[tokio::test]
async fn test_non_commands_are_ignored() {
    let (gateway, _) = gateway();
    let sink = RecordingSink::default();

    for content in ["hello", "$unknown March 3", "ledger March 3"] {
        let ran = gateway.handle(1, content, None, &sink).await.unwrap();
        assert_eq!(ran, None);
    }
    assert!(sink.replies().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_propagates() {
    let (gateway, _) = gateway();
    let sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };

    let err = gateway
        .handle(1, "$ledger_text March 3", None, &sink)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ChatTransport(_)));
}
