//! Ledgerbot
//!
//! Main entry point for the ledger chat bot.

use std::sync::Arc;
use std::time::Duration;

use serenity::Client;
use serenity::all::GatewayIntents;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerbot_core::cooldown::Cooldown;
use ledgerbot_core::sheet::LedgerService;
use ledgerbot_core::snapshot::CropBox;
use ledgerbot_discord::{Gateway, Handler, ShardManagerContainer};
use ledgerbot_google::{GoogleClient, GoogleExporter, GoogleSheets, PdfRasterizer};
use ledgerbot_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerbot=debug,serenity=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Google adapters
    let google = GoogleClient::from_config(&config.google)?;
    info!(
        client_email = google.client_email(),
        spreadsheet_id = google.spreadsheet_id(),
        "Google client configured"
    );
    let sheets = GoogleSheets::new(Arc::clone(&google));
    let rasterizer = PdfRasterizer::new(config.snapshot.pdftoppm_path.clone(), config.snapshot.dpi);
    let exporter = GoogleExporter::new(google, rasterizer);

    // Command gateway
    let service = LedgerService::new(
        Arc::new(sheets),
        Arc::new(exporter),
        config.sheet.clone(),
        CropBox::from(config.snapshot.crop),
    );
    let gateway = Gateway::new(
        service,
        Cooldown::new(Duration::from_secs(config.discord.ping_cooldown_secs)),
        config.discord.command_prefix.clone(),
        config.snapshot.filename.clone(),
    );

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord.token, intents)
        .event_handler(Handler::new(Arc::new(gateway)))
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
    }

    info!(prefix = %config.discord.command_prefix, "Starting bot");
    client.start().await?;

    Ok(())
}
