//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Chat transport configuration.
    pub discord: DiscordConfig,
    /// Google API configuration.
    pub google: GoogleConfig,
    /// Spreadsheet layout configuration.
    #[serde(default)]
    pub sheet: SheetConfig,
    /// Snapshot rendering configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Chat transport configuration.
#[derive(Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token.
    pub token: String,
    /// Prefix that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Per-channel cooldown for the `ping` command, in seconds.
    #[serde(default = "default_ping_cooldown")]
    pub ping_cooldown_secs: u64,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[hidden]")
            .field("command_prefix", &self.command_prefix)
            .field("ping_cooldown_secs", &self.ping_cooldown_secs)
            .finish()
    }
}

fn default_command_prefix() -> String {
    "$".to_string()
}

fn default_ping_cooldown() -> u64 {
    10
}

/// Google API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Path to the service-account JSON key.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
    /// Spreadsheet holding the ledger tabs.
    pub spreadsheet_id: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_credentials_path() -> String {
    "keys/service-account.json".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Cell ranges read from each ledger tab.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Transaction table, headers in the first row.
    pub ledger_range: String,
    /// Pre-computed settlement summary cell.
    pub summary_range: String,
    /// Tab holding the handle → alias lookup table.
    pub lookup_tab: String,
    /// Range of the lookup table.
    pub lookup_range: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            ledger_range: "N1:T27".to_string(),
            summary_range: "T31".to_string(),
            lookup_tab: "Venmo".to_string(),
            lookup_range: "A1:C200".to_string(),
        }
    }
}

/// Snapshot rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Rasterization resolution.
    pub dpi: u32,
    /// Attachment filename.
    pub filename: String,
    /// Pixel box cut from the first page.
    pub crop: CropConfig,
    /// Path to the `pdftoppm` executable.
    pub pdftoppm_path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            filename: "ledger.png".to_string(),
            crop: CropConfig::default(),
            pdftoppm_path: "pdftoppm".to_string(),
        }
    }
}

/// Pixel rectangle, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CropConfig {
    /// Left edge.
    pub left: u32,
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            left: 2125,
            top: 373,
            right: 3900,
            bottom: 1700,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// `DISCORD_TOKEN` is honoured as an override for `discord.token`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERBOT").separator("__"))
            .set_override_option("discord.token", std::env::var("DISCORD_TOKEN").ok())?
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values that deserialize fine but cannot work at runtime.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` naming the first offending key.
    pub fn validate(&self) -> AppResult<()> {
        if self.discord.token.trim().is_empty() {
            return Err(AppError::Configuration("discord.token is empty".into()));
        }
        if self.discord.command_prefix.is_empty() {
            return Err(AppError::Configuration(
                "discord.command_prefix is empty".into(),
            ));
        }
        if self.google.spreadsheet_id.trim().is_empty() {
            return Err(AppError::Configuration(
                "google.spreadsheet_id is empty".into(),
            ));
        }
        let crop = self.snapshot.crop;
        if crop.right <= crop.left || crop.bottom <= crop.top {
            return Err(AppError::Configuration(format!(
                "snapshot.crop is empty: ({}, {}, {}, {})",
                crop.left, crop.top, crop.right, crop.bottom
            )));
        }
        if self.snapshot.dpi == 0 {
            return Err(AppError::Configuration("snapshot.dpi must be positive".into()));
        }
        Ok(())
    }
}
