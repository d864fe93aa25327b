use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, Result};

pub const DB_PATH: &str = "../data/db/blackwater.db";

/// Mongoose, Alliance, EU Mirage Raceway.
pub const DEFAULT_ITEM_ID: i64 = 15993;
pub const DEFAULT_FACTION_ID: i64 = 0;
pub const DEFAULT_REALM_ID: i64 = 5284;

/// Trailing window the history covers.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Bucket width in seconds. Buckets are aligned to multiples of this on the epoch.
pub const DEFAULT_BUCKET_SECS: i64 = 3_600;

/// Spacing of the price axis ticks, in copper (1 gold).
pub const PRICE_TICK_STEP: u64 = 10_000;

/// Static chart dimensions in pixels.
pub const IMAGE_WIDTH: u32 = 1920;
pub const IMAGE_HEIGHT: u32 = 1080;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_level: String,
    pub item_id: i64,
    /// 0 = Alliance, 1 = Horde, 2 = Neutral (FACTION_ID)
    pub faction_id: i64,
    /// Connected realm id (REALM_ID)
    pub realm_id: i64,
    /// Length of the trailing window in days (WINDOW_DAYS)
    pub window_days: i64,
    /// Aggregation bucket width in seconds (BUCKET_SECS)
    pub bucket_secs: i64,
    /// Directory the PNG is written into (OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Open the terminal chart after writing the image (INTERACTIVE)
    pub interactive: bool,
    /// Optional path for a JSON dump of the enriched series (EXPORT_JSON)
    pub export_json: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = Self {
            db_path: var("DB_PATH").unwrap_or_else(|| DB_PATH.to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            item_id: parse_or(&var, "ITEM_ID", DEFAULT_ITEM_ID)?,
            faction_id: parse_or(&var, "FACTION_ID", DEFAULT_FACTION_ID)?,
            realm_id: parse_or(&var, "REALM_ID", DEFAULT_REALM_ID)?,
            window_days: parse_or(&var, "WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?,
            bucket_secs: parse_or(&var, "BUCKET_SECS", DEFAULT_BUCKET_SECS)?,
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            interactive: parse_or(&var, "INTERACTIVE", true)?,
            export_json: var("EXPORT_JSON")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        if cfg.window_days <= 0 {
            return Err(AppError::Config("WINDOW_DAYS must be positive".to_string()));
        }
        if cfg.bucket_secs <= 0 {
            return Err(AppError::Config("BUCKET_SECS must be positive".to_string()));
        }

        Ok(cfg)
    }

    /// File name of the static chart, e.g. `Mongoose_7_day_history.png`.
    pub fn image_path(&self, item_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{item_name}_{}_day_history.png", self.window_days))
    }
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw:?}"))),
        None => Ok(default),
    }
}
