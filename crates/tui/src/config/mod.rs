use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    sort::SortMode,
};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timezone: String,
    pub sort: SortMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timezone: "UTC".to_string(),
            sort: SortMode::default(),
        }
    }
}

impl AppConfig {
    /// Parsed IANA timezone used to display dates.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Terminal(format!("invalid timezone: {err}")))
    }
}

#[derive(Debug, Parser)]
#[command(name = "expenso_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Initial sort: date-newest, date-oldest, amount-highest or amount-lowest.
    #[arg(long)]
    sort: Option<SortMode>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("EXPENSO_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(sort) = args.sort {
        settings.sort = sort;
    }

    Ok(settings)
}
