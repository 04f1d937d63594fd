use std::time::Duration;

use anyhow::{Context, Result, bail};
use storage::{SheetsConfig, models::ColumnNames, store::DEFAULT_SHEETS_API_URL};

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Sheets(SheetsConfig),
    /// Process-local sheet, lost on restart.
    Memory,
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    pub store: StoreBackend,
    pub columns: ColumnNames,
    pub draw_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required =
            |key: &str| var(key).with_context(|| format!("Cannot load {key} env variable"));

        let store = match var("STORE_BACKEND").as_deref().unwrap_or("sheets") {
            "sheets" => StoreBackend::Sheets(SheetsConfig {
                base_url: var("SHEETS_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string()),
                spreadsheet_id: required("SHEETS_SPREADSHEET_ID")?,
                sheet_name: var("SHEETS_SHEET_NAME").unwrap_or_else(|| "Sheet1".to_string()),
                access_token: required("SHEETS_ACCESS_TOKEN")?,
            }),
            "memory" => StoreBackend::Memory,
            other => bail!("STORE_BACKEND must be 'sheets' or 'memory', got '{other}'"),
        };

        let defaults = ColumnNames::default();

        Ok(Self {
            host: required("HOST")?,
            port: required("PORT")?.parse().context("PORT must be a number")?,
            admin_password: required("ADMIN_PASSWORD")?,
            store,
            columns: ColumnNames {
                name: var("NAME_COLUMN").unwrap_or(defaults.name),
                email: var("EMAIL_COLUMN").unwrap_or(defaults.email),
                won: var("WON_COLUMN").unwrap_or(defaults.won),
            },
            draw_delay: Duration::from_millis(match var("DRAW_DELAY_MS") {
                Some(ms) => ms.parse().context("DRAW_DELAY_MS must be a number")?,
                None => 2000,
            }),
        })
    }
}
