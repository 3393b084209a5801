use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScrapeError};
use crate::normalize::MonthTable;

pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub notion_token: String,
    #[serde(default)]
    pub notion_database_id: String,
    #[serde(default = "default_base_url")]
    pub notion_base_url: String,
    #[serde(default = "default_version")]
    pub notion_version: String,
    /// Fallback month table for sites that do not declare their own.
    #[serde(default)]
    pub month_names: Option<Vec<String>>,
}

fn default_base_url() -> String {
    DEFAULT_NOTION_BASE_URL.to_owned()
}

fn default_version() -> String {
    DEFAULT_NOTION_VERSION.to_owned()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let resource = path.display().to_string();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScrapeError::not_found(resource));
            }
            Err(err) => return Err(ScrapeError::malformed(resource, err)),
        };
        Self::from_json(&resource, &json)
    }

    pub fn from_json(resource: &str, json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|err| ScrapeError::malformed(resource, err))?;

        if config.notion_token.trim().is_empty() {
            return Err(ScrapeError::InvalidDestinationCredentials { key: "notion_token" });
        }
        if config.notion_database_id.trim().is_empty() {
            return Err(ScrapeError::InvalidDestinationCredentials {
                key: "notion_database_id",
            });
        }
        if let Some(names) = &config.month_names {
            MonthTable::from_names(names).map_err(|reason| ScrapeError::malformed(resource, reason))?;
        }

        Ok(config)
    }

    pub fn month_table(&self) -> MonthTable {
        self.month_names
            .as_deref()
            .and_then(|names| MonthTable::from_names(names).ok())
            .unwrap_or_default()
    }
}
