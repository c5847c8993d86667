use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::dashboard::PROJECT_PAGE;
use crate::db::{self, Database};
use crate::remote::BackendClient;

const APP_NAME: &str = "sunstone";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Base URL of the remote project backend. No URL disables remote sync.
    pub backend_url: Option<String>,
    pub backend_api_key: Option<String>,
    /// Largest value, in bytes, the local store accepts.
    pub storage_quota_bytes: Option<usize>,
    /// Page opened after creating or selecting a project.
    pub project_page: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            backend_url: None,
            backend_api_key: None,
            storage_quota_bytes: None,
            project_page: PROJECT_PAGE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config file")
    }

    /// Apply `SUNSTONE_*` overrides looked up through `get`.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(path) = get("SUNSTONE_DB") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(url) = get("SUNSTONE_BACKEND_URL") {
            self.backend_url = Some(url);
        }
        if let Some(key) = get("SUNSTONE_BACKEND_KEY") {
            self.backend_api_key = Some(key);
        }
        if let Some(quota) = get("SUNSTONE_STORAGE_QUOTA") {
            match quota.parse() {
                Ok(bytes) => self.storage_quota_bytes = Some(bytes),
                Err(_) => tracing::warn!("Ignoring invalid SUNSTONE_STORAGE_QUOTA: {}", quota),
            }
        }
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => db::default_path(),
        }
    }

    /// Open and migrate the configured database.
    pub fn open_database(&self) -> Result<Database> {
        let path = self.database_path()?;
        tracing::debug!("Opening database at {}", path.display());

        let mut db = Database::open(path)?;
        if let Some(bytes) = self.storage_quota_bytes {
            db = db.with_quota(bytes);
        }
        db.migrate()?;
        Ok(db)
    }

    pub fn backend(&self) -> Option<BackendClient> {
        self.backend_url
            .as_ref()
            .map(|url| BackendClient::new(url.clone(), self.backend_api_key.clone()))
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
