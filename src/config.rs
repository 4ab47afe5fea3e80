//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend address (lookup proxy + submission endpoint)
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default postal-code service address
const DEFAULT_CEP_URL: &str = "https://viacep.com.br";

/// Debounce applied to the activity-code search, in milliseconds
const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Backend base URL
    pub backend_url: Option<String>,
    /// Postal-code service base URL
    pub cep_url: Option<String>,
    /// Activity-code search debounce in milliseconds
    pub search_debounce_ms: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "nucleo-digital", "abertura-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Effective backend URL; the environment variable wins over the file
    pub fn backend_url(&self) -> String {
        std::env::var("ABERTURA_BACKEND_URL")
            .ok()
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    /// Effective postal-code service URL
    pub fn cep_url(&self) -> String {
        self.cep_url
            .clone()
            .unwrap_or_else(|| DEFAULT_CEP_URL.to_string())
    }

    /// Effective search debounce
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }
}
