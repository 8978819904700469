//! Persisted settings and document state.
//!
//! Exactly two blobs live on disk, mirroring the original tool's browser
//! storage: `settings.json` and `document.html`, both under
//! `~/.selectorprobe` (or `SELECTORPROBE_HOME` when set, which tests use).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::importer::DEFAULT_RELAYS;

/// Environment overrides, checked before the stored settings
pub const ENV_GEMINI_API_KEY: &str = "SELECTORPROBE_GEMINI_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "SELECTORPROBE_OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "SELECTORPROBE_BASE_URL";
pub const ENV_MODEL: &str = "SELECTORPROBE_MODEL";

const ENV_HOME: &str = "SELECTORPROBE_HOME";
const SETTINGS_FILE: &str = "settings.json";
const DOCUMENT_FILE: &str = "document.html";

/// AI provider selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Google generative AI endpoint with a schema-constrained request
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat-completions endpoint in JSON mode
    OpenaiCompatible,
}

/// User settings, persisted as one opaque JSON blob
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Free-text rules appended to every prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rules: Option<String>,
    /// Relay templates for the import cascade; `None` means the built-in list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relays: Option<Vec<String>>,
}

impl Settings {
    /// API key with the environment override applied.
    pub fn resolved_api_key(&self) -> Option<String> {
        let env_var = match self.provider {
            Provider::Gemini => ENV_GEMINI_API_KEY,
            Provider::OpenaiCompatible => ENV_OPENAI_API_KEY,
        };
        std::env::var(env_var)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Base URL with the environment override applied.
    pub fn resolved_base_url(&self) -> Option<String> {
        std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.base_url.clone())
    }

    /// Model name with the environment override applied.
    pub fn resolved_model(&self) -> Option<String> {
        std::env::var(ENV_MODEL)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.model.clone())
    }

    /// Relay templates, falling back to the built-in list.
    pub fn relay_templates(&self) -> Vec<String> {
        self.relays
            .clone()
            .unwrap_or_else(|| DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect())
    }
}

/// Manages the on-disk settings and document blobs
pub struct SettingsStore {
    state_dir: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self> {
        let state_dir = match std::env::var(ENV_HOME) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .context("Unable to determine home directory")?
                .join(".selectorprobe"),
        };
        fs::create_dir_all(&state_dir)?;
        Ok(SettingsStore { state_dir })
    }

    /// Store rooted at an explicit directory (used by tests).
    pub fn with_dir(state_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&state_dir)?;
        Ok(SettingsStore { state_dir })
    }

    pub fn load(&self) -> Result<Settings> {
        let path = self.state_dir.join(SETTINGS_FILE);
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let json = fs::read_to_string(&path)?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed settings file at {}", path.display()))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self.state_dir.join(SETTINGS_FILE);
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&path, json)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn clear_settings(&self) -> Result<()> {
        let path = self.state_dir.join(SETTINGS_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Persist the last-loaded document text.
    pub fn save_document(&self, html: &str) -> Result<()> {
        let path = self.state_dir.join(DOCUMENT_FILE);
        fs::write(&path, html)?;
        debug!("Saved document ({} bytes) to {}", html.len(), path.display());
        Ok(())
    }

    pub fn load_document(&self) -> Result<Option<String>> {
        let path = self.state_dir.join(DOCUMENT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    pub fn clear_document(&self) -> Result<()> {
        let path = self.state_dir.join(DOCUMENT_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
