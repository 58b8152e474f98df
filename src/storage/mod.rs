//! Persisted user preferences.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::env;

const SETTINGS_FILE: &str = "settings.json";

/// Choices that survive a restart. Absent fields fall back to detection
/// (language) or the platform default (output directory).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        env::default_app_dir().join(SETTINGS_FILE)
    }

    /// Loads saved settings, treating a missing or malformed file as empty.
    pub fn load() -> Self {
        let path = Self::settings_path();
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("ignoring malformed settings at {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("unable to create settings dir: {e}"))?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| format!("unable to encode settings: {e}"))?;
        fs::write(&path, raw).map_err(|e| format!("unable to persist settings: {e}"))
    }
}
