//! Scorekeeper settings
//!
//! Persisted separately from match history: a JSON file on native, a
//! LocalStorage entry in the browser.

use serde::{Deserialize, Serialize};

/// Which flavour of the scorekeeper is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Scores, win detection and history only
    Classic,
    /// Adds the name registry and the sudden death indicator
    #[default]
    SuddenDeath,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::SuddenDeath => "Sudden Death",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "sudden-death" | "sudden_death" | "sudden death" => Some(Variant::SuddenDeath),
            _ => None,
        }
    }

    /// Whether the warning indicator is driven
    pub fn shows_sudden_death(&self) -> bool {
        match self {
            Variant::Classic => false,
            Variant::SuddenDeath => true,
        }
    }

    /// Whether player names are remembered for future setups
    pub fn tracks_names(&self) -> bool {
        match self {
            Variant::Classic => false,
            Variant::SuddenDeath => true,
        }
    }
}

/// Scorekeeper settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,

    // === Native storage ===
    /// CSV file match records are appended to
    pub history_path: String,
    /// CSV file holding one remembered name per row
    pub names_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            history_path: "game_history.csv".to_string(),
            names_path: "player_names.csv".to_string(),
        }
    }
}

impl Settings {
    /// Settings with a specific variant, everything else default
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring malformed settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "scorekeeper_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "SCOREKEEPER_SETTINGS";

    /// Settings file used when the environment does not name one
    pub const DEFAULT_PATH: &'static str = "scorekeeper.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the JSON file named by `SCOREKEEPER_SETTINGS`,
    /// or `scorekeeper.json` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
