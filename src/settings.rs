//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Missing keys take their defaults,
//! so a settings file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative settings file
pub const CONFIG_ENV: &str = "SUPER_PLATFORMER_CONFIG";
/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "super-platformer.json";

const MIN_FPS: u32 = 10;
const MAX_FPS: u32 = 240;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play sound effects when the terminal supports it
    pub sound: bool,
    /// Master volume (0.0 - 1.0); 0 silences everything
    pub master_volume: f32,

    // === Display ===
    /// Frames (and simulation ticks) per second
    pub target_fps: u32,
    /// Show the controls line while playing
    pub show_controls: bool,

    // === Accessibility ===
    /// Don't flash the player while invincible
    pub reduced_motion: bool,

    // === Debug ===
    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            master_volume: 0.8,

            target_fps: crate::consts::TICKS_PER_SECOND,
            show_controls: true,

            reduced_motion: false,

            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and clamp out-of-range values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Serialize to pretty JSON (for writing a starter settings file)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.target_fps = self.target_fps.clamp(MIN_FPS, MAX_FPS);
        self
    }

    /// Whether sound effects should play at all
    pub fn effective_sound(&self) -> bool {
        self.sound && self.master_volume > 0.0
    }

    /// Whether the invincibility flash should be drawn
    pub fn effective_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// Path settings are loaded from
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load settings from the configured path, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let (settings, outcome) = Self::read_from(path);
        outcome.log(path);
        settings
    }

    /// Read settings from `path` without logging
    ///
    /// For callers that need the settings before a logger exists; log the
    /// returned outcome once it does.
    pub fn read_from(path: &Path) -> (Self, LoadOutcome) {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return (Self::default(), LoadOutcome::Missing);
            }
            Err(e) => return (Self::default(), LoadOutcome::Unreadable(e)),
        };

        match Self::from_json(&json) {
            Ok(settings) => (settings, LoadOutcome::Loaded),
            Err(e) => (Self::default(), LoadOutcome::Malformed(e)),
        }
    }
}

/// How reading the settings file went
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// No file; defaults used
    Missing,
    /// File exists but could not be read; defaults used
    Unreadable(std::io::Error),
    /// File is not valid settings JSON; defaults used
    Malformed(serde_json::Error),
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, LoadOutcome::Loaded)
    }

    pub fn log(&self, path: &Path) {
        match self {
            LoadOutcome::Loaded => log::info!("Loaded settings from {}", path.display()),
            LoadOutcome::Missing => {
                log::info!("No settings file at {}, using defaults", path.display())
            }
            LoadOutcome::Unreadable(e) => log::warn!("Could not read {}: {}", path.display(), e),
            LoadOutcome::Malformed(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e)
            }
        }
    }
}
