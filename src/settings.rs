//! Visualization settings
//!
//! Validated on construction and persisted to LocalStorage on the web.

use serde::{Deserialize, Serialize};

/// Configuration error raised by [`Settings::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `duration_secs` must be strictly positive (it divides every velocity)
    DurationNotPositive,
    /// At least one arc is required
    NoArcs,
    /// `initial_arc_count` may not exceed `max_arcs`
    InitialExceedsMax,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DurationNotPositive => write!(f, "duration must be positive"),
            ConfigError::NoArcs => write!(f, "initial arc count must be at least 1"),
            ConfigError::InitialExceedsMax => {
                write!(f, "initial arc count exceeds maximum arc count")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Visualization settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting number of arcs
    pub initial_arc_count: usize,
    /// Maximum number of arcs
    pub max_arcs: usize,
    /// Total time for all dots to realign (seconds)
    pub duration_secs: f64,
    /// Whether rings pulse opacity after an impact
    pub pulse_enabled: bool,
    /// Chime volume (0.0 - 1.0)
    pub volume: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_arc_count: 6,
            max_arcs: 21,
            duration_secs: 900.0,
            pulse_enabled: true,
            volume: 0.15,
        }
    }
}

impl Settings {
    /// Cycle budget shared across the velocity spread.
    ///
    /// Always at least `max_arcs`, so every valid index yields a positive
    /// velocity.
    pub fn max_cycles(&self) -> usize {
        self.max_arcs.max(100)
    }

    /// Reject configurations that would break velocity derivation.
    ///
    /// Division guards live here so frame code never re-checks them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration_secs > 0.0) {
            return Err(ConfigError::DurationNotPositive);
        }
        if self.initial_arc_count == 0 {
            return Err(ConfigError::NoArcs);
        }
        if self.initial_arc_count > self.max_arcs {
            return Err(ConfigError::InitialExceedsMax);
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "arc_chime_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    if settings.validate().is_ok() {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    log::warn!("Stored settings failed validation, using defaults");
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.initial_arc_count, 6);
        assert_eq!(settings.max_arcs, 21);
        assert_eq!(settings.max_cycles(), 100);
    }

    #[test]
    fn test_rejects_bad_duration() {
        let mut settings = Settings::default();
        settings.duration_secs = 0.0;
        assert_eq!(settings.validate(), Err(ConfigError::DurationNotPositive));
        settings.duration_secs = -5.0;
        assert_eq!(settings.validate(), Err(ConfigError::DurationNotPositive));
        settings.duration_secs = f64::NAN;
        assert_eq!(settings.validate(), Err(ConfigError::DurationNotPositive));
    }

    #[test]
    fn test_rejects_count_overflow() {
        let mut settings = Settings::default();
        settings.initial_arc_count = 0;
        assert_eq!(settings.validate(), Err(ConfigError::NoArcs));

        settings.initial_arc_count = 30;
        settings.max_arcs = 21;
        assert_eq!(settings.validate(), Err(ConfigError::InitialExceedsMax));
    }

    #[test]
    fn test_max_cycles_covers_large_populations() {
        let mut settings = Settings::default();
        settings.max_arcs = 150;
        assert_eq!(settings.max_cycles(), 150);
    }
}
