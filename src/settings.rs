//! Game settings and preferences
//!
//! Persisted in LocalStorage, separately from the high scores.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Wake particles behind the vessel
    pub wake_trail: bool,
    /// White flash over the goal band when a level is cleared
    pub goal_flash: bool,

    // === HUD ===
    /// Level and row count readout
    pub show_hud: bool,

    // === Controls ===
    /// Accept W/A/S/D in addition to the arrow keys
    pub wasd_keys: bool,

    // === Accessibility ===
    /// Reduced motion (no goal flash, no mine bob)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wake_trail: true,
            goal_flash: true,
            show_hud: true,
            wasd_keys: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective goal flash (respects reduced_motion)
    pub fn effective_goal_flash(&self) -> bool {
        self.goal_flash && !self.reduced_motion
    }

    /// Whether mines bob on the swell (respects reduced_motion)
    pub fn effective_mine_bob(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frigate_hop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings could not be saved");
                } else {
                    log::info!("Settings saved");
                }
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
