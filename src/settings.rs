//! Player preferences
//!
//! Persisted separately from scores. On the web this lands in LocalStorage;
//! native builds fall back to defaults unless a path is given.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settings {
    /// Opacity of the preview ghost ball
    pub preview_opacity: f32,
    /// Master volume (0.0 - 1.0), consumed by the external audio collaborator
    pub master_volume: f32,
    /// Effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_opacity: 0.4,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tube_merge_settings";

    /// Clamp all values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.preview_opacity = self.preview_opacity.clamp(0.0, 1.0);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitized();
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

    /// Load settings from a JSON file, defaults on any failure (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => settings.sanitized(),
                Err(err) => {
                    log::warn!("corrupt settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("failed to write settings {}: {err}", path.display());
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}
