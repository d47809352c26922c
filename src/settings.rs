//! Game settings
//!
//! Read from a JSON file next to the executable. Missing fields take their
//! defaults so an old or partial file still loads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    pub window_title: String,

    // === Assets ===
    /// Directory textures are resolved against; unset skips the check
    pub asset_root: Option<PathBuf>,

    // === Persistence ===
    /// Flat-file high-score table
    pub high_score_path: PathBuf,

    // === Demo loop ===
    /// Frames per second the headless loop simulates
    pub frame_rate: u32,
    /// Frames to run before stopping, 0 for no limit
    pub demo_frames: u32,
    /// Steer the paddle automatically; keyboard steering is overridden
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            window_title: "Breakout!".to_string(),

            asset_root: None,

            high_score_path: PathBuf::from("High_scores.txt"),

            frame_rate: 60,
            demo_frames: 60 * 60 * 5,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Seconds per simulated frame
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or malformed
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
