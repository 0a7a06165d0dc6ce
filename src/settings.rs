//! Game settings and preferences
//!
//! Stored as JSON next to the binary. Loading never fails: a missing or
//! malformed file falls back to defaults with a warning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_VIEW_RANGE};
use crate::sim::WorldConfig;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, fire, ash)
    pub particles: bool,
    /// Smaller bursts
    pub reduced_motion: bool,

    // === World ===
    /// Seed for building layout, palms and particles
    pub seed: u64,
    pub map_width: usize,
    pub map_height: usize,
    pub palm_count: usize,
    /// Tiles drawn around the camera in each direction
    pub view_range: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,

            seed: 0x5EED,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            palm_count: 40,
            view_range: DEFAULT_VIEW_RANGE,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "return_fire_settings.json";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Burst size multiplier (respects reduced_motion)
    pub fn burst_scale(&self) -> f32 {
        if self.reduced_motion { 0.5 } else { 1.0 }
    }

    /// Simulation parameters derived from these settings
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            seed: self.seed,
            map_width: self.map_width.max(1),
            map_height: self.map_height.max(1),
            palm_count: self.palm_count,
            view_range: self.view_range.max(1.0),
            max_particles: self.max_particles(),
            burst_scale: self.burst_scale(),
        }
    }

    /// Load settings from the default file in the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings at {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`; failures are logged, not returned
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}
