//! Return Fire - isometric island assault game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, vehicles, collisions, mission state)
//! - `renderer`: Isometric projection and depth-ordered draw lists (no pixels)
//! - `ui`: HUD status derived from the simulation, pushed to a sink on change
//! - `session`: Frame driver tying tick, HUD and draw list together
//! - `settings`: Data-driven configuration
//! - `persistence`: Snapshot save/load

pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::Session;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// All rates are per simulation tick; the frame clock's elapsed time is
/// informational only.
pub mod consts {
    /// Default terrain grid dimensions
    pub const DEFAULT_MAP_WIDTH: usize = 40;
    pub const DEFAULT_MAP_HEIGHT: usize = 40;

    /// Altitude above which a flyer ignores terrain
    pub const HOVER_THRESHOLD: f32 = 0.5;
    /// Legal altitude range for flight-capable vehicles
    pub const MAX_ALTITUDE: f32 = 3.0;
    /// Lowest target altitude allowed while over non-ground terrain
    pub const MIN_CRUISE_ALTITUDE: f32 = 1.0;
    /// Fraction of the remaining altitude gap closed each tick
    pub const ALTITUDE_EASE: f32 = 0.1;
    /// Altitude gap below which the ramp snaps to target
    pub const ALTITUDE_SNAP: f32 = 0.01;

    /// Velocity multiplier when a move is blocked
    pub const BLOCKED_BOUNCE: f32 = 0.5;

    /// Projectile lifetime in ticks
    pub const PROJECTILE_LIFE_TICKS: u32 = 60;

    /// Building defaults
    pub const BUILDING_HP: i32 = 3;
    pub const BUILDING_FOOTPRINT_RADIUS: f32 = 0.75;

    /// Palm interaction radii
    pub const PALM_BURN_RADIUS: f32 = 0.5;
    pub const PALM_RUN_OVER_RADIUS: f32 = 0.6;
    /// Ticks a palm burns before collapsing
    pub const PALM_BURN_TICKS: u32 = 90;
    /// Chance per tick that a burning palm sheds a fire particle
    pub const PALM_FIRE_CHANCE: f32 = 0.3;
    /// Lean animation speed for felled palms (radians per tick)
    pub const PALM_FALL_SPEED: f32 = 0.08;

    /// Particle downward acceleration per tick
    pub const PARTICLE_GRAVITY: f32 = 0.01;
    /// Nominal particle lifetime used for alpha
    pub const PARTICLE_TOTAL_LIFE: u32 = 60;

    /// Mission radii
    pub const FLAG_PICKUP_RADIUS: f32 = 2.0;
    pub const HOME_ZONE_RADIUS: f32 = 2.0;

    /// Tiles visible around the camera in each direction
    pub const DEFAULT_VIEW_RANGE: f32 = 15.0;
}

/// Unit vector for a heading angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Heading angle of a direction vector
#[inline]
pub fn angle_of(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_round_trip() {
        let a = 0.75;
        assert!((angle_of(heading(a)) - a).abs() < 1e-6);
    }

    #[test]
    fn test_screen_down_is_positive_quarter_turn() {
        assert!((angle_of(Vec2::Y) - FRAC_PI_2).abs() < 1e-6);
    }
}
