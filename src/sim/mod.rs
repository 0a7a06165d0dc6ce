//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod mission;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;
pub mod world;

pub use camera::{Camera, TileWindow};
pub use collision::{ProjectileHit, find_hit, spawn_burst};
pub use mission::{interact, select_vehicle};
pub use physics::{HeldDirections, integrate_player};
pub use state::{
    Building, BuildingKind, EntityStore, GameEvent, GamePhase, GameState, HomeZone, MissionState, Palm,
    PalmState, Particle, ParticleColor, Player, Projectile,
};
pub use terrain::{TerrainGrid, TerrainKind, Tile};
pub use tick::{InputEvent, TickInput, tick};
pub use vehicle::{VehicleKind, VehicleProfile};
pub use world::WorldConfig;
