//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; entities refer to each
//! other only by index, resolved within the tick that needs them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::terrain::TerrainGrid;
use super::vehicle::{VehicleKind, VehicleProfile};
use super::world::{WorldConfig, populate};
use crate::consts::*;

/// Top-level mission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a vehicle
    SelectingVehicle,
    /// Active gameplay
    Playing,
    /// Flag delivered home (terminal)
    Won,
}

/// The player's vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (world space)
    pub facing: f32,
    pub altitude: f32,
    pub target_altitude: f32,
    pub carrying_flag: bool,
    pub weapon_cooldown: u32,
    pub vehicle: VehicleKind,
}

impl Player {
    pub fn new(vehicle: VehicleKind, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: 0.0,
            altitude: 0.0,
            target_altitude: 0.0,
            carrying_flag: false,
            weapon_cooldown: 0,
            vehicle,
        }
    }

    pub fn profile(&self) -> &'static VehicleProfile {
        self.vehicle.profile()
    }

    /// Above the hover threshold: terrain and palms no longer apply
    pub fn is_airborne(&self) -> bool {
        self.profile().can_fly && self.altitude > HOVER_THRESHOLD
    }
}

/// Building silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Bunker,
    Tower,
}

/// A fortified structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub pos: Vec2,
    pub footprint_radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub destroyed: bool,
    /// Hides the flag until destroyed
    pub holds_flag: bool,
    pub kind: BuildingKind,
}

impl Building {
    pub fn new(pos: Vec2, kind: BuildingKind) -> Self {
        Self {
            pos,
            footprint_radius: BUILDING_FOOTPRINT_RADIUS,
            hp: BUILDING_HP,
            max_hp: BUILDING_HP,
            destroyed: false,
            holds_flag: false,
            kind,
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Apply damage; returns true if this hit destroyed the building
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        debug_assert!(!self.destroyed, "damage applied to destroyed building");
        if self.destroyed {
            return false;
        }
        self.hp = (self.hp - damage).max(0);
        if self.hp == 0 {
            self.destroyed = true;
            return true;
        }
        false
    }
}

/// Palm tree lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PalmState {
    Standing,
    Burning,
    Felled,
}

/// A palm tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palm {
    pub pos: Vec2,
    pub height_scale: f32,
    pub state: PalmState,
    pub burn_ticks: u32,
    /// Direction the trunk falls toward (radians)
    pub fall_direction: f32,
    /// Current lean from upright, 0..=π/2
    pub lean: f32,
}

impl Palm {
    pub fn new(pos: Vec2, height_scale: f32) -> Self {
        Self {
            pos,
            height_scale,
            state: PalmState::Standing,
            burn_ticks: 0,
            fall_direction: 0.0,
            lean: 0.0,
        }
    }

    pub fn ignite(&mut self) {
        if self.state == PalmState::Standing {
            self.state = PalmState::Burning;
            self.burn_ticks = PALM_BURN_TICKS;
        }
    }

    pub fn fell(&mut self, direction: f32) {
        if self.state != PalmState::Felled {
            self.state = PalmState::Felled;
            self.burn_ticks = 0;
            self.fall_direction = direction;
        }
    }

    /// Lean has reached the ground
    pub fn is_settled(&self) -> bool {
        self.state == PalmState::Felled && self.lean >= std::f32::consts::FRAC_PI_2
    }
}

/// A shell in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life_ticks: u32,
    pub damage: i32,
    /// Fired from above the hover threshold; survives over water
    pub airborne: bool,
}

/// Particle colour, chosen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Impact,
    Destruction,
    Capture,
    Fire,
    Ash,
    Leaves,
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life_ticks: u32,
    pub total_life_ticks: u32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        if self.total_life_ticks == 0 {
            return 0.0;
        }
        (self.life_ticks as f32 / self.total_life_ticks as f32).clamp(0.0, 1.0)
    }
}

/// Circular delivery zone for the flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomeZone {
    pub center: Vec2,
    pub radius: f32,
}

impl HomeZone {
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) < self.radius
    }
}

/// Objective progress; every flag only ever turns on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionState {
    pub destroyed_buildings: u32,
    pub flag_revealed: bool,
    pub flag_captured: bool,
    pub mission_won: bool,
}

impl MissionState {
    pub fn record_destruction(&mut self) {
        self.destroyed_buildings += 1;
    }

    pub fn reveal_flag(&mut self) {
        self.flag_revealed = true;
    }

    pub fn capture_flag(&mut self) {
        self.flag_captured = true;
    }

    pub fn win(&mut self) {
        self.mission_won = true;
    }
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    VehicleSelected(VehicleKind),
    WeaponFired,
    BuildingHit { index: usize },
    BuildingDestroyed { index: usize },
    FlagRevealed,
    FlagCaptured,
    PalmIgnited { index: usize },
    PalmFelled { index: usize },
    MissionWon,
}

/// Owner of every mutable entity collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub buildings: Vec<Building>,
    pub palms: Vec<Palm>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl EntityStore {
    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Push a particle, evicting the oldest when at `cap`
    pub fn spawn_particle(&mut self, particle: Particle, cap: usize) {
        if cap == 0 {
            return;
        }
        if self.particles.len() >= cap {
            let overflow = self.particles.len() + 1 - cap;
            self.particles.drain(..overflow);
        }
        self.particles.push(particle);
    }

    /// Index of the flag-holding building, if any
    pub fn flag_building(&self) -> Option<usize> {
        self.buildings.iter().position(|b| b.holds_flag)
    }
}

/// RNG state wrapper for serialization
///
/// Each consumer derives a fresh generator from `(seed, draws)`, so a restored
/// state replays the same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        self.draws += 1;
        Pcg32::seed_from_u64(self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: WorldConfig,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub terrain: TerrainGrid,
    pub entities: EntityStore,
    /// Present once a vehicle has been chosen
    pub player: Option<Player>,
    pub mission: MissionState,
    pub home: HomeZone,
    pub camera: Camera,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh world awaiting vehicle selection
    pub fn new(config: WorldConfig) -> Self {
        let terrain = TerrainGrid::generate(config.map_width, config.map_height);
        let center = Vec2::new(config.map_width as f32 / 2.0, config.map_height as f32 / 2.0);
        let mut rng_state = RngState::new(config.seed);
        let entities = populate(&terrain, &config, center, &mut rng_state.next_rng());

        Self {
            camera: Camera::new(center, config.view_range),
            config,
            rng_state,
            time_ticks: 0,
            phase: GamePhase::SelectingVehicle,
            terrain,
            entities,
            player: None,
            mission: MissionState::default(),
            home: HomeZone {
                center,
                radius: HOME_ZONE_RADIUS,
            },
            events: Vec::new(),
        }
    }

    /// Create the player at the home zone and start play
    pub fn spawn_player(&mut self, vehicle: VehicleKind) {
        self.player = Some(Player::new(vehicle, self.home.center));
        self.camera.follow(self.home.center);
    }

    /// Map bounds for positions, inclusive
    pub fn max_position(&self) -> Vec2 {
        Vec2::new(
            (self.terrain.width() as f32 - 1.0).max(0.0),
            (self.terrain.height() as f32 - 1.0).max(0.0),
        )
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
