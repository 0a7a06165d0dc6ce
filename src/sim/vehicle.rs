//! Vehicle catalog
//!
//! Behavioral differences between vehicles are purely parametric, so each
//! kind maps to one static profile record.

use serde::{Deserialize, Serialize};

/// Selectable vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Tank,
    Hummer,
    Helicopter,
}

/// Per-vehicle tunables (grid units and ticks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    pub kind: VehicleKind,
    pub base_acceleration: f32,
    pub max_speed: f32,
    /// Multiplicative velocity decay per tick
    pub friction: f32,
    pub fire_cooldown_ticks: u32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub collision_radius: f32,
    pub can_fly: bool,
}

static TANK: VehicleProfile = VehicleProfile {
    kind: VehicleKind::Tank,
    base_acceleration: 0.06,
    max_speed: 0.12,
    friction: 0.90,
    fire_cooldown_ticks: 30,
    projectile_speed: 0.45,
    projectile_damage: 2,
    collision_radius: 0.9,
    can_fly: false,
};

static HUMMER: VehicleProfile = VehicleProfile {
    kind: VehicleKind::Hummer,
    base_acceleration: 0.1,
    max_speed: 0.2,
    friction: 0.95,
    fire_cooldown_ticks: 20,
    projectile_speed: 0.5,
    projectile_damage: 1,
    collision_radius: 0.8,
    can_fly: false,
};

static HELICOPTER: VehicleProfile = VehicleProfile {
    kind: VehicleKind::Helicopter,
    base_acceleration: 0.08,
    max_speed: 0.25,
    friction: 0.96,
    fire_cooldown_ticks: 12,
    projectile_speed: 0.6,
    projectile_damage: 1,
    collision_radius: 0.7,
    can_fly: true,
};

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Tank, VehicleKind::Hummer, VehicleKind::Helicopter];

    /// Static profile for this kind
    pub fn profile(&self) -> &'static VehicleProfile {
        match self {
            VehicleKind::Tank => &TANK,
            VehicleKind::Hummer => &HUMMER,
            VehicleKind::Helicopter => &HELICOPTER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Tank => "Tank",
            VehicleKind::Hummer => "Hummer",
            VehicleKind::Helicopter => "Helicopter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tank" => Some(VehicleKind::Tank),
            "hummer" | "jeep" => Some(VehicleKind::Hummer),
            "helicopter" | "heli" | "chopper" => Some(VehicleKind::Helicopter),
            _ => None,
        }
    }
}
