//! World population
//!
//! Places the fixed building clusters and scatters palms over the generated
//! terrain. Unlike terrain generation this step consumes randomness.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Building, BuildingKind, EntityStore, Palm};
use super::terrain::{TerrainGrid, TerrainKind, TerrainParams};
use crate::consts::*;

/// Parameters the simulation is built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    pub map_width: usize,
    pub map_height: usize,
    pub palm_count: usize,
    pub view_range: f32,
    /// Particle cap (0 disables particles)
    pub max_particles: usize,
    /// Multiplier on burst particle counts
    pub burst_scale: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            palm_count: 40,
            view_range: DEFAULT_VIEW_RANGE,
            max_particles: 500,
            burst_scale: 1.0,
        }
    }
}

/// Buildings per base cluster; the last cluster guards the flag
pub const CLUSTER_SIZES: [usize; 4] = [3, 3, 3, 4];

/// Palms keep this far from buildings
const PALM_BUILDING_CLEARANCE: f32 = 1.5;
/// Palms keep this far from the home zone center
const PALM_HOME_CLEARANCE: f32 = 2.5;

/// Build the initial entity store
pub fn populate(terrain: &TerrainGrid, config: &WorldConfig, home: Vec2, rng: &mut Pcg32) -> EntityStore {
    let params = TerrainParams::for_size(terrain.width(), terrain.height());
    let mut store = EntityStore::default();

    let flag_cluster = CLUSTER_SIZES.len() - 1;
    for (cluster, (&center, &count)) in params.base_centers.iter().zip(CLUSTER_SIZES.iter()).enumerate() {
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let radius = 2.0 + rng.random::<f32>() * 2.0;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            let kind = if rng.random::<f32>() > 0.5 {
                BuildingKind::Bunker
            } else {
                BuildingKind::Tower
            };
            let mut building = Building::new(pos, kind);
            building.holds_flag = cluster == flag_cluster && i == 0;
            store.buildings.push(building);
        }
    }

    // Rejection-sample grass cells for palms
    let max_attempts = config.palm_count * 20;
    let mut attempts = 0;
    while store.palms.len() < config.palm_count && attempts < max_attempts {
        attempts += 1;
        let pos = Vec2::new(
            rng.random::<f32>() * terrain.width() as f32,
            rng.random::<f32>() * terrain.height() as f32,
        );
        let on_grass = terrain
            .tile_at(pos)
            .map(|t| t.kind == TerrainKind::Grass)
            .unwrap_or(false);
        if !on_grass
            || pos.distance(home) < PALM_HOME_CLEARANCE
            || store
                .buildings
                .iter()
                .any(|b| b.pos.distance(pos) < PALM_BUILDING_CLEARANCE)
        {
            continue;
        }
        let height_scale = 0.8 + rng.random::<f32>() * 0.4;
        store.palms.push(Palm::new(pos, height_scale));
    }

    log::debug!(
        "Populated world: {} buildings, {} palms",
        store.buildings.len(),
        store.palms.len()
    );
    store
}
