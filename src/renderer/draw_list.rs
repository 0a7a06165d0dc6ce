//! Depth-ordered draw list
//!
//! Rebuilt every frame from the game state. Each command carries only what a
//! renderer needs to pick a visual; the list is sorted back-to-front along the
//! isometric diagonal (world x + y) with a stable sort, so equal depths keep
//! their category and insertion order.

use glam::Vec2;

use super::projection::IsoProjector;
use crate::sim::{BuildingKind, GameState, PalmState, ParticleColor, TerrainKind, VehicleKind};

/// What to draw, with the state needed to choose its appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawKind {
    Tile {
        x: usize,
        y: usize,
        terrain: TerrainKind,
        elevation: f32,
    },
    HomeZone {
        radius: f32,
    },
    Building {
        index: usize,
        kind: BuildingKind,
        hp_ratio: f32,
        destroyed: bool,
        /// Rubble shows the uncaptured flag
        flag_visible: bool,
    },
    Palm {
        index: usize,
        state: PalmState,
        height_scale: f32,
        fall_direction: f32,
        lean: f32,
    },
    Player {
        vehicle: VehicleKind,
        facing: f32,
        altitude: f32,
        carrying_flag: bool,
    },
    Projectile {
        index: usize,
    },
    Particle {
        index: usize,
        color: ParticleColor,
        alpha: f32,
    },
}

/// One positioned draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub screen: Vec2,
    /// Isometric depth key, smaller is further back
    pub depth: f32,
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }
}

/// Collects drawables, then sorts them by depth
struct DrawListBuilder<'a> {
    projector: &'a IsoProjector,
    state: &'a GameState,
    commands: Vec<DrawCommand>,
}

impl<'a> DrawListBuilder<'a> {
    fn push(&mut self, kind: DrawKind, world: Vec2, elevation: f32) {
        self.commands.push(DrawCommand {
            kind,
            screen: self.projector.project(world, elevation, &self.state.camera),
            depth: world.x + world.y,
        });
    }

    fn ground(&self, pos: Vec2) -> f32 {
        self.state.terrain.elevation_at(pos)
    }

    fn finish(mut self) -> DrawList {
        self.commands.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        DrawList {
            commands: self.commands,
        }
    }
}

/// Build the depth-sorted draw list for the current frame
pub fn build_draw_list(state: &GameState, projector: &IsoProjector) -> DrawList {
    let terrain = &state.terrain;
    let window = state.camera.window(terrain.width(), terrain.height());
    let mut builder = DrawListBuilder {
        projector,
        state,
        commands: Vec::new(),
    };

    for y in window.y0..window.y1 {
        for tile in &terrain.row(y)[window.x0..window.x1] {
            builder.push(
                DrawKind::Tile {
                    x: tile.grid_x as usize,
                    y: tile.grid_y as usize,
                    terrain: tile.kind,
                    elevation: tile.elevation,
                },
                Vec2::new(tile.grid_x as f32, tile.grid_y as f32),
                tile.elevation,
            );
        }
    }

    let home = state.home;
    builder.push(DrawKind::HomeZone { radius: home.radius }, home.center, builder.ground(home.center));

    for (index, building) in state.entities.buildings.iter().enumerate() {
        if !window.contains(building.pos) {
            continue;
        }
        builder.push(
            DrawKind::Building {
                index,
                kind: building.kind,
                hp_ratio: building.hp_ratio(),
                destroyed: building.destroyed,
                flag_visible: building.holds_flag && building.destroyed && !state.mission.flag_captured,
            },
            building.pos,
            builder.ground(building.pos),
        );
    }

    for (index, palm) in state.entities.palms.iter().enumerate() {
        if !window.contains(palm.pos) {
            continue;
        }
        builder.push(
            DrawKind::Palm {
                index,
                state: palm.state,
                height_scale: palm.height_scale,
                fall_direction: palm.fall_direction,
                lean: palm.lean,
            },
            palm.pos,
            builder.ground(palm.pos),
        );
    }

    if let Some(player) = &state.player {
        builder.push(
            DrawKind::Player {
                vehicle: player.vehicle,
                facing: player.facing,
                altitude: player.altitude,
                carrying_flag: player.carrying_flag,
            },
            player.pos,
            builder.ground(player.pos) + player.altitude,
        );
    }

    for (index, proj) in state.entities.projectiles.iter().enumerate() {
        builder.push(DrawKind::Projectile { index }, proj.pos, builder.ground(proj.pos));
    }

    for (index, particle) in state.entities.particles.iter().enumerate() {
        builder.push(
            DrawKind::Particle {
                index,
                color: particle.color,
                alpha: particle.alpha(),
            },
            particle.pos,
            builder.ground(particle.pos),
        );
    }

    builder.finish()
}
