//! Weapon fire and entity interactions
//!
//! Projectiles against buildings and palms, the player against palms, palm
//! burn progression and particle integration. Collections that shrink during
//! a pass are walked in reverse index order so removal never skips or
//! revisits an element.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, PalmState, Particle, ParticleColor, Projectile};
use crate::consts::*;
use crate::heading;

/// Burst sizes
pub const IMPACT_BURST: usize = 10;
pub const DESTRUCTION_BURST: usize = 30;
pub const CAPTURE_BURST: usize = 20;
pub const IGNITE_BURST: usize = 6;
pub const ASH_BURST: usize = 12;
pub const RUN_OVER_BURST: usize = 8;

/// Result of testing one projectile against the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    Building(usize),
    Palm(usize),
    Miss,
}

/// Spawn `count` particles radiating from `origin`
pub fn spawn_burst(state: &mut GameState, origin: Vec2, color: ParticleColor, count: usize) {
    let cap = state.config.max_particles;
    if cap == 0 {
        return;
    }
    let count = ((count as f32) * state.config.burst_scale).round() as usize;
    let mut rng = state.rng_state.next_rng();
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random::<f32>() * 0.2 + 0.1;
        let life = rng.random_range(30..=PARTICLE_TOTAL_LIFE);
        state.entities.spawn_particle(
            Particle {
                pos: origin,
                vel: heading(angle) * speed,
                life_ticks: life,
                total_life_ticks: PARTICLE_TOTAL_LIFE,
                color,
            },
            cap,
        );
    }
}

/// Tick the weapon cooldown and fire if requested and ready
///
/// Returns true if a projectile was spawned. Firing while cooling down is a
/// silent no-op.
pub fn update_weapon(state: &mut GameState, fire: bool) -> bool {
    let Some(player) = state.player.as_mut() else {
        return false;
    };
    player.weapon_cooldown = player.weapon_cooldown.saturating_sub(1);
    if !fire || player.weapon_cooldown > 0 {
        return false;
    }

    let profile = player.profile();
    player.weapon_cooldown = profile.fire_cooldown_ticks;
    let projectile = Projectile {
        pos: player.pos,
        vel: heading(player.facing) * profile.projectile_speed,
        life_ticks: PROJECTILE_LIFE_TICKS,
        damage: profile.projectile_damage,
        airborne: player.is_airborne(),
    };
    state.entities.spawn_projectile(projectile);
    state.emit(GameEvent::WeaponFired);
    log::debug!("Weapon fired");
    true
}

/// First target a projectile at `pos` would hit; buildings win ties
pub fn find_hit(state: &GameState, pos: Vec2) -> ProjectileHit {
    if let Some(idx) = state
        .entities
        .buildings
        .iter()
        .position(|b| !b.destroyed && pos.distance(b.pos) < b.footprint_radius)
    {
        return ProjectileHit::Building(idx);
    }
    if let Some(idx) = state
        .entities
        .palms
        .iter()
        .position(|p| p.state == PalmState::Standing && pos.distance(p.pos) < PALM_BURN_RADIUS)
    {
        return ProjectileHit::Palm(idx);
    }
    ProjectileHit::Miss
}

fn damage_building(state: &mut GameState, idx: usize, damage: i32) {
    let origin = state.entities.buildings[idx].pos;
    let destroyed = state.entities.buildings[idx].apply_damage(damage);
    state.emit(GameEvent::BuildingHit { index: idx });
    spawn_burst(state, origin, ParticleColor::Impact, IMPACT_BURST);
    log::debug!("Building {} hit for {}", idx, damage);

    if destroyed {
        state.mission.record_destruction();
        state.emit(GameEvent::BuildingDestroyed { index: idx });
        spawn_burst(state, origin, ParticleColor::Destruction, DESTRUCTION_BURST);
        log::info!(
            "Building {} destroyed ({} total)",
            idx,
            state.mission.destroyed_buildings
        );
        if state.entities.buildings[idx].holds_flag && !state.mission.flag_revealed {
            state.mission.reveal_flag();
            state.emit(GameEvent::FlagRevealed);
            log::info!("Flag revealed");
        }
    }
}

fn ignite_palm(state: &mut GameState, idx: usize) {
    let origin = state.entities.palms[idx].pos;
    state.entities.palms[idx].ignite();
    state.emit(GameEvent::PalmIgnited { index: idx });
    spawn_burst(state, origin, ParticleColor::Fire, IGNITE_BURST);
    log::debug!("Palm {} ignited", idx);
}

/// Advance every projectile, resolving at most one hit each
pub fn update_projectiles(state: &mut GameState) {
    for i in (0..state.entities.projectiles.len()).rev() {
        let (pos, damage, airborne, expired) = {
            let proj = &mut state.entities.projectiles[i];
            proj.pos += proj.vel;
            proj.life_ticks = proj.life_ticks.saturating_sub(1);
            (proj.pos, proj.damage, proj.airborne, proj.life_ticks == 0)
        };

        match find_hit(state, pos) {
            ProjectileHit::Building(idx) => {
                state.entities.projectiles.remove(i);
                damage_building(state, idx, damage);
            }
            ProjectileHit::Palm(idx) => {
                state.entities.projectiles.remove(i);
                ignite_palm(state, idx);
            }
            ProjectileHit::Miss => {
                if expired || (!airborne && !state.terrain.is_ground(pos)) {
                    state.entities.projectiles.remove(i);
                }
            }
        }
    }
}

/// Flatten standing palms under a grounded player
pub fn run_over_palms(state: &mut GameState) {
    let Some(player) = state.player.as_ref() else {
        return;
    };
    if player.is_airborne() {
        return;
    }
    let (pos, facing) = (player.pos, player.facing);

    for idx in 0..state.entities.palms.len() {
        let palm = &mut state.entities.palms[idx];
        if palm.state != PalmState::Standing || palm.pos.distance(pos) >= PALM_RUN_OVER_RADIUS {
            continue;
        }
        palm.fell(facing);
        let origin = palm.pos;
        state.emit(GameEvent::PalmFelled { index: idx });
        spawn_burst(state, origin, ParticleColor::Leaves, RUN_OVER_BURST);
    }
}

/// Burn countdowns and the felled lean animation
pub fn update_palms(state: &mut GameState) {
    for idx in 0..state.entities.palms.len() {
        match state.entities.palms[idx].state {
            PalmState::Standing => {}
            PalmState::Burning => {
                let palm = &mut state.entities.palms[idx];
                palm.burn_ticks = palm.burn_ticks.saturating_sub(1);
                let origin = palm.pos;
                if palm.burn_ticks == 0 {
                    let direction = palm.fall_direction;
                    palm.fell(direction);
                    state.emit(GameEvent::PalmFelled { index: idx });
                    spawn_burst(state, origin, ParticleColor::Ash, ASH_BURST);
                } else {
                    let mut rng = state.rng_state.next_rng();
                    if rng.random::<f32>() < PALM_FIRE_CHANCE {
                        spawn_burst(state, origin, ParticleColor::Fire, 1);
                    }
                }
            }
            PalmState::Felled => {
                let palm = &mut state.entities.palms[idx];
                if !palm.is_settled() {
                    palm.lean = (palm.lean + PALM_FALL_SPEED).min(std::f32::consts::FRAC_PI_2);
                }
            }
        }
    }
}

/// Integrate particles with gravity and retire the expired ones
pub fn update_particles(state: &mut GameState) {
    let particles = &mut state.entities.particles;
    for i in (0..particles.len()).rev() {
        let p = &mut particles[i];
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life_ticks = p.life_ticks.saturating_sub(1);
        if p.life_ticks == 0 {
            particles.remove(i);
        }
    }
}
