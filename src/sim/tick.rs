//! Fixed timestep simulation tick
//!
//! Advances the game state one frame in a fixed order: physics, collisions,
//! mission, camera. Interaction checks therefore see the post-movement
//! position.

use super::collision::{run_over_palms, update_palms, update_particles, update_projectiles, update_weapon};
use super::mission::{interact, select_vehicle};
use super::physics::{HeldDirections, adjust_target_altitude, integrate_player};
use super::state::{GamePhase, GameState};
use super::vehicle::VehicleKind;

/// One-shot actions delivered with a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    FireWeapon,
    Interact,
    RaiseAltitude,
    LowerAltitude,
    SelectVehicle(VehicleKind),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions currently held
    pub held: HeldDirections,
    /// Discrete actions since the previous tick
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn has(&self, event: InputEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::SelectingVehicle => {
            let chosen = input.events.iter().find_map(|e| match e {
                InputEvent::SelectVehicle(kind) => Some(*kind),
                _ => None,
            });
            if let Some(kind) = chosen {
                select_vehicle(state, kind);
            }
            return;
        }
        GamePhase::Won => {
            // Gameplay is frozen; leftover bursts finish animating
            update_particles(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let bounds = state.max_position();
    if let Some(player) = state.player.as_mut() {
        for event in &input.events {
            match event {
                InputEvent::RaiseAltitude => adjust_target_altitude(player, 1.0, &state.terrain),
                InputEvent::LowerAltitude => adjust_target_altitude(player, -1.0, &state.terrain),
                _ => {}
            }
        }
        integrate_player(player, input.held, &state.terrain, bounds);
    }

    update_weapon(state, input.has(InputEvent::FireWeapon));
    update_projectiles(state);
    run_over_palms(state);
    update_palms(state);
    update_particles(state);

    if input.has(InputEvent::Interact) {
        interact(state);
    }

    if let Some(pos) = state.player.as_ref().map(|p| p.pos) {
        state.camera.follow(pos);
    }
}
