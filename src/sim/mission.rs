//! Mission flow: vehicle selection, flag capture and delivery

use super::collision::{CAPTURE_BURST, spawn_burst};
use super::state::{GameEvent, GamePhase, GameState, ParticleColor};
use super::vehicle::VehicleKind;
use crate::consts::FLAG_PICKUP_RADIUS;

/// Leave vehicle selection with the chosen vehicle
///
/// Ignored outside `SelectingVehicle`.
pub fn select_vehicle(state: &mut GameState, vehicle: VehicleKind) {
    if state.phase != GamePhase::SelectingVehicle {
        return;
    }
    state.spawn_player(vehicle);
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::VehicleSelected(vehicle));
    log::info!("Vehicle selected: {}", vehicle.as_str());
}

/// Index of a revealed, uncaptured flag building within pickup range
fn flag_in_reach(state: &GameState) -> Option<usize> {
    let player = state.player.as_ref()?;
    if state.mission.flag_captured {
        return None;
    }
    state
        .entities
        .buildings
        .iter()
        .position(|b| b.destroyed && b.holds_flag && b.pos.distance(player.pos) < FLAG_PICKUP_RADIUS)
}

/// Handle the interact action
///
/// Picks up the flag when standing by its rubble, otherwise completes the
/// mission when carrying the flag inside the home zone. Anything else is a
/// no-op.
pub fn interact(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(idx) = flag_in_reach(state) {
        if let Some(player) = state.player.as_mut() {
            player.carrying_flag = true;
        }
        state.mission.capture_flag();
        state.emit(GameEvent::FlagCaptured);
        let origin = state.entities.buildings[idx].pos;
        spawn_burst(state, origin, ParticleColor::Capture, CAPTURE_BURST);
        log::info!("Flag captured, return to base");
        return;
    }

    let delivered = state
        .player
        .as_ref()
        .map(|p| p.carrying_flag && state.home.contains(p.pos))
        .unwrap_or(false);
    if delivered {
        state.mission.win();
        state.phase = GamePhase::Won;
        state.emit(GameEvent::MissionWon);
        log::info!("Mission complete after {} ticks", state.time_ticks);
    }
}
