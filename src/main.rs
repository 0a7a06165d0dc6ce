//! Return Fire entry point
//!
//! Headless driver: loads settings, picks a vehicle from the command line and
//! lets a simple autopilot play the mission, logging HUD changes.
//!
//! Usage: `return-fire [tank|hummer|helicopter] [max_frames]`

use glam::Vec2;

use return_fire::Session;
use return_fire::settings::Settings;
use return_fire::sim::{GamePhase, GameState, HeldDirections, InputEvent, TickInput, VehicleKind};
use return_fire::ui::{HudStatus, UiSink};

/// Frame time reported to the session (display refresh)
const FRAME_SECS: f64 = 1.0 / 60.0;

/// Writes HUD changes to the log
struct LogSink;

impl UiSink for LogSink {
    fn status_changed(&mut self, status: &HudStatus) {
        log::info!(
            "HUD: destroyed {} | flag {}",
            status.destroyed_buildings,
            status.flag.as_str()
        );
    }
}

/// Axis-aligned steering toward `target`, with a dead zone so the vehicle
/// lines up on an axis or diagonal before arriving
fn steer(from: Vec2, target: Vec2) -> HeldDirections {
    const DEAD_ZONE: f32 = 0.3;
    let d = target - from;
    HeldDirections {
        up: d.y < -DEAD_ZONE,
        down: d.y > DEAD_ZONE,
        left: d.x < -DEAD_ZONE,
        right: d.x > DEAD_ZONE,
    }
}

/// Decide this frame's input from the current state
fn autopilot(state: &GameState, vehicle: VehicleKind) -> TickInput {
    let mut input = TickInput::default();
    let Some(player) = &state.player else {
        input.events.push(InputEvent::SelectVehicle(vehicle));
        return input;
    };

    if player.profile().can_fly && player.target_altitude < 2.0 {
        input.events.push(InputEvent::RaiseAltitude);
    }

    if player.carrying_flag {
        input.held = steer(player.pos, state.home.center);
        input.events.push(InputEvent::Interact);
        return input;
    }

    let Some(flag_idx) = state.entities.flag_building() else {
        return input;
    };
    let flag = &state.entities.buildings[flag_idx];
    let dist = player.pos.distance(flag.pos);
    if flag.destroyed {
        input.held = steer(player.pos, flag.pos);
        input.events.push(InputEvent::Interact);
    } else {
        if dist > 2.5 {
            input.held = steer(player.pos, flag.pos);
        }
        if dist < 6.0 {
            input.events.push(InputEvent::FireWeapon);
        }
    }
    input
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let vehicle = match args.next() {
        Some(arg) => match VehicleKind::from_str(&arg) {
            Some(kind) => kind,
            None => {
                log::error!("Unknown vehicle '{}', expected tank, hummer or helicopter", arg);
                std::process::exit(2);
            }
        },
        None => VehicleKind::Helicopter,
    };
    let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5000);

    let settings = Settings::load();
    let mut session = Session::from_settings(&settings);
    let (water, sand, grass) = session.state.terrain.census();
    log::info!(
        "Island generated: {} water, {} sand, {} grass tiles, {} buildings",
        water,
        sand,
        grass,
        session.state.entities.buildings.len()
    );

    let mut sink = LogSink;
    let mut drawn = 0usize;
    while session.frames() < max_frames {
        let input = autopilot(&session.state, vehicle);
        let list = session.frame(&input, FRAME_SECS, &mut sink);
        drawn = list.len();
        if session.state.phase == GamePhase::Won {
            break;
        }
    }

    let hud = session.hud();
    log::info!(
        "Finished after {} frames ({:.1}s simulated): {:?}, {} buildings destroyed, {} draw commands last frame",
        session.frames(),
        session.elapsed_secs(),
        session.state.phase,
        hud.destroyed_buildings,
        drawn
    );
}
