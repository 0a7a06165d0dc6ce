//! Frame driver
//!
//! One frame is exactly one simulation tick followed by one draw-list build.
//! The session also drains game events into the log and keeps the UI sink in
//! step with the HUD status.

use crate::renderer::{DrawList, IsoProjector, build_draw_list};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, WorldConfig, tick};
use crate::ui::{HudStatus, HudTracker, UiSink};

pub struct Session {
    pub state: GameState,
    pub projector: IsoProjector,
    hud: HudTracker,
    /// Host frame time accumulated, informational only
    elapsed_secs: f64,
    frames: u64,
}

impl Session {
    pub fn new(config: WorldConfig) -> Self {
        Self::with_state(GameState::new(config))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.world_config())
    }

    /// Resume from an existing state (e.g. a loaded snapshot)
    pub fn with_state(state: GameState) -> Self {
        Self {
            state,
            projector: IsoProjector::default(),
            hud: HudTracker::default(),
            elapsed_secs: 0.0,
            frames: 0,
        }
    }

    /// Advance the simulation one tick and return what happened
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            match event {
                GameEvent::PalmIgnited { .. } | GameEvent::PalmFelled { .. } => log::debug!("{:?}", event),
                _ => log::trace!("{:?}", event),
            }
        }
        events
    }

    /// Depth-ordered draw list for the current state
    pub fn build_draw_list(&self) -> DrawList {
        build_draw_list(&self.state, &self.projector)
    }

    /// Full frame: tick, HUD notification, draw list
    pub fn frame(&mut self, input: &TickInput, elapsed_secs: f64, sink: &mut dyn UiSink) -> DrawList {
        self.elapsed_secs += elapsed_secs.max(0.0);
        self.frames += 1;
        self.tick(input);
        self.hud.update(&self.state, sink);
        self.build_draw_list()
    }

    pub fn hud(&self) -> HudStatus {
        HudStatus::from_state(&self.state)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, InputEvent, VehicleKind};
    use crate::ui::FlagStatus;

    #[test]
    fn test_frame_runs_tick_and_builds_list() {
        let mut session = Session::new(WorldConfig::default());
        let mut sink: Vec<HudStatus> = Vec::new();
        let select = TickInput {
            events: vec![InputEvent::SelectVehicle(VehicleKind::Tank)],
            ..Default::default()
        };
        let list = session.frame(&select, 1.0 / 60.0, &mut sink);
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert!(!list.is_empty());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].flag, FlagStatus::Hidden);

        session.frame(&TickInput::default(), 1.0 / 60.0, &mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(session.frames(), 2);
    }

    #[test]
    fn test_sink_sees_destruction_count() {
        let mut session = Session::new(WorldConfig::default());
        let mut sink: Vec<HudStatus> = Vec::new();
        let select = TickInput {
            events: vec![InputEvent::SelectVehicle(VehicleKind::Hummer)],
            ..Default::default()
        };
        session.frame(&select, 0.016, &mut sink);

        // Park a shell on the first building until it falls
        let target = session.state.entities.buildings[0].pos;
        for _ in 0..3 {
            session.state.entities.projectiles.push(crate::sim::Projectile {
                pos: target,
                vel: glam::Vec2::ZERO,
                life_ticks: 10,
                damage: 1,
                airborne: false,
            });
            session.frame(&TickInput::default(), 0.016, &mut sink);
        }
        assert_eq!(sink.last().unwrap().destroyed_buildings, 1);
        assert_eq!(session.hud().destroyed_buildings, 1);
    }

    #[test]
    fn test_tick_returns_drained_events() {
        let mut session = Session::new(WorldConfig::default());
        let events = session.tick(&TickInput {
            events: vec![InputEvent::SelectVehicle(VehicleKind::Helicopter)],
            ..Default::default()
        });
        assert_eq!(events, vec![GameEvent::VehicleSelected(VehicleKind::Helicopter)]);
        assert!(session.state.events.is_empty());
    }
}
