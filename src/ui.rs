//! HUD status
//!
//! The simulation knows nothing about widgets; the session derives a
//! [`HudStatus`] after each tick and pushes it to a [`UiSink`] when it changes.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Where the flag stands, as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagStatus {
    Hidden,
    Located,
    Captured,
    MissionComplete,
}

impl FlagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagStatus::Hidden => "Hidden",
            FlagStatus::Located => "Located - Press E to capture",
            FlagStatus::Captured => "CAPTURED - Return to base!",
            FlagStatus::MissionComplete => "MISSION COMPLETE!",
        }
    }
}

/// Everything the status bar displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudStatus {
    pub destroyed_buildings: u32,
    pub flag: FlagStatus,
}

impl HudStatus {
    pub fn from_state(state: &GameState) -> Self {
        let m = &state.mission;
        let flag = if m.mission_won || state.phase == GamePhase::Won {
            FlagStatus::MissionComplete
        } else if m.flag_captured {
            FlagStatus::Captured
        } else if m.flag_revealed {
            FlagStatus::Located
        } else {
            FlagStatus::Hidden
        };
        Self {
            destroyed_buildings: m.destroyed_buildings,
            flag,
        }
    }
}

/// Receiver of HUD updates
pub trait UiSink {
    fn status_changed(&mut self, status: &HudStatus);
}

/// Sink that drops every update
impl UiSink for () {
    fn status_changed(&mut self, _status: &HudStatus) {}
}

/// Sink that records every update (handy for hosts that poll)
impl UiSink for Vec<HudStatus> {
    fn status_changed(&mut self, status: &HudStatus) {
        self.push(*status);
    }
}

/// Remembers the last published status and forwards only changes
#[derive(Debug, Clone, Default)]
pub struct HudTracker {
    last: Option<HudStatus>,
}

impl HudTracker {
    /// Publish `state`'s status if it differs from the last one; returns true if sent
    pub fn update(&mut self, state: &GameState, sink: &mut dyn UiSink) -> bool {
        let status = HudStatus::from_state(state);
        if self.last == Some(status) {
            return false;
        }
        self.last = Some(status);
        sink.status_changed(&status);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorldConfig;

    #[test]
    fn test_flag_status_progression() {
        let mut state = GameState::new(WorldConfig::default());
        assert_eq!(HudStatus::from_state(&state).flag, FlagStatus::Hidden);
        state.mission.reveal_flag();
        assert_eq!(HudStatus::from_state(&state).flag, FlagStatus::Located);
        state.mission.capture_flag();
        assert_eq!(HudStatus::from_state(&state).flag, FlagStatus::Captured);
        state.mission.win();
        assert_eq!(HudStatus::from_state(&state).flag, FlagStatus::MissionComplete);
    }

    #[test]
    fn test_tracker_only_forwards_changes() {
        let mut state = GameState::new(WorldConfig::default());
        let mut tracker = HudTracker::default();
        let mut sink: Vec<HudStatus> = Vec::new();
        assert!(tracker.update(&state, &mut sink));
        assert!(!tracker.update(&state, &mut sink));
        state.mission.record_destruction();
        assert!(tracker.update(&state, &mut sink));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].destroyed_buildings, 1);
    }
}
