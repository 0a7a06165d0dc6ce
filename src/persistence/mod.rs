//! Session snapshots
//!
//! A snapshot is a versioned JSON envelope around the serializable part of
//! [`GameState`]. Particles and pending events are cosmetic/transient and are
//! not persisted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::GameState;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    version: u32,
    tick: u64,
    state: S,
}

/// Encode a state as a snapshot string
pub fn encode(state: &GameState) -> Result<String, PersistenceError> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        tick: state.time_ticks,
        state,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a snapshot string, rejecting unknown versions
pub fn decode(json: &str) -> Result<GameState, PersistenceError> {
    #[derive(Deserialize)]
    struct Header {
        version: u32,
    }
    let header: Header = serde_json::from_str(json)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    let envelope: Envelope<GameState> = serde_json::from_str(json)?;
    Ok(envelope.state)
}

/// Write a snapshot to `path`, replacing it atomically via a temp file
pub fn save_snapshot(state: &GameState, path: &Path) -> Result<(), PersistenceError> {
    let json = encode(state)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    log::info!("Snapshot saved at tick {}", state.time_ticks);
    Ok(())
}

/// Read a snapshot from `path`
pub fn load_snapshot(path: &Path) -> Result<GameState, PersistenceError> {
    let json = std::fs::read_to_string(path)?;
    let state = decode(&json)?;
    log::info!("Snapshot loaded at tick {}", state.time_ticks);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, InputEvent, TickInput, VehicleKind, WorldConfig, tick};

    fn played_state() -> GameState {
        let mut state = GameState::new(WorldConfig::default());
        tick(
            &mut state,
            &TickInput {
                events: vec![InputEvent::SelectVehicle(VehicleKind::Tank)],
                ..Default::default()
            },
        );
        for _ in 0..10 {
            tick(
                &mut state,
                &TickInput {
                    events: vec![InputEvent::FireWeapon],
                    ..Default::default()
                },
            );
        }
        state
    }

    #[test]
    fn test_snapshot_restores_gameplay_state() {
        let state = played_state();
        let restored = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(restored.phase, GamePhase::Playing);
        assert_eq!(restored.time_ticks, state.time_ticks);
        assert_eq!(restored.terrain, state.terrain);
        assert_eq!(restored.entities.projectiles.len(), state.entities.projectiles.len());
        assert_eq!(restored.player.unwrap().pos, state.player.unwrap().pos);
        assert!(restored.entities.particles.is_empty());
    }

    #[test]
    fn test_restored_state_continues_identically() {
        let mut original = played_state();
        let mut restored = decode(&encode(&original).unwrap()).unwrap();
        let input = TickInput {
            events: vec![InputEvent::FireWeapon],
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut original, &input);
            tick(&mut restored, &input);
        }
        assert_eq!(original.rng_state.draws, restored.rng_state.draws);
        assert_eq!(original.entities.projectiles.len(), restored.entities.projectiles.len());
    }

    #[test]
    fn test_rejects_future_version() {
        let err = decode(r#"{"version": 99, "tick": 0, "state": null}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("return_fire_snapshot_{}.json", std::process::id()));
        let state = played_state();
        save_snapshot(&state, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.time_ticks, state.time_ticks);
    }
}
