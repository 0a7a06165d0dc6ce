//! Player vehicle integration
//!
//! Advances altitude, heading, velocity and position for one tick. Collision
//! with entities is left to the collision pass, which runs afterwards against
//! the committed position.

use glam::Vec2;

use super::state::Player;
use super::terrain::TerrainGrid;
use crate::consts::*;
use crate::{angle_of, heading};

/// Directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    /// Unnormalized movement intent in world axes (+y is "down")
    pub fn intent(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Ease altitude toward its target; over non-ground cells the target is held
/// at cruise height
fn ramp_altitude(player: &mut Player, terrain: &TerrainGrid) {
    if !player.profile().can_fly {
        player.altitude = 0.0;
        player.target_altitude = 0.0;
        return;
    }
    if !terrain.is_ground(player.pos) {
        player.target_altitude = player.target_altitude.max(MIN_CRUISE_ALTITUDE);
    }
    let gap = player.target_altitude - player.altitude;
    if gap.abs() < ALTITUDE_SNAP {
        player.altitude = player.target_altitude;
    } else {
        player.altitude += gap * ALTITUDE_EASE;
    }
    player.altitude = player.altitude.clamp(0.0, MAX_ALTITUDE);
}

/// Advance the player by one tick
pub fn integrate_player(player: &mut Player, held: HeldDirections, terrain: &TerrainGrid, bounds: Vec2) {
    let profile = player.profile();

    ramp_altitude(player, terrain);

    let intent = held.intent();
    if intent != Vec2::ZERO {
        player.facing = angle_of(intent);
        player.vel += heading(player.facing) * profile.base_acceleration;
    }

    player.vel *= profile.friction;

    let speed = player.vel.length();
    if speed > profile.max_speed {
        player.vel *= profile.max_speed / speed;
    }

    let candidate = player.pos + player.vel;
    if player.is_airborne() || terrain.is_traversable(candidate, profile.can_fly, player.altitude) {
        player.pos = candidate;
    } else {
        player.vel *= BLOCKED_BOUNCE;
    }

    player.pos = player.pos.clamp(Vec2::ZERO, bounds);
}

/// Change the target altitude by `delta` steps; ground vehicles ignore this
pub fn adjust_target_altitude(player: &mut Player, delta: f32, terrain: &TerrainGrid) {
    if !player.profile().can_fly {
        return;
    }
    let mut target = (player.target_altitude + delta).clamp(0.0, MAX_ALTITUDE);
    // Never settle onto water
    if !terrain.is_ground(player.pos) {
        target = target.max(MIN_CRUISE_ALTITUDE);
    }
    player.target_altitude = target;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vehicle::VehicleKind;
    use proptest::prelude::*;

    fn grid() -> TerrainGrid {
        TerrainGrid::generate(40, 40)
    }

    fn bounds() -> Vec2 {
        Vec2::new(39.0, 39.0)
    }

    /// First water cell east of the center along row 20
    fn coast_east(terrain: &TerrainGrid) -> i32 {
        (20..40)
            .find(|&x| !terrain.tile(x, 20).unwrap().kind.is_ground())
            .expect("central island has an eastern shore")
    }

    #[test]
    fn test_acceleration_sets_facing() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Hummer, Vec2::new(20.5, 20.5));
        let held = HeldDirections {
            down: true,
            right: true,
            ..Default::default()
        };
        integrate_player(&mut p, held, &terrain, bounds());
        assert!((p.facing - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert!(p.pos.x > 20.5 && p.pos.y > 20.5);
    }

    #[test]
    fn test_friction_coasts_after_release() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Hummer, Vec2::new(20.5, 20.5));
        p.vel = Vec2::new(0.1, 0.0);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        let friction = VehicleKind::Hummer.profile().friction;
        assert!((p.vel.x - 0.1 * friction).abs() < 1e-6);
        assert!(p.pos.x > 20.5);
    }

    #[test]
    fn test_speed_clamp_preserves_direction() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Tank, Vec2::new(20.5, 20.5));
        p.vel = Vec2::new(3.0, 4.0);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        let max = VehicleKind::Tank.profile().max_speed;
        assert!((p.vel.length() - max).abs() < 1e-5);
        assert!((p.vel.x / p.vel.y - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_ground_vehicle_bounces_off_coast() {
        let terrain = grid();
        let shore = coast_east(&terrain);
        // Parked on the last land cell, heading into the sea at max speed
        let start = Vec2::new(shore as f32 - 0.05, 20.5);
        let mut p = Player::new(VehicleKind::Hummer, start);
        let max = VehicleKind::Hummer.profile().max_speed;
        p.vel = Vec2::new(max, 0.0);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        assert_eq!(p.pos, start);
        let expected = max * VehicleKind::Hummer.profile().friction * BLOCKED_BOUNCE;
        assert!((p.vel.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_helicopter_crosses_water() {
        let terrain = grid();
        let shore = coast_east(&terrain);
        let start = Vec2::new(shore as f32 - 0.05, 20.5);
        let mut p = Player::new(VehicleKind::Helicopter, start);
        p.altitude = 2.0;
        p.target_altitude = 2.0;
        p.vel = Vec2::new(0.2, 0.0);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        assert!(p.pos.x > start.x);
        assert!(!terrain.is_ground(p.pos));
    }

    #[test]
    fn test_altitude_ramps_asymptotically() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Helicopter, Vec2::new(20.5, 20.5));
        adjust_target_altitude(&mut p, 2.0, &terrain);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        assert!((p.altitude - 0.2).abs() < 1e-5);
        for _ in 0..200 {
            integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        }
        assert_eq!(p.altitude, 2.0);
    }

    #[test]
    fn test_ground_vehicles_stay_grounded() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Tank, Vec2::new(20.5, 20.5));
        adjust_target_altitude(&mut p, 3.0, &terrain);
        integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
        assert_eq!(p.altitude, 0.0);
        assert_eq!(p.target_altitude, 0.0);
    }

    #[test]
    fn test_cannot_descend_onto_water() {
        let terrain = grid();
        let mut p = Player::new(VehicleKind::Helicopter, Vec2::new(1.5, 1.5));
        p.target_altitude = 2.0;
        adjust_target_altitude(&mut p, -3.0, &terrain);
        assert_eq!(p.target_altitude, MIN_CRUISE_ALTITUDE);
    }

    #[test]
    fn test_descending_helicopter_cannot_drift_onto_water() {
        let terrain = grid();
        let shore = coast_east(&terrain);
        let mut p = Player::new(VehicleKind::Helicopter, Vec2::new(shore as f32 - 0.5, 20.5));
        p.altitude = 2.0;
        p.target_altitude = 2.0;
        // Target drops to the ground while still over land
        adjust_target_altitude(&mut p, -1.0, &terrain);
        adjust_target_altitude(&mut p, -1.0, &terrain);
        assert_eq!(p.target_altitude, 0.0);

        let right = HeldDirections {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            integrate_player(&mut p, right, &terrain, bounds());
            assert!(terrain.is_ground(p.pos) || p.altitude > HOVER_THRESHOLD);
        }
        for _ in 0..100 {
            integrate_player(&mut p, HeldDirections::default(), &terrain, bounds());
            assert!(terrain.is_ground(p.pos) || p.altitude > HOVER_THRESHOLD);
        }
        // Passing the shore cell lifted the target back to cruise height
        assert!(p.target_altitude >= MIN_CRUISE_ALTITUDE);
    }

    fn held_strategy() -> impl Strategy<Value = HeldDirections> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(up, down, left, right)| {
            HeldDirections { up, down, left, right }
        })
    }

    proptest! {
        #[test]
        fn prop_ground_vehicle_never_enters_water(
            inputs in proptest::collection::vec(held_strategy(), 1..300),
            tank in any::<bool>(),
        ) {
            let terrain = grid();
            let kind = if tank { VehicleKind::Tank } else { VehicleKind::Hummer };
            let mut p = Player::new(kind, Vec2::new(20.0, 20.0));
            for held in inputs {
                integrate_player(&mut p, held, &terrain, bounds());
                prop_assert!(terrain.is_ground(p.pos));
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 39.0);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= 39.0);
                prop_assert_eq!(p.altitude, 0.0);
            }
        }

        #[test]
        fn prop_helicopter_stays_in_bounds(
            inputs in proptest::collection::vec((held_strategy(), -1i8..=1), 1..400),
        ) {
            let terrain = grid();
            let mut p = Player::new(VehicleKind::Helicopter, Vec2::new(20.0, 20.0));
            for (held, climb) in inputs {
                adjust_target_altitude(&mut p, climb as f32, &terrain);
                integrate_player(&mut p, held, &terrain, bounds());
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 39.0);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= 39.0);
                prop_assert!(p.altitude >= 0.0 && p.altitude <= MAX_ALTITUDE);
                prop_assert!(terrain.is_ground(p.pos) || p.altitude > HOVER_THRESHOLD);
            }
        }
    }
}
