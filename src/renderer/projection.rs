//! Isometric projection
//!
//! World space is the tile grid (x right, y down the map). Screen space is
//! pixels with the camera's ground point at the viewport center; elevation
//! lifts a point straight up the screen.

use glam::Vec2;

use crate::sim::Camera;

/// Tile footprint and viewport in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjector {
    pub tile_width: f32,
    pub tile_height: f32,
    pub viewport: Vec2,
    /// Screen pixels per unit of elevation or altitude
    pub elevation_scale: f32,
}

impl Default for IsoProjector {
    fn default() -> Self {
        Self {
            tile_width: 64.0,
            tile_height: 32.0,
            viewport: Vec2::new(1200.0, 800.0),
            elevation_scale: 16.0,
        }
    }
}

impl IsoProjector {
    /// Isometric offset of a ground point relative to the world origin
    pub fn iso(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x - world.y) * self.tile_width / 2.0,
            (world.x + world.y) * self.tile_height / 2.0,
        )
    }

    /// Screen position of `world` raised by `elevation`
    pub fn project(&self, world: Vec2, elevation: f32, camera: &Camera) -> Vec2 {
        let offset = self.iso(world) - self.iso(camera.center);
        self.viewport / 2.0 + offset - Vec2::new(0.0, elevation * self.elevation_scale)
    }

    /// Ground point under a screen position (inverse of `project` at elevation 0)
    pub fn unproject(&self, screen: Vec2, camera: &Camera) -> Vec2 {
        let iso = screen - self.viewport / 2.0 + self.iso(camera.center);
        let a = iso.x * 2.0 / self.tile_width; // x - y
        let b = iso.y * 2.0 / self.tile_height; // x + y
        Vec2::new((a + b) / 2.0, (b - a) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_point_is_viewport_center() {
        let proj = IsoProjector::default();
        let cam = Camera::new(Vec2::new(12.0, 7.5), 15.0);
        assert_eq!(proj.project(cam.center, 0.0, &cam), Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_axes_map_to_diagonals() {
        let proj = IsoProjector::default();
        let cam = Camera::new(Vec2::ZERO, 15.0);
        let east = proj.project(Vec2::new(1.0, 0.0), 0.0, &cam);
        let south = proj.project(Vec2::new(0.0, 1.0), 0.0, &cam);
        assert_eq!(east, Vec2::new(632.0, 416.0));
        assert_eq!(south, Vec2::new(568.0, 416.0));
    }

    #[test]
    fn test_elevation_lifts_point() {
        let proj = IsoProjector::default();
        let cam = Camera::new(Vec2::new(5.0, 5.0), 15.0);
        let ground = proj.project(Vec2::new(6.0, 5.0), 0.0, &cam);
        let raised = proj.project(Vec2::new(6.0, 5.0), 2.0, &cam);
        assert_eq!(raised.x, ground.x);
        assert_eq!(ground.y - raised.y, 32.0);
    }

    #[test]
    fn test_unproject_inverts_ground_projection() {
        let proj = IsoProjector::default();
        let cam = Camera::new(Vec2::new(20.0, 18.0), 15.0);
        let world = Vec2::new(23.25, 14.5);
        let back = proj.unproject(proj.project(world, 0.0, &cam), &cam);
        assert!((back - world).length() < 1e-4);
    }
}
