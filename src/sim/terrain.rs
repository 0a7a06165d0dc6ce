//! Procedural archipelago terrain
//!
//! The grid is a pure function of its dimensions: a central island shaped by a
//! low-frequency sinusoid plus four square base islands. Classification and
//! elevation derive from the same land predicate so coastlines never seam.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HOVER_THRESHOLD;

/// Terrain classification of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Water,
    Sand,
    Grass,
}

impl TerrainKind {
    /// Whether ground vehicles may drive on this terrain
    pub fn is_ground(&self) -> bool {
        matches!(self, TerrainKind::Sand | TerrainKind::Grass)
    }
}

/// One terrain cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub grid_x: i32,
    pub grid_y: i32,
    pub kind: TerrainKind,
    pub elevation: f32,
}

/// Elevation of coastal sand
pub const SAND_ELEVATION: f32 = 0.1;
/// Minimum elevation of interior grass
pub const GRASS_BASE_ELEVATION: f32 = 0.25;
/// Extra height of interior hills at noise peaks
pub const HILL_AMPLITUDE: f32 = 0.5;

/// Shape parameters for the land predicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    pub center: Vec2,
    /// Unperturbed radius of the central island
    pub island_radius: f32,
    /// How far the coastline wobbles in or out
    pub noise_amplitude: f32,
    pub noise_frequency: f32,
    /// Half-width of each square base island
    pub base_half_extent: f32,
    pub base_centers: [Vec2; 4],
}

impl TerrainParams {
    /// Parameters scaled to the grid; 40×40 gives the classic layout
    pub fn for_size(width: usize, height: usize) -> Self {
        let w = width as f32;
        let h = height as f32;
        Self {
            center: Vec2::new(w / 2.0, h / 2.0),
            island_radius: w.min(h) * 0.3,
            noise_amplitude: 3.0,
            noise_frequency: 0.3,
            base_half_extent: w.min(h) / 8.0,
            base_centers: [
                Vec2::new(w * 0.25, h * 0.25),
                Vec2::new(w * 0.75, h * 0.25),
                Vec2::new(w * 0.25, h * 0.75),
                Vec2::new(w * 0.75, h * 0.75),
            ],
        }
    }

    /// Coastline perturbation at a cell
    fn coast_noise(&self, x: f32, y: f32) -> f32 {
        (x * self.noise_frequency).sin() * (y * self.noise_frequency).cos()
    }

    /// Hill noise in [0, 1] for interior elevation
    fn hill_noise(&self, x: f32, y: f32) -> f32 {
        let n = (x * 0.45 + 1.3).sin() * (y * 0.35 - 0.7).cos();
        n * 0.5 + 0.5
    }

    /// Land predicate, defined for any integer cell including out-of-grid ones
    pub fn is_land(&self, x: i32, y: i32) -> bool {
        let (fx, fy) = (x as f32, y as f32);
        let dist = Vec2::new(fx, fy).distance(self.center);
        if dist < self.island_radius + self.coast_noise(fx, fy) * self.noise_amplitude {
            return true;
        }
        self.base_centers.iter().any(|c| {
            (fx - c.x).abs() < self.base_half_extent && (fy - c.y).abs() < self.base_half_extent
        })
    }

    fn is_coastal(&self, x: i32, y: i32) -> bool {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .any(|(dx, dy)| !self.is_land(x + dx, y + dy))
    }

    fn classify(&self, x: i32, y: i32) -> Tile {
        let (kind, elevation) = if !self.is_land(x, y) {
            (TerrainKind::Water, 0.0)
        } else if self.is_coastal(x, y) {
            (TerrainKind::Sand, SAND_ELEVATION)
        } else {
            (
                TerrainKind::Grass,
                GRASS_BASE_ELEVATION + self.hill_noise(x as f32, y as f32) * HILL_AMPLITUDE,
            )
        };
        Tile {
            grid_x: x,
            grid_y: y,
            kind,
            elevation,
        }
    }
}

/// Immutable terrain grid, row-major (index = y * width + x)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    /// Generate the archipelago for the given dimensions
    pub fn generate(width: usize, height: usize) -> Self {
        let params = TerrainParams::for_size(width, height);
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(params.classify(x, y));
            }
        }
        log::debug!("Generated {}x{} terrain", width, height);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at integer grid coordinates
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width + x as usize)
    }

    /// Tile containing a continuous coordinate
    pub fn tile_at(&self, pos: Vec2) -> Option<&Tile> {
        self.tile(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Row of tiles (for windowed iteration)
    pub fn row(&self, y: usize) -> &[Tile] {
        let start = y * self.width;
        &self.tiles[start..start + self.width]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Elevation under a continuous coordinate (0 outside the grid)
    pub fn elevation_at(&self, pos: Vec2) -> f32 {
        self.tile_at(pos).map(|t| t.elevation).unwrap_or(0.0)
    }

    /// Whether a vehicle may occupy `pos`
    ///
    /// `altitude` is only consulted for flight-capable vehicles; water is open
    /// to them once they are above the hover threshold.
    pub fn is_traversable(&self, pos: Vec2, can_fly: bool, altitude: f32) -> bool {
        match self.tile_at(pos) {
            None => false,
            Some(tile) if tile.kind.is_ground() => true,
            Some(_) => can_fly && altitude > HOVER_THRESHOLD,
        }
    }

    /// Ground-only walkability (used for ground-fired projectiles and placement)
    pub fn is_ground(&self, pos: Vec2) -> bool {
        self.is_traversable(pos, false, 0.0)
    }

    /// Count of tiles per kind, (water, sand, grass)
    pub fn census(&self) -> (usize, usize, usize) {
        self.tiles.iter().fold((0, 0, 0), |(w, s, g), t| match t.kind {
            TerrainKind::Water => (w + 1, s, g),
            TerrainKind::Sand => (w, s + 1, g),
            TerrainKind::Grass => (w, s, g + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = TerrainGrid::generate(40, 40);
        let b = TerrainGrid::generate(40, 40);
        assert_eq!(a, b);
        for (ta, tb) in a.tiles().zip(b.tiles()) {
            assert_eq!(ta.elevation.to_bits(), tb.elevation.to_bits());
        }
    }

    #[test]
    fn test_center_and_bases_are_land() {
        let grid = TerrainGrid::generate(40, 40);
        for (x, y) in [(20, 20), (10, 10), (30, 10), (10, 30), (30, 30)] {
            assert!(grid.tile(x, y).unwrap().kind.is_ground(), "({x},{y})");
        }
        // Corners are open sea
        assert_eq!(grid.tile(0, 0).unwrap().kind, TerrainKind::Water);
        assert_eq!(grid.tile(39, 39).unwrap().kind, TerrainKind::Water);
    }

    #[test]
    fn test_sand_borders_water() {
        let grid = TerrainGrid::generate(40, 40);
        for tile in grid.tiles() {
            let near_water = (-1..=1).any(|dy| {
                (-1..=1).any(|dx| {
                    grid.tile(tile.grid_x + dx, tile.grid_y + dy)
                        .map(|t| t.kind == TerrainKind::Water)
                        .unwrap_or(false)
                })
            });
            match tile.kind {
                TerrainKind::Grass => assert!(!near_water),
                TerrainKind::Water => assert_eq!(tile.elevation, 0.0),
                TerrainKind::Sand => assert_eq!(tile.elevation, SAND_ELEVATION),
            }
        }
        let (water, sand, grass) = grid.census();
        assert!(water > 0 && sand > 0 && grass > 0);
    }

    #[test]
    fn test_grass_elevation_above_base() {
        let grid = TerrainGrid::generate(40, 40);
        for tile in grid.tiles().filter(|t| t.kind == TerrainKind::Grass) {
            assert!(tile.elevation >= GRASS_BASE_ELEVATION);
            assert!(tile.elevation <= GRASS_BASE_ELEVATION + HILL_AMPLITUDE);
        }
    }

    #[test]
    fn test_out_of_bounds_defaults() {
        let grid = TerrainGrid::generate(40, 40);
        assert!(grid.tile(-1, 5).is_none());
        assert_eq!(grid.elevation_at(Vec2::new(-3.0, 50.0)), 0.0);
        assert!(!grid.is_traversable(Vec2::new(40.5, 20.0), true, 3.0));
        assert!(!grid.is_traversable(Vec2::new(-0.1, 20.0), false, 0.0));
    }

    #[test]
    fn test_water_only_open_to_airborne_flyers() {
        let grid = TerrainGrid::generate(40, 40);
        let sea = Vec2::new(0.5, 0.5);
        assert!(!grid.is_traversable(sea, false, 0.0));
        assert!(!grid.is_traversable(sea, false, 3.0));
        assert!(!grid.is_traversable(sea, true, HOVER_THRESHOLD));
        assert!(grid.is_traversable(sea, true, HOVER_THRESHOLD + 0.1));
        let land = Vec2::new(20.5, 20.5);
        assert!(grid.is_traversable(land, false, 0.0));
    }
}
