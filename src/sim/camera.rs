//! Camera that follows the player and bounds the visible tile window

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Inclusive-exclusive tile window `[x0, x1) × [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl TileWindow {
    /// Whether a continuous position falls inside the window
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x0 as f32 && pos.x < self.x1 as f32 && pos.y >= self.y0 as f32 && pos.y < self.y1 as f32
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub center: Vec2,
    /// Tiles visible in each direction from the center
    pub view_range: f32,
}

impl Camera {
    pub fn new(center: Vec2, view_range: f32) -> Self {
        Self { center, view_range }
    }

    pub fn follow(&mut self, target: Vec2) {
        self.center = target;
    }

    /// Visible tiles, clipped to a `width × height` grid
    pub fn window(&self, width: usize, height: usize) -> TileWindow {
        let clip = |v: f32, max: usize| (v.max(0.0) as usize).min(max);
        TileWindow {
            x0: clip((self.center.x - self.view_range).floor(), width),
            x1: clip((self.center.x + self.view_range).ceil(), width),
            y0: clip((self.center.y - self.view_range).floor(), height),
            y1: clip((self.center.y + self.view_range).ceil(), height),
        }
    }
}
