//! Render-list module
//!
//! Projects the simulation into isometric screen space and orders it for a
//! painter's-algorithm renderer. Drawing pixels is left to the host.

pub mod draw_list;
pub mod projection;

pub use draw_list::{DrawCommand, DrawKind, DrawList, build_draw_list};
pub use projection::IsoProjector;
