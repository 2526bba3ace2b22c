//! Software sphere rasterizer
//!
//! Projects sphere centers through a look-at camera and fills each one as a
//! flat screen-space disc:
//! - Approximate sizing from clip-space w (optional silhouette sizing)
//! - Painter's order, no depth buffer
//! - No shading

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Screen dimensions
pub const WIDTH: usize = 1280;
pub const HEIGHT: usize = 720;
