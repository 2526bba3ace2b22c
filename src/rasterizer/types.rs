//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::{Vec3, Vec4};

/// Packed 24-bit color: `b << 16 | g << 8 | r`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0);

    pub const fn pack(r: u8, g: u8, b: u8) -> Self {
        Color((b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8 & 0xff) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 16 & 0xff) as u8
    }

    /// Convert to [u8; 4] for texture upload (opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), 255]
    }
}

/// A sphere primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in model space, w = 1
    pub position: Vec4,
    pub radius: f32,
    pub color: Color,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Color) -> Self {
        Self {
            position: Vec4::point(center),
            radius,
            color,
        }
    }
}

/// Look-at camera with a fixed +y up vector
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
}

impl Camera {
    pub const UP: Vec3 = Vec3::UP;
    pub const NEAR: f32 = 1.0;
    pub const FAR: f32 = 100.0;

    pub fn new(eye: Vec3, target: Vec3, fov_y: f32) -> Self {
        Self { eye, target, fov_y }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 40.0),
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_4,
        )
    }
}

/// How a sphere's on-screen radius is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizingMode {
    /// `radius / w * WIDTH`, ignores perspective foreshortening of the silhouette
    #[default]
    Approximate,
    /// Radius of the projected silhouette of a sphere seen on the view axis
    Silhouette,
}

impl SizingMode {
    pub fn toggled(self) -> Self {
        match self {
            SizingMode::Approximate => SizingMode::Silhouette,
            SizingMode::Silhouette => SizingMode::Approximate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizingMode::Approximate => "approximate",
            SizingMode::Silhouette => "silhouette",
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSettings {
    pub sizing: SizingMode,
    /// Skip spheres whose clip-space w is not in front of the eye
    pub cull_behind_camera: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            sizing: SizingMode::Approximate,
            cull_behind_camera: true,
        }
    }
}
