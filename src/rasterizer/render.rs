//! Core rendering functions
//! Sphere projection and flat disc fill

use std::path::Path;

use super::math::{Mat4, Vec4};
use super::types::{Camera, Color, RasterSettings, SizingMode, Sphere};

/// Clip-space w at or below this is treated as behind the eye
const MIN_CLIP_W: f32 = 1e-6;

/// Framebuffer for software rendering
///
/// Screen row `y` (origin at the bottom, y up) is stored at row `height - 1 - y`.
pub struct Framebuffer {
    pub pixels: Vec<Color>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Expand packed colors into RGBA8 bytes for texture upload
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for color in &self.pixels {
            out.extend_from_slice(&color.to_bytes());
        }
    }

    /// Save the current frame as an RGB PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            rgb.extend_from_slice(&[color.r(), color.g(), color.b()]);
        }
        image::save_buffer(
            path,
            &rgb,
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgb8,
        )
    }

    /// Fill a disc centered on screen coordinates (cx, cy), y up
    ///
    /// Candidate pixels span the square `[c - size, c + size]`; a pixel is written
    /// when its distance to the center is at most `size`. Pixels outside the
    /// buffer are skipped. A negative or NaN size draws nothing.
    pub fn fill_disc(&mut self, cx: i32, cy: i32, size: f32, color: Color) {
        if !(size >= 0.0) || self.width == 0 || self.height == 0 {
            return;
        }

        let (cxf, cyf) = (cx as f32, cy as f32);
        let x_lo = ((cxf - size) as i32).max(0);
        let x_hi = ((cxf + size).floor() as i32).min(self.width as i32 - 1);
        let y_lo = ((cyf - size) as i32).max(0);
        let y_hi = ((cyf + size).floor() as i32).min(self.height as i32 - 1);
        let limit = size as f64;

        for x in x_lo..=x_hi {
            let dx = (x as i64 - cx as i64) as f64;
            for y in y_lo..=y_hi {
                let dy = (y as i64 - cy as i64) as f64;
                if (dx * dx + dy * dy).sqrt() > limit {
                    continue;
                }
                let row = self.height - 1 - y as usize;
                self.pixels[row * self.width + x as usize] = color;
            }
        }
    }
}

/// The per-frame transform chain
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub model2eye: Mat4,
    pub model2clip: Mat4,
    /// cot(fov/2), the projection's vertical scale
    pub focal_y: f32,
}

impl FrameTransforms {
    pub fn new(camera: &Camera, model2world: Mat4, width: usize, height: usize) -> Self {
        let world2eye = Mat4::look_at_rh(camera.eye, camera.target, Camera::UP);
        let aspect = (width as f64 / height as f64) as f32;
        let eye2clip = Mat4::perspective_fov_rh(camera.fov_y, aspect, Camera::NEAR, Camera::FAR);

        let half = 0.5 * camera.fov_y;
        Self {
            model2eye: model2world * world2eye,
            model2clip: model2world * world2eye * eye2clip,
            focal_y: half.cos() / half.sin(),
        }
    }
}

/// A sphere mapped to screen space, ready for filling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSphere {
    pub screen_x: i32,
    pub screen_y: i32,
    /// On-screen radius in pixels
    pub size: f32,
}

/// Project a sphere center to screen space and size its disc
///
/// Returns None when the sphere cannot be placed on screen this frame.
pub fn project_sphere(
    sphere: &Sphere,
    transforms: &FrameTransforms,
    settings: &RasterSettings,
    width: usize,
    height: usize,
) -> Option<ProjectedSphere> {
    let clip = transforms.model2clip.transform(sphere.position);
    let w = clip.w;

    // w == 0 makes the fill unbounded regardless of culling
    if w == 0.0 || !w.is_finite() {
        return None;
    }
    if settings.cull_behind_camera && w <= MIN_CLIP_W {
        return None;
    }

    let ndc: Vec4 = clip.perspective_divide();
    let screen_x = ((ndc.x as f64 * 0.5 + 0.5) * width as f64) as i32;
    let screen_y = ((ndc.y as f64 * 0.5 + 0.5) * height as f64) as i32;

    let size = match settings.sizing {
        SizingMode::Approximate => sphere.radius / w * width as f32,
        SizingMode::Silhouette => {
            let center = transforms.model2eye.transform(sphere.position).xyz();
            let d_sq = center.dot(center);
            let r_sq = sphere.radius * sphere.radius;
            if d_sq <= r_sq {
                return None;
            }
            let tan_half_angle = sphere.radius / (d_sq - r_sq).sqrt();
            tan_half_angle * transforms.focal_y * height as f32 * 0.5
        }
    };

    Some(ProjectedSphere { screen_x, screen_y, size })
}

/// Render spheres into the framebuffer in list order (later spheres win)
pub fn render_spheres(
    fb: &mut Framebuffer,
    spheres: &[Sphere],
    camera: &Camera,
    model2world: Mat4,
    settings: &RasterSettings,
) {
    let transforms = FrameTransforms::new(camera, model2world, fb.width, fb.height);

    fb.clear(Color::BLACK);

    for sphere in spheres {
        if let Some(p) = project_sphere(sphere, &transforms, settings, fb.width, fb.height) {
            fb.fill_disc(p.screen_x, p.screen_y, p.size, sphere.color);
        }
    }
}
