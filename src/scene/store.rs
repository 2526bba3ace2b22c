//! Scene store: the sphere list and the rotation angle

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::rasterizer::{Color, Mat4, Sphere, Vec3};

/// Angular rate of the scene rotation, radians per second (45 deg/s)
pub const ROTATION_SPEED: f64 = std::f64::consts::FRAC_PI_4;

pub const DEFAULT_SPHERE_COUNT: usize = 2000;
pub const DEFAULT_SEED: u64 = 1337;

const POSITION_RANGE: std::ops::Range<f32> = -10.0..10.0;
const RADIUS_RANGE: std::ops::Range<f32> = 0.1..0.3;
const CHANNEL_RANGE: std::ops::RangeInclusive<u8> = 102..=255;

/// Spheres plus the animation state
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    /// Rotation about +y in radians, unbounded
    pub angle: f64,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres, angle: 0.0 }
    }

    /// Generate `count` random spheres, reproducible for a given seed
    ///
    /// ChaCha8 keeps the same stream across rand releases, so a seed names
    /// one scene.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let spheres = (0..count)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(POSITION_RANGE),
                    rng.gen_range(POSITION_RANGE),
                    rng.gen_range(POSITION_RANGE),
                );
                let radius = rng.gen_range(RADIUS_RANGE);
                let color = Color::pack(
                    rng.gen_range(CHANNEL_RANGE),
                    rng.gen_range(CHANNEL_RANGE),
                    rng.gen_range(CHANNEL_RANGE),
                );
                Sphere::new(center, radius, color)
            })
            .collect();
        Self::new(spheres)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Advance the rotation by `ROTATION_SPEED * elapsed_secs`
    pub fn advance(&mut self, elapsed_secs: f64) {
        self.angle += ROTATION_SPEED * elapsed_secs;
    }

    pub fn model_to_world(&self) -> Mat4 {
        Mat4::rotation_y(self.angle as f32)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::generate(DEFAULT_SPHERE_COUNT, DEFAULT_SEED)
    }
}
