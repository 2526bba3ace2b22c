//! Vector and matrix math for 3D projection
//!
//! Matrices use the row-vector convention: a point is transformed as `v * M`,
//! so `a * b` applies `a` first and `b` second.

use std::ops::{Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Homogeneous 4-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    /// Position with w = 1
    pub const fn point(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: 1.0 }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divide every component (w included) by w
    pub fn perspective_divide(self) -> Vec4 {
        Vec4 {
            x: self.x / self.w,
            y: self.y / self.w,
            z: self.z / self.w,
            w: self.w / self.w,
        }
    }
}

/// Row-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Transform a row vector: `v * self`
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            y: v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            z: v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            w: v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        }
    }

    /// Right-handed view matrix looking from `eye` toward `target`
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        // The camera looks down -z, so the z basis points back at the eye
        let r2 = (eye - target).normalize();
        let r0 = up.cross(r2).normalize();
        let r1 = r2.cross(r0);

        let neg_eye = eye.scale(-1.0);
        Mat4::from_rows([
            [r0.x, r1.x, r2.x, 0.0],
            [r0.y, r1.y, r2.y, 0.0],
            [r0.z, r1.z, r2.z, 0.0],
            [r0.dot(neg_eye), r1.dot(neg_eye), r2.dot(neg_eye), 1.0],
        ])
    }

    /// Right-handed perspective projection (clip w = -z_eye)
    pub fn perspective_fov_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half = 0.5 * fov_y;
        let h = half.cos() / half.sin();
        let w = h / aspect;
        let range = far / (near - far);

        Mat4::from_rows([
            [w, 0.0, 0.0, 0.0],
            [0.0, h, 0.0, 0.0],
            [0.0, 0.0, range, -1.0],
            [0.0, 0.0, range * near, 0.0],
        ])
    }

    /// Rotation about the +y axis
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Mat4::IDENTITY;
        r.m[0][0] = c;
        r.m[0][2] = -s;
        r.m[2][0] = s;
        r.m[2][2] = c;
        r
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[row][k] * other.m[k][col]).sum();
            }
        }
        Mat4 { m: out }
    }
}
