use std::ops::{Index, Mul};

use super::Vec3;
use crate::error::{CoreError, CoreResult};

/// 4x4 `f32` matrix, column-major, column vectors on the right.
///
/// Translation lives in cells 12, 13, 14; cell 15 is the homogeneous 1.
/// Every builder returns a fresh matrix and leaves `self` untouched, so
/// values are safe to cache and share.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    cells: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cells: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn from_cols_array(cells: [f32; 16]) -> Self {
        Self { cells }
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.cells
    }

    /// Column arrays, the shape uniform structs expect.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let c = &self.cells;
        [
            [c[0], c[1], c[2], c[3]],
            [c[4], c[5], c[6], c[7]],
            [c[8], c[9], c[10], c[11]],
            [c[12], c[13], c[14], c[15]],
        ]
    }

    /// `self · T(x, y, z)`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::IDENTITY;
        t.cells[12] = x;
        t.cells[13] = y;
        t.cells[14] = z;
        self.multiply(&t)
    }

    /// `self · Rx(angle)`. Cells: c@5, -s@6, s@9, c@10.
    pub fn rotate_x(&self, angle: f32) -> Self {
        if angle == 0.0 {
            return *self;
        }
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.cells[5] = c;
        r.cells[6] = -s;
        r.cells[9] = s;
        r.cells[10] = c;
        self.multiply(&r)
    }

    /// `self · Ry(angle)`. Cells: c@0, s@2, -s@8, c@10.
    pub fn rotate_y(&self, angle: f32) -> Self {
        if angle == 0.0 {
            return *self;
        }
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.cells[0] = c;
        r.cells[2] = s;
        r.cells[8] = -s;
        r.cells[10] = c;
        self.multiply(&r)
    }

    /// `self · Rz(angle)`. Cells: c@0, -s@1, s@4, c@5.
    pub fn rotate_z(&self, angle: f32) -> Self {
        if angle == 0.0 {
            return *self;
        }
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.cells[0] = c;
        r.cells[1] = -s;
        r.cells[4] = s;
        r.cells[5] = c;
        self.multiply(&r)
    }

    /// `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let a = &self.cells;
        let b = &rhs.cells;
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }
        Self { cells: out }
    }

    /// Symmetric-frustum perspective projection, OpenGL clip depth (z in [-1, 1]).
    ///
    /// `near == far` yields a degenerate matrix; callers must not pass it.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let mut m = Self::IDENTITY;
        m.cells[0] = f / aspect;
        m.cells[5] = f;
        m.cells[10] = (far + near) / (near - far);
        m.cells[11] = -1.0;
        m.cells[14] = (2.0 * far * near) / (near - far);
        m.cells[15] = 0.0;
        m
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = self.cells[col * 4 + row];
            }
        }
        Self { cells: out }
    }

    pub fn determinant(&self) -> f32 {
        let m = Minors::of(&self.cells);
        m.determinant()
    }

    /// Adjugate inverse. Fails with [`CoreError::SingularMatrix`] when the
    /// determinant is exactly zero.
    pub fn invert(&self) -> CoreResult<Self> {
        let a = &self.cells;
        let m = Minors::of(a);
        let det = m.determinant();
        if det == 0.0 {
            return Err(CoreError::SingularMatrix);
        }
        let inv = 1.0 / det;
        let Minors {
            b00,
            b01,
            b02,
            b03,
            b04,
            b05,
            b06,
            b07,
            b08,
            b09,
            b10,
            b11,
        } = m;
        let [
            a00, a01, a02, a03, //
            a10, a11, a12, a13, //
            a20, a21, a22, a23, //
            a30, a31, a32, a33,
        ] = *a;

        Ok(Self {
            cells: [
                (a11 * b11 - a12 * b10 + a13 * b09) * inv,
                (a02 * b10 - a01 * b11 - a03 * b09) * inv,
                (a31 * b05 - a32 * b04 + a33 * b03) * inv,
                (a22 * b04 - a21 * b05 - a23 * b03) * inv,
                (a12 * b08 - a10 * b11 - a13 * b07) * inv,
                (a00 * b11 - a02 * b08 + a03 * b07) * inv,
                (a32 * b02 - a30 * b05 - a33 * b01) * inv,
                (a20 * b05 - a22 * b02 + a23 * b01) * inv,
                (a10 * b10 - a11 * b08 + a13 * b06) * inv,
                (a01 * b08 - a00 * b10 - a03 * b06) * inv,
                (a30 * b04 - a31 * b02 + a33 * b00) * inv,
                (a21 * b02 - a20 * b04 - a23 * b00) * inv,
                (a11 * b07 - a10 * b09 - a12 * b06) * inv,
                (a00 * b09 - a01 * b07 + a02 * b06) * inv,
                (a31 * b01 - a30 * b03 - a32 * b00) * inv,
                (a20 * b03 - a21 * b01 + a22 * b00) * inv,
            ],
        })
    }

    /// Applies `self` to `(p, 1)` and drops w. Affine matrices only: no
    /// homogeneous divide happens, so projective input gives wrong results.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cells;
        Vec3::new(
            c[0] * p.x + c[4] * p.y + c[8] * p.z + c[12],
            c[1] * p.x + c[5] * p.y + c[9] * p.z + c[13],
            c[2] * p.x + c[6] * p.y + c[10] * p.z + c[14],
        )
    }

    /// Cell-wise comparison within `eps`.
    pub fn abs_diff_eq(&self, other: &Self, eps: f32) -> bool {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn is_finite(&self) -> bool {
        self.cells.iter().all(|c| c.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.cells[i]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl From<Mat4> for glam::Mat4 {
    fn from(m: Mat4) -> Self {
        glam::Mat4::from_cols_array(&m.cells)
    }
}

impl From<glam::Mat4> for Mat4 {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols_array(m.to_cols_array())
    }
}

/// 2x2 sub-determinants shared by the determinant and the adjugate.
struct Minors {
    b00: f32,
    b01: f32,
    b02: f32,
    b03: f32,
    b04: f32,
    b05: f32,
    b06: f32,
    b07: f32,
    b08: f32,
    b09: f32,
    b10: f32,
    b11: f32,
}

impl Minors {
    fn of(a: &[f32; 16]) -> Self {
        let [
            a00, a01, a02, a03, //
            a10, a11, a12, a13, //
            a20, a21, a22, a23, //
            a30, a31, a32, a33,
        ] = *a;
        Self {
            b00: a00 * a11 - a01 * a10,
            b01: a00 * a12 - a02 * a10,
            b02: a00 * a13 - a03 * a10,
            b03: a01 * a12 - a02 * a11,
            b04: a01 * a13 - a03 * a11,
            b05: a02 * a13 - a03 * a12,
            b06: a20 * a31 - a21 * a30,
            b07: a20 * a32 - a22 * a30,
            b08: a20 * a33 - a23 * a30,
            b09: a21 * a32 - a22 * a31,
            b10: a21 * a33 - a23 * a31,
            b11: a22 * a33 - a23 * a32,
        }
    }

    fn determinant(&self) -> f32 {
        self.b00 * self.b11 - self.b01 * self.b10
            + self.b02 * self.b09
            + self.b03 * self.b08
            - self.b04 * self.b07
            + self.b05 * self.b06
    }
}
