use std::ops::Index;

use super::{Mat4, Vec3};
use crate::error::{CoreError, CoreResult};

/// 3x3 `f32` matrix, column-major. Used for the upper-left block of a
/// [`Mat4`] when transforming normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    cells: [f32; 9],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cells: [
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn from_cols_array(cells: [f32; 9]) -> Self {
        Self { cells }
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 9] {
        self.cells
    }

    /// Upper-left 3x3 block.
    pub fn from_mat4(m: &Mat4) -> Self {
        Self {
            cells: [
                m[0], m[1], m[2], //
                m[4], m[5], m[6], //
                m[8], m[9], m[10],
            ],
        }
    }

    /// Columns padded to vec4, matching WGSL `mat3x3<f32>` uniform layout.
    pub fn to_cols_array_padded(&self) -> [[f32; 4]; 3] {
        let c = &self.cells;
        [
            [c[0], c[1], c[2], 0.0],
            [c[3], c[4], c[5], 0.0],
            [c[6], c[7], c[8], 0.0],
        ]
    }

    pub fn transpose(&self) -> Self {
        let c = &self.cells;
        Self {
            cells: [
                c[0], c[3], c[6], //
                c[1], c[4], c[7], //
                c[2], c[5], c[8],
            ],
        }
    }

    pub fn determinant(&self) -> f32 {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.cells;
        a00 * (a22 * a11 - a12 * a21) + a01 * (-a22 * a10 + a12 * a20) + a02 * (a21 * a10 - a11 * a20)
    }

    /// Cofactor inverse. Fails with [`CoreError::SingularMatrix`] when the
    /// determinant is exactly zero.
    pub fn inverse(&self) -> CoreResult<Self> {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.cells;

        let b01 = a22 * a11 - a12 * a21;
        let b11 = -a22 * a10 + a12 * a20;
        let b21 = a21 * a10 - a11 * a20;

        let det = a00 * b01 + a01 * b11 + a02 * b21;
        if det == 0.0 {
            return Err(CoreError::SingularMatrix);
        }
        let inv = 1.0 / det;

        Ok(Self {
            cells: [
                b01 * inv,
                (-a22 * a01 + a02 * a21) * inv,
                (a12 * a01 - a02 * a11) * inv,
                b11 * inv,
                (a22 * a00 - a02 * a20) * inv,
                (-a12 * a00 + a02 * a10) * inv,
                b21 * inv,
                (-a21 * a00 + a01 * a20) * inv,
                (a11 * a00 - a01 * a10) * inv,
            ],
        })
    }

    #[cfg(test)]
    fn multiply(&self, rhs: &Self) -> Self {
        let a = &self.cells;
        let b = &rhs.cells;
        let mut out = [0.0f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                out[col * 3 + row] =
                    a[row] * b[col * 3] + a[3 + row] * b[col * 3 + 1] + a[6 + row] * b[col * 3 + 2];
            }
        }
        Self { cells: out }
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let c = &self.cells;
        Vec3::new(
            c[0] * v.x + c[3] * v.y + c[6] * v.z,
            c[1] * v.x + c[4] * v.y + c[7] * v.z,
            c[2] * v.x + c[5] * v.y + c[8] * v.z,
        )
    }

    pub fn abs_diff_eq(&self, other: &Self, eps: f32) -> bool {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat3 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.cells[i]
    }
}

impl From<Mat3> for glam::Mat3 {
    fn from(m: Mat3) -> Self {
        glam::Mat3::from_cols_array(&m.cells)
    }
}
