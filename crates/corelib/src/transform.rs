use crate::{Mat4, Vec3};

/// Model placement: translation plus Euler rotation (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_euler: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn from_tr(translation: Vec3, rotation_euler: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
        }
    }

    /// Build matrix = T · Ry · Rx · Rz.
    pub fn matrix(&self) -> Mat4 {
        let t = self.translation;
        let r = self.rotation_euler;
        Mat4::identity()
            .translate(t.x, t.y, t.z)
            .rotate_y(r.y)
            .rotate_x(r.x)
            .rotate_z(r.z)
    }

    /// Advance rotation by `speed_xyz * dt`.
    pub fn spin(&mut self, dt: f32, speed_xyz: Vec3) {
        self.rotation_euler = self.rotation_euler + speed_xyz * dt;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
