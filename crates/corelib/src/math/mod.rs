//! Vector/matrix kernel: `Vec3`, column-major `Mat4` and `Mat3`.
//!
//! Builders never mutate their receiver; each call returns a fresh value.

mod mat3;
mod mat4;
mod vec3;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use vec3::{Vec3, vec3};
