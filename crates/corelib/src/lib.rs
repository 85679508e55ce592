//! Core types: math kernel, Camera, keyboard controller, Transform.

pub mod camera;
pub mod controller;
pub mod error;
pub mod math;
pub mod transform;

pub use camera::{Axis, Camera, CameraProps, CameraStats};
pub use controller::{CameraController, InputState, KeyBindings};
pub use error::{CoreError, CoreResult};
pub use math::{Mat3, Mat4, Vec3, vec3};
pub use transform::Transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_pv_is_finite() {
        let cam = Camera::new(
            CameraProps::default()
                .with_position(vec3(0.0, 0.0, -4.0))
                .with_fov(60f32.to_radians())
                .with_clip_planes(0.1, 100.0)
                .with_aspect(16.0 / 9.0),
        )
        .expect("valid camera");
        assert!(cam.view_projection_matrix().is_finite());
    }

    #[test]
    fn point_in_front_of_camera_lands_inside_clip_volume() {
        // Camera pushes the world 2 units down -z; the origin ends up in view.
        let cam = Camera::new(CameraProps::default().with_position(vec3(0.0, 0.0, -2.0)))
            .expect("valid camera");
        let clip = glam::Mat4::from(cam.view_projection_matrix()) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0, "{ndc:?}");
    }
}
