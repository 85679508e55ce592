//! Per-frame uniform block derived from the camera and the model matrix.

use bytemuck::{Pod, Zeroable};
use corelib::{Camera, CoreResult, Mat3, Mat4, Vec3};

/// Converts OpenGL clip depth (z in [-1, 1]) to wgpu's [0, 1].
pub const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols_array([
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.0, 0.0, 0.5, 1.0,
]);

/// Scene UBO, laid out for WGSL (mat3x3 columns padded to vec4).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub light_direction: [f32; 3],
    pub _pad: f32,
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            normal_matrix: Mat3::IDENTITY.to_cols_array_padded(),
            light_direction: Vec3::Z.to_array(),
            _pad: 0.0,
        }
    }
}

/// Matrices handed to the shader for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub normal_matrix: Mat3,
    pub light_direction: Vec3,
}

impl FrameUniforms {
    /// Fails with `SingularMatrix` when `view · model` has a singular 3x3 block
    /// (e.g. a zero scale); the caller decides whether to skip the frame.
    pub fn compute(camera: &Camera, model: &Mat4, light_direction: Vec3) -> CoreResult<Self> {
        let model_view = camera.view_matrix().multiply(model);
        let normal_matrix = Mat3::from_mat4(&model_view).transpose().inverse()?;
        Ok(Self {
            model_view,
            projection: OPENGL_TO_WGPU.multiply(&camera.projection_matrix()),
            normal_matrix,
            light_direction: light_direction.normalize(),
        })
    }

    pub fn to_uniform(&self) -> SceneUniform {
        SceneUniform {
            model_view: self.model_view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            normal_matrix: self.normal_matrix.to_cols_array_padded(),
            light_direction: self.light_direction.to_array(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use corelib::{CameraProps, CoreError, vec3};

    use super::*;

    #[test]
    fn scene_uniform_matches_wgsl_layout() {
        // 2 * mat4 (128) + mat3x3 (48) + vec3 + pad (16)
        assert_eq!(std::mem::size_of::<SceneUniform>(), 192);
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
    }

    #[test]
    fn compute_uses_camera_matrices() {
        let cam = Camera::new(
            CameraProps::default()
                .with_position(vec3(0.0, 0.0, -2.0))
                .with_aspect(800.0 / 600.0),
        )
        .expect("valid camera");
        let model = Mat4::identity().rotate_y(0.3).rotate_x(0.15);
        let u = FrameUniforms::compute(&cam, &model, vec3(0.0, 0.0, 10.0)).expect("invertible");

        assert_eq!(u.model_view, cam.view_matrix() * model);
        assert_eq!(u.light_direction, Vec3::Z);
        // pure rotation + translation: the normal matrix is the rotation block
        assert!(u.normal_matrix.abs_diff_eq(&Mat3::from_mat4(&u.model_view), 1e-5));
    }

    #[test]
    fn projection_is_remapped_to_zero_one_depth() {
        let cam = Camera::default();
        let u = FrameUniforms::compute(&cam, &Mat4::IDENTITY, Vec3::Z).expect("invertible");
        let proj = glam::Mat4::from(u.projection);
        let near = proj.project_point3(glam::Vec3::new(0.0, 0.0, -cam.near()));
        let far = proj.project_point3(glam::Vec3::new(0.0, 0.0, -cam.far()));
        assert!(near.z.abs() < 1e-4, "{near:?}");
        assert!((far.z - 1.0).abs() < 1e-4, "{far:?}");
    }

    #[test]
    fn singular_model_is_reported() {
        let cam = Camera::default();
        let flat = Mat4::from_cols_array([0.0; 16]);
        assert_eq!(
            FrameUniforms::compute(&cam, &flat, Vec3::Z),
            Err(CoreError::SingularMatrix)
        );
    }

    #[test]
    fn to_uniform_packs_columns() {
        let u = FrameUniforms {
            model_view: Mat4::identity().translate(1.0, 2.0, 3.0),
            projection: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
            light_direction: Vec3::Y,
        }
        .to_uniform();
        assert_eq!(u.model_view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.normal_matrix[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.light_direction, [0.0, 1.0, 0.0]);
    }
}
