//! Demo scene state and the per-frame update, kept free of GPU types.

use asset::{CubeProps, MeshData, PlaneProps, add_cube, add_plane};
use corelib::{
    Camera, CameraController, CameraProps, CoreResult, InputState, Transform, Vec3, vec3,
};
use renderer::FrameUniforms;

/// Model spin per frame, radians (x, y, z).
pub const SPIN_PER_FRAME: Vec3 = vec3(0.005, 0.01, 0.0);

/// Red unit cube at the origin over a cyan 4x4 floor one unit below it.
pub fn build_demo_mesh() -> MeshData {
    let mut mesh = MeshData::default();
    add_cube(
        &mut mesh,
        &CubeProps {
            position: Vec3::ZERO,
            size: 1.0,
            color: [1.0, 0.0, 0.0, 1.0],
        },
    );
    add_plane(
        &mut mesh,
        &PlaneProps::new(4.0, 4.0, [0.0, 1.0, 1.0, 1.0])
            .with_offset(vec3(0.0, 0.0, -1.0))
            .with_rotation(vec3(90f32.to_radians(), 0.0, 0.0)),
    );
    mesh
}

pub struct DemoScene {
    pub camera: Camera,
    pub controller: CameraController,
    pub input: InputState,
    pub model: Transform,
    pub light_direction: Vec3,
}

impl DemoScene {
    pub fn new(aspect: f32, fov_y_rad: f32, camera_speed: f32) -> CoreResult<Self> {
        let camera = Camera::new(
            CameraProps::default()
                .with_position(vec3(0.0, 0.0, -2.0))
                .with_fov(fov_y_rad)
                .with_aspect(aspect),
        )?;
        Ok(Self {
            camera,
            controller: CameraController::new(camera_speed),
            input: InputState::new(),
            model: Transform::identity(),
            light_direction: vec3(0.0, 0.0, 10.0).normalize(),
        })
    }

    /// One frame: move the camera, spin the model, derive shader inputs.
    pub fn tick(&mut self) -> CoreResult<FrameUniforms> {
        self.controller.update(&mut self.camera, &self.input);
        self.model.spin(1.0, SPIN_PER_FRAME);
        FrameUniforms::compute(&self.camera, &self.model.matrix(), self.light_direction)
    }
}
