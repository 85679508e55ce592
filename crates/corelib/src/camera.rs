use std::cell::Cell;
use std::f32::consts::{FRAC_PI_4, PI};

use crate::error::{CoreError, CoreResult};
use crate::{Mat4, Vec3};

/// Vector component selector for single-axis camera writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn apply(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(value, v.y, v.z),
            Axis::Y => Vec3::new(v.x, value, v.z),
            Axis::Z => Vec3::new(v.x, v.y, value),
        }
    }
}

/// Construction parameters; unset fields use the camera defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProps {
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub fov_y_rad: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraProps {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y_rad: FRAC_PI_4,
            aspect: 1.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl CameraProps {
    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_fov(mut self, fov_y_rad: f32) -> Self {
        self.fov_y_rad = fov_y_rad;
        self
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    #[inline]
    pub fn with_clip_planes(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }
}

/// How many times each derived matrix has been rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraStats {
    pub view_builds: u64,
    pub projection_builds: u64,
    pub view_projection_builds: u64,
}

/// Perspective camera with lazily rebuilt matrices.
///
/// State is only reachable through accessors that return copies and setters
/// that invalidate. Cache dependencies:
///
/// * position, rotation -> view -> view_projection
/// * fov, aspect, near, far -> projection -> view_projection
///
/// The view matrix is `Rz · Ry · Rx · T(position)`, built in that call order.
/// Projection uses OpenGL clip depth; see [`Mat4::perspective`].
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    fov_y_rad: f32,
    aspect: f32,
    z_near: f32,
    z_far: f32,

    view: Cell<Option<Mat4>>,
    projection: Cell<Option<Mat4>>,
    view_projection: Cell<Option<Mat4>>,
    stats: Cell<CameraStats>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_props_unchecked(CameraProps::default())
    }
}

impl Camera {
    /// Build a camera, rejecting degenerate projection parameters.
    pub fn new(props: CameraProps) -> CoreResult<Self> {
        validate_projection(props.fov_y_rad, props.aspect, props.z_near, props.z_far)?;
        Ok(Self::from_props_unchecked(props))
    }

    fn from_props_unchecked(props: CameraProps) -> Self {
        Self {
            position: props.position,
            rotation: props.rotation,
            fov_y_rad: props.fov_y_rad,
            aspect: props.aspect,
            z_near: props.z_near,
            z_far: props.z_far,
            view: Cell::new(None),
            projection: Cell::new(None),
            view_projection: Cell::new(None),
            stats: Cell::new(CameraStats::default()),
        }
    }

    // ---- derived matrices ----

    pub fn view_matrix(&self) -> Mat4 {
        if let Some(m) = self.view.get() {
            return m;
        }
        let r = self.rotation;
        let p = self.position;
        let m = Mat4::identity()
            .rotate_z(r.z)
            .rotate_y(r.y)
            .rotate_x(r.x)
            .translate(p.x, p.y, p.z);
        self.view.set(Some(m));
        self.bump(|s| s.view_builds += 1);
        log::trace!("camera: rebuilt view (position={p:?}, rotation={r:?})");
        m
    }

    pub fn projection_matrix(&self) -> Mat4 {
        if let Some(m) = self.projection.get() {
            return m;
        }
        let m = Mat4::perspective(self.fov_y_rad, self.aspect, self.z_near, self.z_far);
        self.projection.set(Some(m));
        self.bump(|s| s.projection_builds += 1);
        log::trace!(
            "camera: rebuilt projection (fov={}, aspect={}, near={}, far={})",
            self.fov_y_rad,
            self.aspect,
            self.z_near,
            self.z_far
        );
        m
    }

    /// `projection · view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        if let Some(m) = self.view_projection.get() {
            return m;
        }
        let m = self.projection_matrix().multiply(&self.view_matrix());
        self.view_projection.set(Some(m));
        self.bump(|s| s.view_projection_builds += 1);
        m
    }

    pub fn stats(&self) -> CameraStats {
        self.stats.get()
    }

    fn bump(&self, f: impl FnOnce(&mut CameraStats)) {
        let mut s = self.stats.get();
        f(&mut s);
        self.stats.set(s);
    }

    fn invalidate_view(&mut self) {
        self.view.set(None);
        self.view_projection.set(None);
    }

    fn invalidate_projection(&mut self) {
        self.projection.set(None);
        self.view_projection.set(None);
    }

    // ---- position / rotation ----

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.invalidate_view();
    }

    pub fn set_position_axis(&mut self, axis: Axis, value: f32) {
        self.set_position(axis.apply(self.position, value));
    }

    pub fn translate_by(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.invalidate_view();
    }

    pub fn set_rotation_axis(&mut self, axis: Axis, value: f32) {
        self.set_rotation(axis.apply(self.rotation, value));
    }

    pub fn rotate_by(&mut self, delta: Vec3) {
        self.set_rotation(self.rotation + delta);
    }

    // ---- projection parameters ----

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_y_rad
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.z_near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.z_far
    }

    pub fn set_fov(&mut self, fov_y_rad: f32) -> CoreResult<()> {
        validate_projection(fov_y_rad, self.aspect, self.z_near, self.z_far)?;
        self.fov_y_rad = fov_y_rad;
        self.invalidate_projection();
        Ok(())
    }

    pub fn set_aspect(&mut self, aspect: f32) -> CoreResult<()> {
        validate_projection(self.fov_y_rad, aspect, self.z_near, self.z_far)?;
        self.aspect = aspect;
        self.invalidate_projection();
        Ok(())
    }

    pub fn set_near(&mut self, z_near: f32) -> CoreResult<()> {
        self.set_clip_planes(z_near, self.z_far)
    }

    pub fn set_far(&mut self, z_far: f32) -> CoreResult<()> {
        self.set_clip_planes(self.z_near, z_far)
    }

    /// Sets both planes at once so a move past the old far plane is expressible.
    pub fn set_clip_planes(&mut self, z_near: f32, z_far: f32) -> CoreResult<()> {
        validate_projection(self.fov_y_rad, self.aspect, z_near, z_far)?;
        self.z_near = z_near;
        self.z_far = z_far;
        self.invalidate_projection();
        Ok(())
    }
}

fn invalid(name: &'static str, value: f32, reason: &'static str) -> CoreError {
    CoreError::InvalidCameraParameter {
        name,
        value,
        reason,
    }
}

fn validate_projection(fov_y_rad: f32, aspect: f32, z_near: f32, z_far: f32) -> CoreResult<()> {
    if !(fov_y_rad.is_finite() && fov_y_rad > 0.0 && fov_y_rad < PI) {
        return Err(invalid("fov", fov_y_rad, "must lie in (0, pi) radians"));
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(invalid("aspect", aspect, "must be positive and finite"));
    }
    if !(z_near.is_finite() && z_near > 0.0) {
        return Err(invalid("near", z_near, "must be positive and finite"));
    }
    if !(z_far.is_finite() && z_far > z_near) {
        return Err(invalid("far", z_far, "must be finite and greater than near"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::math::vec3;

    #[test]
    fn defaults() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.rotation(), Vec3::ZERO);
        assert_eq!(cam.fov(), FRAC_PI_4);
        assert_eq!(cam.aspect(), 1.0);
        assert_eq!(cam.near(), 0.1);
        assert_eq!(cam.far(), 1000.0);
        assert_eq!(cam.view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn view_is_cached_between_reads() {
        let cam = Camera::default();
        let a = cam.view_matrix();
        let b = cam.view_matrix();
        assert_eq!(a, b);
        assert_eq!(cam.stats().view_builds, 1);
    }

    #[test]
    fn position_change_rebuilds_view_only() {
        let mut cam = Camera::default();
        let view_before = cam.view_matrix();
        let proj_before = cam.projection_matrix();

        cam.set_position(vec3(1.0, 2.0, 3.0));

        assert_ne!(cam.view_matrix(), view_before);
        assert_eq!(cam.projection_matrix(), proj_before);
        let s = cam.stats();
        assert_eq!(s.view_builds, 2);
        assert_eq!(s.projection_builds, 1);
    }

    #[test]
    fn component_write_invalidates_view() {
        let mut cam = Camera::default();
        let _ = cam.view_projection_matrix();

        cam.set_position_axis(Axis::X, 1.0);
        let v = cam.view_matrix();
        assert_eq!(v[12], 1.0);
        assert_eq!(cam.position(), vec3(1.0, 0.0, 0.0));

        cam.set_rotation_axis(Axis::Y, 0.5);
        let _ = cam.view_projection_matrix();
        let s = cam.stats();
        assert_eq!(s.view_builds, 3);
        assert_eq!(s.view_projection_builds, 2);
        assert_eq!(s.projection_builds, 1);
    }

    #[test]
    fn translate_and_rotate_by_accumulate() {
        let mut cam = Camera::default();
        cam.translate_by(vec3(0.0, 0.0, 0.5));
        cam.translate_by(vec3(0.0, 0.0, 0.5));
        cam.rotate_by(vec3(0.1, 0.0, 0.0));
        assert_eq!(cam.position(), vec3(0.0, 0.0, 1.0));
        assert_eq!(cam.rotation(), vec3(0.1, 0.0, 0.0));
    }

    #[test]
    fn fov_change_invalidates_view_projection_not_view() {
        let mut cam = Camera::default();
        let vp_before = cam.view_projection_matrix();

        cam.set_fov(FRAC_PI_2).expect("valid fov");

        let vp_after = cam.view_projection_matrix();
        assert_ne!(vp_after, vp_before);
        let s = cam.stats();
        assert_eq!(s.view_projection_builds, 2);
        assert_eq!(s.projection_builds, 2);
        assert_eq!(s.view_builds, 1);
    }

    #[test]
    fn view_projection_is_projection_times_view() {
        let cam = Camera::new(
            CameraProps::default()
                .with_position(vec3(1.0, -2.0, -5.0))
                .with_rotation(vec3(0.2, 0.4, -0.1)),
        )
        .expect("valid camera");
        let expected = cam.projection_matrix() * cam.view_matrix();
        assert_eq!(cam.view_projection_matrix(), expected);
    }

    #[test]
    fn view_composes_rotation_then_translation() {
        let cam = Camera::new(
            CameraProps::default()
                .with_position(vec3(0.0, 0.0, -2.0))
                .with_rotation(vec3(0.0, FRAC_PI_2, 0.0)),
        )
        .expect("valid camera");
        let expected = Mat4::identity().rotate_y(FRAC_PI_2).translate(0.0, 0.0, -2.0);
        assert_eq!(cam.view_matrix(), expected);
        // Translation is applied to the point first, then the rotation.
        let p = cam.view_matrix().transform_point(Vec3::ZERO);
        assert!((p - vec3(2.0, 0.0, 0.0)).magnitude() < 1e-5, "{p:?}");
    }

    #[test]
    fn projection_matches_independent_perspective() {
        let cam = Camera::new(
            CameraProps::default()
                .with_position(vec3(0.0, 0.0, -2.0))
                .with_aspect(2.0),
        )
        .expect("valid camera");
        let expected = Mat4::perspective(FRAC_PI_4, 2.0, 0.1, 1000.0);
        assert!(cam.projection_matrix().abs_diff_eq(&expected, 1e-5));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let mut cam = Camera::default();
        assert!(matches!(
            cam.set_near(0.0),
            Err(CoreError::InvalidCameraParameter { name: "near", .. })
        ));
        assert!(matches!(
            cam.set_far(0.05),
            Err(CoreError::InvalidCameraParameter { name: "far", .. })
        ));
        assert!(matches!(
            cam.set_aspect(0.0),
            Err(CoreError::InvalidCameraParameter { name: "aspect", .. })
        ));
        assert!(matches!(
            cam.set_fov(-1.0),
            Err(CoreError::InvalidCameraParameter { name: "fov", .. })
        ));
        assert!(Camera::new(CameraProps::default().with_clip_planes(5.0, 5.0)).is_err());

        // failed writes leave state and caches alone
        let _ = cam.projection_matrix();
        assert_eq!(cam.near(), 0.1);
        assert_eq!(cam.far(), 1000.0);
        assert_eq!(cam.aspect(), 1.0);
        let _ = cam.projection_matrix();
        assert_eq!(cam.stats().projection_builds, 1);
    }

    #[test]
    fn aspect_and_clip_plane_writes_rebuild_projection_only() {
        let mut cam = Camera::default();
        let _ = cam.view_projection_matrix();

        let writes: [fn(&mut Camera) -> CoreResult<()>; 4] = [
            |c| c.set_aspect(16.0 / 9.0),
            |c| c.set_near(0.5),
            |c| c.set_far(500.0),
            |c| c.set_clip_planes(1.0, 100.0),
        ];
        for (i, write) in writes.iter().enumerate() {
            let before = cam.stats();
            let vp_before = cam.view_projection_matrix();
            write(&mut cam).expect("valid projection parameter");
            let vp_after = cam.view_projection_matrix();
            let after = cam.stats();

            assert_ne!(vp_after, vp_before, "write #{i}");
            assert_eq!(after.projection_builds, before.projection_builds + 1, "write #{i}");
            assert_eq!(after.view_projection_builds, before.view_projection_builds + 1, "write #{i}");
            assert_eq!(after.view_builds, before.view_builds, "write #{i}");
        }
        assert_eq!(cam.aspect(), 16.0 / 9.0);
        assert_eq!((cam.near(), cam.far()), (1.0, 100.0));
    }

    #[test]
    fn clip_planes_can_move_together() {
        let mut cam = Camera::default();
        cam.set_clip_planes(2000.0, 5000.0).expect("valid planes");
        assert_eq!(cam.near(), 2000.0);
        assert_eq!(cam.far(), 5000.0);
    }
}
