//! Procedural geometry: flat-shaded quads and cubes.
//!
//! Every face starts as a canonical quad in the z = 0 plane facing +z and is
//! placed with the math kernel. Angles are radians.

use corelib::{Mat4, Vec3};

use crate::mesh::MeshData;

/// Quad description. `offset` is applied in face-local space, before `rotation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneProps {
    pub offset: Vec3,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
}

impl PlaneProps {
    pub fn new(width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            offset: Vec3::ZERO,
            width,
            height,
            color,
            rotation: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Axis-aligned cube centred on `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeProps {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 4],
}

/// Append a quad (4 vertices, 2 triangles). Returns the index of its first vertex.
pub fn add_plane(mesh: &mut MeshData, props: &PlaneProps) -> u32 {
    add_plane_placed(mesh, props, &Mat4::IDENTITY)
}

/// Append the six faces of a cube (24 vertices, 12 triangles).
pub fn add_cube(mesh: &mut MeshData, props: &CubeProps) -> u32 {
    let base = mesh.next_index();
    let half = props.size / 2.0;
    let p = props.position;
    let placement = Mat4::identity().translate(p.x, p.y, p.z);

    let faces = [
        Vec3::ZERO,                                 // front (+z)
        Vec3::new(0.0, 180f32.to_radians(), 0.0),   // back (-z)
        Vec3::new(90f32.to_radians(), 0.0, 0.0),    // top (+y)
        Vec3::new(-90f32.to_radians(), 0.0, 0.0),   // bottom (-y)
        Vec3::new(0.0, 90f32.to_radians(), 0.0),    // -x side
        Vec3::new(0.0, -90f32.to_radians(), 0.0),   // +x side
    ];
    for rotation in faces {
        let face = PlaneProps::new(props.size, props.size, props.color)
            .with_offset(Vec3::new(0.0, 0.0, half))
            .with_rotation(rotation);
        add_plane_placed(mesh, &face, &placement);
    }
    log::debug!(
        "cube: size={} at {:?}, vertices {}..{}",
        props.size,
        p,
        base,
        mesh.next_index()
    );
    base
}

fn add_plane_placed(mesh: &mut MeshData, props: &PlaneProps, placement: &Mat4) -> u32 {
    let hw = props.width / 2.0;
    let hh = props.height / 2.0;
    let corners = [
        Vec3::new(-hw, -hh, 0.0), // bottom-left
        Vec3::new(hw, -hh, 0.0),  // bottom-right
        Vec3::new(hw, hh, 0.0),   // top-right
        Vec3::new(-hw, hh, 0.0),  // top-left
    ];

    let o = props.offset;
    let r = props.rotation;
    let (model, normal) = if r != Vec3::ZERO {
        let rotation = Mat4::identity().rotate_x(r.x).rotate_y(r.y).rotate_z(r.z);
        let normal = rotation.transform_point(Vec3::Z).normalize();
        (rotation.translate(o.x, o.y, o.z), normal)
    } else {
        (Mat4::identity().translate(o.x, o.y, o.z), Vec3::Z)
    };
    let model = placement.multiply(&model);

    let base = mesh.next_index();
    for corner in corners {
        let pos = model.transform_point(corner);
        mesh.add_vertex(pos.to_array(), props.color, normal.to_array());
    }
    mesh.add_triangle(base, base + 1, base + 2);
    mesh.add_triangle(base, base + 2, base + 3);
    base
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use corelib::vec3;

    use super::*;

    const EPS: f32 = 1e-5;

    fn v(a: [f32; 3]) -> Vec3 {
        Vec3::from(a)
    }

    /// Every triangle winds counter-clockwise when seen from its normal side.
    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face = (v(b.position) - v(a.position)).cross(v(c.position) - v(a.position));
            assert!(face.dot(v(a.normal)) > 0.0, "triangle {tri:?} winds inward");
        }
    }

    #[test]
    fn unrotated_plane_faces_plus_z() {
        let mut mesh = MeshData::default();
        let base = add_plane(
            &mut mesh,
            &PlaneProps::new(2.0, 1.0, [1.0, 0.0, 0.0, 1.0]).with_offset(vec3(0.0, 0.0, 3.0)),
        );
        assert_eq!(base, 0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[0].position, [-1.0, -0.5, 3.0]);
        assert_eq!(mesh.vertices[2].position, [1.0, 0.5, 3.0]);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn floor_plane_is_horizontal_below_origin() {
        let mut mesh = MeshData::default();
        add_plane(
            &mut mesh,
            &PlaneProps::new(4.0, 4.0, [0.0, 1.0, 1.0, 1.0])
                .with_offset(vec3(0.0, 0.0, -1.0))
                .with_rotation(vec3(FRAC_PI_2, 0.0, 0.0)),
        );
        for vert in &mesh.vertices {
            assert!((vert.position[1] + 1.0).abs() < EPS, "{vert:?}");
            assert!((v(vert.normal) - Vec3::Y).magnitude() < EPS, "{vert:?}");
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn plane_indices_follow_existing_vertices() {
        let mut mesh = MeshData::default();
        add_cube(
            &mut mesh,
            &CubeProps {
                position: Vec3::ZERO,
                size: 1.0,
                color: [1.0; 4],
            },
        );
        let base = add_plane(&mut mesh, &PlaneProps::new(1.0, 1.0, [1.0; 4]));
        assert_eq!(base, 24);
        assert_eq!(&mesh.indices[36..], &[24, 25, 26, 24, 26, 27]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn cube_has_six_outward_faces() {
        let mut mesh = MeshData::default();
        let center = vec3(0.5, -1.0, 2.0);
        add_cube(
            &mut mesh,
            &CubeProps {
                position: center,
                size: 2.0,
                color: [1.0, 0.0, 0.0, 1.0],
            },
        );
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.validate().is_ok());

        let mut normals: Vec<Vec3> = Vec::new();
        for face in mesh.vertices.chunks(4) {
            let n = v(face[0].normal);
            assert!((n.magnitude() - 1.0).abs() < EPS);
            for vert in face {
                let offset = v(vert.position) - center;
                // every face sits half a size away from the centre
                assert!((offset.dot(n) - 1.0).abs() < EPS, "{vert:?}");
                assert!(offset.magnitude() <= 3f32.sqrt() + EPS);
            }
            normals.push(n);
        }
        let expected = [
            Vec3::Z,
            -Vec3::Z,
            Vec3::Y,
            -Vec3::Y,
            -Vec3::X,
            Vec3::X,
        ];
        for (n, e) in normals.iter().zip(expected.iter()) {
            assert!((*n - *e).magnitude() < EPS, "{n:?} vs {e:?}");
        }
        assert_outward_winding(&mesh);
    }
}
