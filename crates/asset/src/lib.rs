//! CPU-side geometry: mesh container and procedural plane/cube builders.

pub mod geometry;
pub mod mesh;

pub use geometry::{CubeProps, PlaneProps, add_cube, add_plane};
pub use mesh::{MeshData, MeshVertex};
