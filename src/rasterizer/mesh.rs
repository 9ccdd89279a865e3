//! Static mesh descriptors
//!
//! Meshes are borrowed, read-only tables shared by every instance that
//! draws them. Faces wind counter-clockwise when seen from outside, so
//! `(v1 - v0) x (v2 - v0)` points out of the surface.

use super::math::Vec4;

/// Indexed triangle mesh
#[derive(Debug, Clone, Copy)]
pub struct Mesh<'a> {
    pub vertices: &'a [Vec4],
    pub faces: &'a [[usize; 3]],
}

impl<'a> Mesh<'a> {
    pub const fn new(vertices: &'a [Vec4], faces: &'a [[usize; 3]]) -> Self {
        Self { vertices, faces }
    }
}

const CUBE_VERTICES: [Vec4; 8] = [
    Vec4::point(-0.5, -0.5, 0.5),
    Vec4::point(0.5, -0.5, 0.5),
    Vec4::point(0.5, 0.5, 0.5),
    Vec4::point(-0.5, 0.5, 0.5),
    Vec4::point(-0.5, -0.5, -0.5),
    Vec4::point(0.5, -0.5, -0.5),
    Vec4::point(0.5, 0.5, -0.5),
    Vec4::point(-0.5, 0.5, -0.5),
];

const CUBE_FACES: [[usize; 3]; 12] = [
    // +z
    [0, 1, 2],
    [0, 2, 3],
    // -z
    [5, 4, 7],
    [5, 7, 6],
    // +x
    [1, 5, 6],
    [1, 6, 2],
    // -x
    [4, 0, 3],
    [4, 3, 7],
    // +y
    [3, 2, 6],
    [3, 6, 7],
    // -y
    [4, 5, 1],
    [4, 1, 0],
];

/// Unit cube centered on the origin (side length 1)
pub static CUBE: Mesh<'static> = Mesh::new(&CUBE_VERTICES, &CUBE_FACES);
