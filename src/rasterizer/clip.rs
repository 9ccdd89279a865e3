//! Sutherland-Hodgman clipping against the near plane
//!
//! Runs in view space, before projection. A vertex is inside when its
//! view-space z is at or beyond the near plane (`z <= near_z`, near_z < 0).
//! A triangle clips to 0, 3 or 4 vertices; quads are fanned from vertex 0.

use super::math::Vec4;

/// A vertex as seen by the clipper
///
/// The world-space position rides along so lighting can use it after
/// clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    pub view: Vec4,
    pub world: Vec4,
}

impl ClipVertex {
    pub fn new(view: Vec4, world: Vec4) -> Self {
        Self { view, world }
    }

    fn lerp(&self, other: &ClipVertex, t: f32) -> ClipVertex {
        ClipVertex {
            view: self.view.lerp(other.view, t),
            world: self.world.lerp(other.world, t),
        }
    }

    fn inside(&self, near_z: f32) -> bool {
        self.view.z <= near_z
    }
}

/// Point where the edge prev -> curr crosses `z = near_z`
fn intersect(prev: &ClipVertex, curr: &ClipVertex, near_z: f32) -> ClipVertex {
    let t = (near_z - prev.view.z) / (curr.view.z - prev.view.z);
    prev.lerp(curr, t)
}

/// Clip a triangle against the near plane
///
/// Appends the result to `out` as a flat list of triangles (each 3
/// consecutive entries is one triangle) and returns how many triangles were
/// added: 0 if fully clipped, 1 or 2 otherwise.
pub fn clip_near(tri: &[ClipVertex; 3], near_z: f32, out: &mut Vec<ClipVertex>) -> usize {
    let mut polygon: [ClipVertex; 4] = [tri[0]; 4];
    let mut count = 0;

    let mut prev = &tri[2];
    for curr in tri {
        let prev_in = prev.inside(near_z);
        if curr.inside(near_z) {
            if !prev_in {
                polygon[count] = intersect(prev, curr, near_z);
                count += 1;
            }
            polygon[count] = *curr;
            count += 1;
        } else if prev_in {
            polygon[count] = intersect(prev, curr, near_z);
            count += 1;
        }
        prev = curr;
    }

    match count {
        3 => {
            out.extend_from_slice(&polygon[..3]);
            1
        }
        4 => {
            out.extend_from_slice(&[polygon[0], polygon[1], polygon[2]]);
            out.extend_from_slice(&[polygon[0], polygon[2], polygon[3]]);
            2
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEAR_Z: f32 = -0.1;

    fn cv(x: f32, y: f32, z: f32) -> ClipVertex {
        let p = Vec4::point(x, y, z);
        ClipVertex::new(p, p + Vec4::direction(10.0, 0.0, 0.0))
    }

    #[test]
    fn test_fully_inside_unchanged() {
        let tri = [cv(0.0, 0.0, -1.0), cv(1.0, 0.0, -2.0), cv(0.0, 1.0, -3.0)];
        let mut out = Vec::new();
        assert_eq!(clip_near(&tri, NEAR_Z, &mut out), 1);
        assert_eq!(out, tri.to_vec());
    }

    #[test]
    fn test_fully_behind_empty() {
        let tri = [cv(0.0, 0.0, 1.0), cv(1.0, 0.0, 0.0), cv(0.0, 1.0, -0.05)];
        let mut out = Vec::new();
        assert_eq!(clip_near(&tri, NEAR_Z, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_one_vertex_behind_gives_two_triangles() {
        let tri = [cv(-1.0, 0.0, -2.0), cv(1.0, 0.0, -2.0), cv(0.0, 1.0, 1.0)];
        let mut out = Vec::new();
        assert_eq!(clip_near(&tri, NEAR_Z, &mut out), 2);
        assert_eq!(out.len(), 6);

        let mut on_plane = 0;
        for v in &out {
            assert!(v.view.z <= NEAR_Z + 1e-5);
            if (v.view.z - NEAR_Z).abs() < 1e-5 {
                on_plane += 1;
                assert!((v.view.w - 1.0).abs() < 1e-6);
            }
        }
        // Two new vertices, each shared by the fan
        assert!(on_plane >= 2);
        // Fan shares vertex 0
        assert_eq!(out[0], out[3]);
    }

    #[test]
    fn test_two_vertices_behind_gives_one_triangle() {
        let tri = [cv(0.0, 0.0, -2.0), cv(1.0, 0.0, 1.0), cv(0.0, 1.0, 1.0)];
        let mut out = Vec::new();
        assert_eq!(clip_near(&tri, NEAR_Z, &mut out), 1);
        assert_eq!(out.len(), 3);
        let new_vertices: Vec<_> = out.iter().filter(|v| (v.view.z - NEAR_Z).abs() < 1e-5).collect();
        assert_eq!(new_vertices.len(), 2);
    }

    #[test]
    fn test_world_position_follows_view() {
        let tri = [cv(0.0, 0.0, -2.0), cv(1.0, 0.0, 1.0), cv(0.0, 1.0, 1.0)];
        let mut out = Vec::new();
        clip_near(&tri, NEAR_Z, &mut out);
        for v in &out {
            let offset = v.world - v.view;
            assert!((offset.x - 10.0).abs() < 1e-4);
            assert!(offset.y.abs() < 1e-5 && offset.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_appends_to_existing_output() {
        let tri = [cv(0.0, 0.0, -1.0), cv(1.0, 0.0, -1.0), cv(0.0, 1.0, -1.0)];
        let mut out = tri.to_vec();
        clip_near(&tri, NEAR_Z, &mut out);
        assert_eq!(out.len(), 6);
    }
}
