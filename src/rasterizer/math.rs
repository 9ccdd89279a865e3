//! Vector and matrix math for the pipeline
//!
//! Vec3 carries colors and reflectances, Vec4 carries homogeneous points
//! (w = 1) and directions (w = 0), Mat4 is a row-major 4x4 transform.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3-component vector (colors, reflectance triples)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise product (reflectance times light color)
    pub fn mul_elem(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

fn one() -> f32 {
    1.0
}

/// Homogeneous 4-component vector
///
/// `w = 1` is a point, `w = 0` a direction. `dot`, `cross` and `normalize`
/// only look at x/y/z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default = "one")]
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const ORIGIN: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product. The result is a direction (w = 0).
    pub fn cross(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize x/y/z in place. Zero-length vectors are left untouched.
    pub fn normalize(&mut self) {
        let l = self.len();
        if l > 0.0 {
            self.x /= l;
            self.y /= l;
            self.z /= l;
        }
    }

    pub fn normalized(mut self) -> Vec4 {
        self.normalize();
        self
    }

    /// Linear interpolation over all four components
    pub fn lerp(self, other: Vec4, t: f32) -> Vec4 {
        self + (other - self) * t
    }

    /// Re-tag as a point (w = 1)
    pub fn as_point(self) -> Vec4 {
        Vec4 { w: 1.0, ..self }
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }
}

impl Neg for Vec4 {
    type Output = Vec4;
    fn neg(self) -> Vec4 {
        self * -1.0
    }
}

/// 4x4 matrix, `m[row][col]`. Default is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Mat4 = Mat4 { m: [[0.0; 4]; 4] };
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row][col]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[row][col]
    }
}

/// Composition: `(a * b) * v == a * (b * v)`, the right operand applies first
impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, o: Mat4) -> Mat4 {
        let mut result = Mat4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * o.m[k][j];
                }
            }
        }
        result
    }
}

/// Full homogeneous transform, w row included
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn mat_approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
        (0..4).all(|i| (0..4).all(|j| (a[(i, j)] - b[(i, j)]).abs() < eps))
    }

    pub(crate) fn vec_approx_eq(a: Vec4, b: Vec4, eps: f32) -> bool {
        (a.x - b.x).abs() < eps
            && (a.y - b.y).abs() < eps
            && (a.z - b.z).abs() < eps
            && (a.w - b.w).abs() < eps
    }

    /// Deterministic pseudo-random matrix (xorshift), good enough for algebra checks
    fn pseudo_random_matrix(seed: u32) -> Mat4 {
        let mut state = seed.max(1);
        let mut m = Mat4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                m[(i, j)] = (state % 2000) as f32 / 1000.0 - 1.0;
            }
        }
        m
    }

    #[test]
    fn test_vec4_dot_ignores_w() {
        let a = Vec4::new(1.0, 2.0, 3.0, 10.0);
        let b = Vec4::new(4.0, 5.0, 6.0, 10.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_cross_right_handed() {
        let c = Vec4::direction(1.0, 0.0, 0.0).cross(Vec4::direction(0.0, 1.0, 0.0));
        assert!(vec_approx_eq(c, Vec4::direction(0.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_cross_is_a_direction() {
        let c = Vec4::point(1.0, 2.0, 3.0).cross(Vec4::point(-2.0, 0.5, 4.0));
        assert_eq!(c.w, 0.0);
    }

    #[test]
    fn test_cross_anticommutative_and_perpendicular() {
        let a = Vec4::point(1.5, -2.0, 0.25);
        let b = Vec4::point(-0.5, 3.0, 2.0);
        let ab = a.cross(b);
        let ba = b.cross(a);
        assert!(vec_approx_eq(ab, -ba, 1e-5));
        assert!(a.dot(ab).abs() < 1e-4);
        assert!(b.dot(ab).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut v = Vec4::direction(3.0, -4.0, 12.0);
        v.normalize();
        assert!((v.len() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_zero_unchanged() {
        let mut v = Vec4::ZERO;
        v.normalize();
        assert_eq!(v, Vec4::ZERO);
        assert!(!v.x.is_nan());
    }

    #[test]
    fn test_lerp_all_components() {
        let a = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(2.0, 4.0, -6.0, 3.0);
        assert!(vec_approx_eq(a.lerp(b, 0.5), Vec4::new(1.0, 2.0, -3.0, 2.0), 1e-6));
    }

    #[test]
    fn test_vec3_mul_elem() {
        let c = Vec3::new(1.0, 0.5, 0.0).mul_elem(Vec3::new(0.5, 0.5, 1.0));
        assert_eq!(c, Vec3::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let p = Vec4::point(1.0, -2.0, 3.0);
        assert_eq!(Mat4::default() * p, p);
    }

    #[test]
    fn test_matrix_associative() {
        let a = pseudo_random_matrix(7);
        let b = pseudo_random_matrix(91);
        let c = pseudo_random_matrix(1234);
        assert!(mat_approx_eq(&((a * b) * c), &(a * (b * c)), 1e-4));
    }

    #[test]
    fn test_matrix_not_commutative() {
        let a = pseudo_random_matrix(3);
        let b = pseudo_random_matrix(5);
        assert!(!mat_approx_eq(&(a * b), &(b * a), 1e-4));
    }

    #[test]
    fn test_matrix_vector_uses_w_row() {
        let mut m = Mat4::IDENTITY;
        m[(3, 2)] = -1.0;
        m[(3, 3)] = 0.0;
        let v = m * Vec4::point(0.0, 0.0, -5.0);
        assert!((v.w - 5.0).abs() < 1e-6);
    }
}
