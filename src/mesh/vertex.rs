//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// Non-finite components of either `pos` or `normal` are replaced by `0.0`
    /// so a bad input can never poison the BSP classification.
    #[inline]
    pub fn new(mut pos: Point3<Real>, mut normal: Vector3<Real>) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }
        for c in normal.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex { pos, normal }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Normals are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }

    /// Apply `mat` to the position and `normal_mat` (the inverse transpose of
    /// `mat`) to the normal.
    pub(crate) fn transform(&mut self, mat: &Matrix4<Real>, normal_mat: &Matrix4<Real>) {
        self.pos = mat.transform_point(&self.pos);
        let n = normal_mat.transform_vector(&self.normal);
        self.normal = n.try_normalize(Real::EPSILON).unwrap_or(n);
    }
}
