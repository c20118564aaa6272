//! Oriented planes and the polygon classification / splitting used by the BSP tree.

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in Hessian normal form: every point `p` on the plane satisfies
/// `normal · p = w`. The front half-space is the one `normal` points into.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and the offset
    /// measured along the normalised normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Create a plane from three points, normal following the right-hand rule
    /// `(b - a) × (c - a)`.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a));
        match normal.try_normalize(Real::EPSILON) {
            Some(n) => Plane {
                normal: n,
                w: n.dot(&a.coords),
            },
            None => Plane {
                normal: Vector3::z(),
                w: a.z,
            },
        }
    }

    /// Build the supporting plane of a convex polygon.
    ///
    /// The normal is computed with Newell's method so that it follows the
    /// winding of the whole ring, not just the first three vertices, which
    /// keeps nearly-collinear leading vertices from producing a garbage plane.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let n = vertices.len();
        if n < 3 {
            return Plane {
                normal: Vector3::z(),
                w: vertices.first().map_or(0.0, |v| v.pos.z),
            };
        }

        let newell = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + curr.pos.coords.cross(&next.pos.coords)
            });

        match newell.try_normalize(Real::EPSILON) {
            Some(normal) => {
                let centroid = vertices
                    .iter()
                    .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                    / n as Real;
                Plane {
                    normal,
                    w: normal.dot(&centroid),
                }
            },
            None => Self::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos),
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from `point` to the plane, positive in front.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as `FRONT`, `BACK` or `COPLANAR` (within [`EPSILON`]).
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        if d < -EPSILON {
            BACK
        } else if d > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify another plane: `FRONT` if its normal points the same way as ours.
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// Bitwise OR of the classification of every vertex of `polygon`.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Spanning polygons are cut along the plane; both halves keep the
    /// original polygon's metadata. Fragments with fewer than three vertices
    /// are dropped.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.orient_plane(&polygon.plane) == FRONT {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(count + 1);
                let mut split_back = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new);
                            split_back.push(vertex_new);
                        }
                    }
                }

                // The halves of a convex polygon stay on its supporting plane,
                // so reuse that plane instead of recomputing it from fragments.
                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
