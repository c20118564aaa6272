//! Planar convex polygons, the faces every `Mesh` is made of.

use crate::float_types::{EPSILON, Real, parry3d::bounding_volume::Aabb};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// A convex, planar polygon with an optional metadata tag.
///
/// Every polygon the crate creates is convex (cylinder caps and side quads,
/// and the pieces a plane cuts them into), which lets [`Polygon::triangulate`]
/// use a simple fan.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,

    /// Supporting plane, oriented by the vertex winding.
    pub plane: Plane,

    /// Lazily calculated AABB that spans `vertices`.
    pub bounding_box: OnceLock<Aabb>,

    pub metadata: Option<S>,
}

impl<S: Clone> PartialEq for Polygon<S>
where
    S: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices, deriving its plane from their winding.
    ///
    /// # Panics
    /// In debug builds, if fewer than three vertices are supplied.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        let plane = Plane::from_vertices(&vertices);
        Polygon::with_plane(vertices, plane, metadata)
    }

    /// Create a polygon whose supporting plane is already known.
    pub(crate) fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(Vertex::flip);
        self.plane.flip();
    }

    /// Fan-triangulate the polygon around its first vertex.
    ///
    /// If any vertex sits on a straight stretch of the boundary (as after
    /// [`Mesh::weld_t_junctions`](crate::mesh::Mesh::weld_t_junctions)), a
    /// corner fan would produce zero-area triangles, so the fan is anchored
    /// at the centroid instead.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let n = self.vertices.len();
        if n < 3 {
            return Vec::new();
        }
        if n > 3 && self.has_straight_corner() {
            let centroid = self
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / n as Real;
            let center = Vertex::new(Point3::from(centroid), self.plane.normal());
            return (0..n)
                .map(|i| [center, self.vertices[i], self.vertices[(i + 1) % n]])
                .collect();
        }
        let anchor = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [anchor, pair[0], pair[1]])
            .collect()
    }

    /// `true` if some vertex is (within [`EPSILON`] of) collinear with its
    /// two neighbors.
    fn has_straight_corner(&self) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let prev = self.vertices[(i + n - 1) % n].pos;
            let here = self.vertices[i].pos;
            let next = self.vertices[(i + 1) % n].pos;
            let incoming = here - prev;
            let outgoing = next - here;
            incoming.cross(&outgoing).norm() <= EPSILON * incoming.norm() * outgoing.norm()
        })
    }

    /// Axis-aligned bounds of the polygon's vertices.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Area of the polygon, summed over its fan triangles.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }
}
