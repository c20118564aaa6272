//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon};
use crate::traits::CSGOps;
use nalgebra::{Matrix4, Point3};
use std::sync::OnceLock;

pub mod bsp;
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod triangulated;
pub mod vertex;

/// A closed solid described by a soup of convex polygons.
///
/// `S` is a per-polygon metadata tag; faces produced by a boolean operation
/// keep the tag of the operand they came from.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone> {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone> Mesh<S> {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh
    }

    /// `true` when the mesh has no faces at all.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        polys
            .iter()
            .cloned()
            .partition(|p| p.bounding_box().intersects(other_bb))
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |tri| {
                    Polygon::with_plane(tri.to_vec(), poly.plane.clone(), poly.metadata.clone())
                })
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles)
    }

    /// Signed volume enclosed by the mesh.
    ///
    /// Sums the signed volumes of the tetrahedra spanned by the origin and
    /// every triangle. Positive for an outward-facing closed surface; an open
    /// surface gives a meaningless value.
    pub fn signed_volume(&self) -> Real {
        let six_volume: Real = self
            .polygons
            .iter()
            .flat_map(Polygon::triangulate)
            .map(|[a, b, c]| {
                let cross = b.pos.coords.cross(&c.pos.coords);
                a.pos.coords.dot(&cross)
            })
            .sum();

        six_volume / 6.0
    }

    /// Absolute value of [`Mesh::signed_volume`].
    pub fn volume(&self) -> Real {
        self.signed_volume().abs()
    }

    /// Total area of all faces.
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }
}

impl<S: Clone> CSGOps for Mesh<S> {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        if self.is_empty() {
            return Mesh::new();
        }

        // avoid splitting obvious non‑intersecting faces
        let (mut a_clip, mut a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        if a_clip.is_empty() {
            // `other` is clear of every face; only the full tree can tell
            // whether it sits in our interior.
            a_clip = std::mem::take(&mut a_passthru);
        }
        let (b_clip, _b_passthru) = Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Normals are carried through the inverse transpose; a singular matrix
    /// leaves them untouched. Planes are rebuilt from the moved vertices.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let normal_mat = mat
            .try_inverse()
            .map_or_else(Matrix4::identity, |inv| inv.transpose());
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.transform(mat, &normal_mat);
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
            poly.bounding_box = OnceLock::new();
        }

        mesh.invalidate_bounding_box();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    ///
    /// An empty mesh reports a degenerate box at the origin.
    ///
    /// [`parry3d::bounding_volume::Aabb`]: crate::float_types::parry3d::bounding_volume::Aabb
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            self.polygons
                .iter()
                .map(Polygon::bounding_box)
                .reduce(|acc, bb| acc.merged(&bb))
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
