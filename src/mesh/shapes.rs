//! Primitive solids

use crate::errors::{ValidationError, ensure_positive};
use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

impl<S: Clone> Mesh<S> {
    /// A right circular cylinder centered on the origin, its axis along +Z,
    /// spanning `z ∈ [-height/2, height/2]`.
    ///
    /// The round wall is approximated by `segments` flat quads and each cap
    /// is a single regular `segments`-gon, so the vertices lie exactly on
    /// the circle of `radius`.
    ///
    /// # Errors
    /// [`ValidationError`] if `radius` or `height` is not a finite positive
    /// number, or if `segments < 3`.
    ///
    /// # Example
    /// ```
    /// # use adapter_plate::mesh::Mesh;
    /// let rod: Mesh<()> = Mesh::cylinder(1.0, 2.0, 16, None)?;
    /// assert_eq!(rod.polygons.len(), 16 + 2);
    /// # Ok::<(), adapter_plate::errors::ValidationError>(())
    /// ```
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        ensure_positive("radius", radius)?;
        ensure_positive("height", height)?;
        if segments < 3 {
            return Err(ValidationError::TooFewSegments(segments));
        }

        let half = height * 0.5;
        let ring: Vec<(Real, Real)> = (0..segments)
            .map(|i| {
                let angle = TAU * i as Real / segments as Real;
                (angle.cos(), angle.sin())
            })
            .collect();

        let mut polygons = Vec::with_capacity(segments + 2);

        // Bottom cap, wound clockwise seen from above so it faces -Z
        let bottom: Vec<Vertex> = ring
            .iter()
            .rev()
            .map(|&(c, s)| Vertex::new(Point3::new(radius * c, radius * s, -half), -Vector3::z()))
            .collect();
        polygons.push(Polygon::with_plane(
            bottom,
            Plane::from_normal(-Vector3::z(), half),
            metadata.clone(),
        ));

        let top: Vec<Vertex> = ring
            .iter()
            .map(|&(c, s)| Vertex::new(Point3::new(radius * c, radius * s, half), Vector3::z()))
            .collect();
        polygons.push(Polygon::with_plane(
            top,
            Plane::from_normal(Vector3::z(), half),
            metadata.clone(),
        ));

        for i in 0..segments {
            let (c0, s0) = ring[i];
            let (c1, s1) = ring[(i + 1) % segments];
            let n0 = Vector3::new(c0, s0, 0.0);
            let n1 = Vector3::new(c1, s1, 0.0);
            let wall = vec![
                Vertex::new(Point3::new(radius * c0, radius * s0, -half), n0),
                Vertex::new(Point3::new(radius * c1, radius * s1, -half), n1),
                Vertex::new(Point3::new(radius * c1, radius * s1, half), n1),
                Vertex::new(Point3::new(radius * c0, radius * s0, half), n0),
            ];
            polygons.push(Polygon::new(wall, metadata.clone()));
        }

        Ok(Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        })
    }
}
