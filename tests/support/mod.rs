//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use adapter_plate::{
    float_types::Real,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};
use std::path::PathBuf;

/// Axis-aligned square of side 2 centered on `(0, 0, z)`, wound
/// counter-clockwise seen from +Z.
pub fn square<S: Clone>(z: Real, metadata: Option<S>) -> Polygon<S> {
    Polygon::new(
        vec![
            Vertex::new(Point3::new(-1.0, -1.0, z), Vector3::z()),
            Vertex::new(Point3::new(1.0, -1.0, z), Vector3::z()),
            Vertex::new(Point3::new(1.0, 1.0, z), Vector3::z()),
            Vertex::new(Point3::new(-1.0, 1.0, z), Vector3::z()),
        ],
        metadata,
    )
}

/// Right triangle in the XY plane with legs of length 1.
pub fn unit_triangle() -> Polygon<()> {
    Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        None,
    )
}

/// Area of a regular `n`-gon inscribed in a circle of radius `r`.
pub fn ngon_area(r: Real, n: usize) -> Real {
    let n = n as Real;
    0.5 * n * r * r * (std::f64::consts::TAU / n).sin()
}

/// A path under the system temp dir that is unique to this process and `name`.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("adapter-plate-{}-{name}", std::process::id()))
}
