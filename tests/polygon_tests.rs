mod support;

use adapter_plate::mesh::{polygon::Polygon, vertex::Vertex};
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::support::{square, unit_triangle};

#[test]
fn new_derives_plane() {
    let poly = unit_triangle();
    assert_relative_eq!(poly.plane.normal(), Vector3::z(), epsilon = 1e-12);
    assert_relative_eq!(poly.plane.offset(), 0.0, epsilon = 1e-12);
    assert!(poly.metadata.is_none());
}

#[test]
fn flip_reverses_winding_and_normals() {
    let mut poly = unit_triangle();
    let original = poly.vertices.clone();
    poly.flip();

    assert_eq!(poly.vertices[0].pos, original[2].pos);
    assert_eq!(poly.vertices[2].pos, original[0].pos);
    for v in &poly.vertices {
        assert_eq!(v.normal, -Vector3::z());
    }
    assert_relative_eq!(poly.plane.normal(), -Vector3::z(), epsilon = 1e-12);
}

#[test]
fn triangulate_fans_from_first_vertex() {
    let hexagon: Polygon<()> = Polygon::new(
        (0..6)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / 6.0;
                Vertex::new(Point3::new(a.cos(), a.sin(), 0.0), Vector3::z())
            })
            .collect(),
        None,
    );

    let tris = hexagon.triangulate();
    assert_eq!(tris.len(), 4);
    for tri in &tris {
        assert_eq!(tri[0].pos, hexagon.vertices[0].pos);
        // Every fan triangle keeps the polygon's orientation
        let n = (tri[1].pos - tri[0].pos).cross(&(tri[2].pos - tri[0].pos));
        assert!(n.z > 0.0);
    }
}

#[test]
fn area() {
    assert_relative_eq!(unit_triangle().area(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(square::<()>(3.0, None).area(), 4.0, epsilon = 1e-12);
}

#[test]
fn bounding_box() {
    let poly: Polygon<()> = square(3.0, None);
    let bb = poly.bounding_box();
    assert_eq!(bb.mins, Point3::new(-1.0, -1.0, 3.0));
    assert_eq!(bb.maxs, Point3::new(1.0, 1.0, 3.0));
}
