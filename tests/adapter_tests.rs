mod support;

use adapter_plate::{
    adapter::{
        AX15_BOLT_PATTERN, BOLT_SEGMENTS, BORE_SEGMENTS, BoltPattern, Dimensions, Feature,
        PLATE_SEGMENTS, SBC_BOLT_PATTERN, bolt_holes, build_adapter,
    },
    errors::{BuildError, ValidationError},
    float_types::{PI, Real},
    io::StlFormat,
    mesh::Mesh,
    traits::CSGOps,
};
use approx::assert_relative_eq;
use std::collections::HashSet;

use crate::support::{ngon_area, temp_path};

/// Volume of the tessellated plate: the faceted disc minus the faceted bore
/// and twelve faceted holes.
fn faceted_volume(dims: &Dimensions) -> Real {
    dims.thickness
        * (ngon_area(dims.outer_radius, PLATE_SEGMENTS)
            - ngon_area(dims.center_bore_radius, BORE_SEGMENTS)
            - 12.0 * ngon_area(dims.bolt_radius, BOLT_SEGMENTS))
}

#[test]
fn bolt_holes_in_subtraction_order() {
    let holes: Vec<_> = bolt_holes().collect();
    assert_eq!(holes.len(), 12);

    let coords: Vec<(Real, Real)> = holes.iter().map(|h| (h.x, h.y)).collect();
    let expected: Vec<(Real, Real)> = SBC_BOLT_PATTERN
        .iter()
        .chain(AX15_BOLT_PATTERN.iter())
        .copied()
        .collect();
    assert_eq!(coords, expected);

    assert_eq!(
        holes[0].feature,
        Feature::BoltHole {
            pattern: BoltPattern::SmallBlockChevy,
            index: 0
        }
    );
    assert_eq!(
        holes[11].feature,
        Feature::BoltHole {
            pattern: BoltPattern::Ax15,
            index: 5
        }
    );
    assert_eq!((holes[6].x, holes[6].y), (85.0, 110.0));
}

#[test]
fn default_dimensions_are_valid() {
    let dims = Dimensions::default();
    assert_eq!(dims, Dimensions::new(25.4, 180.0, 60.0, 5.0));
    assert_eq!(dims.validate(), Ok(()));
}

#[test]
fn bore_larger_than_plate_is_rejected() {
    let dims = Dimensions {
        outer_radius: 50.0,
        center_bore_radius: 60.0,
        ..Dimensions::default()
    };
    assert_eq!(
        build_adapter(&dims).unwrap_err(),
        BuildError::Validation(ValidationError::BoreExceedsPlate {
            bore: 60.0,
            outer: 50.0
        })
    );
}

#[test]
fn zero_bore_is_rejected() {
    let dims = Dimensions {
        center_bore_radius: 0.0,
        ..Dimensions::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::NonPositive {
            name: "center_bore_radius",
            ..
        })
    ));
}

#[test]
fn negative_and_nan_dimensions_are_rejected() {
    let negative = Dimensions {
        thickness: -1.0,
        ..Dimensions::default()
    };
    assert!(matches!(
        negative.validate(),
        Err(ValidationError::NonPositive {
            name: "thickness",
            ..
        })
    ));

    let nan = Dimensions {
        bolt_radius: Real::NAN,
        ..Dimensions::default()
    };
    assert!(matches!(
        nan.validate(),
        Err(ValidationError::NonFinite {
            name: "bolt_radius",
            ..
        })
    ));
}

#[test]
fn holes_beyond_rim_are_rejected() {
    // The AX-15 holes sit about 139 mm out
    let dims = Dimensions {
        outer_radius: 140.0,
        ..Dimensions::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::HoleOutsidePlate { x, y, .. }) if (x, y) == (85.0, 110.0)
    ));
}

#[test]
fn holes_cutting_the_bore_are_rejected() {
    // The SBC hole at (100, 0) reaches in to 95 mm
    let dims = Dimensions {
        center_bore_radius: 96.0,
        ..Dimensions::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ValidationError::HoleIntersectsBore { x, y, .. }) if (x, y) == (100.0, 0.0)
    ));
}

#[test]
fn overlapping_holes_are_rejected() {
    // (76, 95) and (85, 110) are about 17.5 mm apart
    let dims = Dimensions {
        bolt_radius: 9.0,
        ..Dimensions::default()
    };
    assert_eq!(
        dims.validate(),
        Err(ValidationError::HolesOverlap {
            first: (76.0, 95.0),
            second: (85.0, 110.0)
        })
    );
}

#[test]
fn default_plate_geometry() {
    let dims = Dimensions::default();
    let plate = build_adapter(&dims).unwrap();

    let volume = plate.signed_volume();
    let solid_disc = PI * dims.outer_radius.powi(2) * dims.thickness;
    assert!(volume > 0.0);
    assert!(volume < solid_disc);

    assert_relative_eq!(volume, faceted_volume(&dims), max_relative = 1e-6);

    let analytic = PI
        * dims.thickness
        * (dims.outer_radius.powi(2)
            - dims.center_bore_radius.powi(2)
            - 12.0 * dims.bolt_radius.powi(2));
    assert_relative_eq!(volume, analytic, max_relative = 0.01);

    // No open edges anywhere: every seam left by the cuts is welded
    assert!(plate.is_manifold(), "{} open edges", plate.open_edge_count());

    let bb = plate.bounding_box();
    assert_relative_eq!(bb.mins.z, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bb.maxs.z, dims.thickness, epsilon = 1e-9);
    assert_relative_eq!(bb.maxs.x, dims.outer_radius, epsilon = 1e-9);
}

#[test]
fn every_cut_leaves_its_faces() {
    let plate = build_adapter(&Dimensions::default()).unwrap();
    let features: HashSet<Feature> = plate.polygons.iter().filter_map(|p| p.metadata).collect();

    assert!(features.contains(&Feature::Plate));
    assert!(features.contains(&Feature::CenterBore));
    for hole in bolt_holes() {
        assert!(features.contains(&hole.feature), "missing {:?}", hole.feature);
    }
    // plate + bore + twelve holes
    assert_eq!(features.len(), 14);
}

#[test]
fn volume_shrinks_as_bolt_radius_grows() {
    let volumes: Vec<Real> = [3.0, 5.0, 7.0]
        .into_iter()
        .map(|bolt_radius| {
            let dims = Dimensions {
                bolt_radius,
                ..Dimensions::default()
            };
            build_adapter(&dims).unwrap().signed_volume()
        })
        .collect();

    assert!(volumes[0] > volumes[1], "{volumes:?}");
    assert!(volumes[1] > volumes[2], "{volumes:?}");
}

#[test]
fn build_is_deterministic() {
    let dims = Dimensions::new(20.0, 170.0, 55.0, 4.5);
    let first = build_adapter(&dims).unwrap();
    let second = build_adapter(&dims).unwrap();

    assert_eq!(first.polygons.len(), second.polygons.len());
    assert_eq!(first.signed_volume(), second.signed_volume());
    assert_eq!(first.polygons, second.polygons);
}

#[test]
fn export_default_plate() -> Result<(), Box<dyn std::error::Error>> {
    let plate = build_adapter(&Dimensions::default())?;
    let path = temp_path("SBC_to_AX15_adapter.stl");
    plate.export_to_file(&path, StlFormat::Binary)?;

    let bytes = std::fs::read(&path)?;
    std::fs::remove_file(&path)?;
    assert!(bytes.len() > 84);

    let read: Mesh<()> = Mesh::from_stl(&bytes, None)?;
    assert_eq!(read.polygons.len(), plate.triangulate().polygons.len());
    Ok(())
}
