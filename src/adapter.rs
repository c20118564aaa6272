//! The SBC Gen-I (350) to Jeep AX-15 (4.0L) adapter plate.
//!
//! The plate is a disc with a center bore and two rings of six bolt holes:
//! one matching the small-block Chevy bellhousing face and one matching the
//! AX-15 transmission. Hole positions are reference values; verify them
//! against the actual parts before machining.

use crate::config::{
    DEFAULT_BOLT_RADIUS, DEFAULT_CENTER_BORE_RADIUS, DEFAULT_OUTER_RADIUS, DEFAULT_THICKNESS,
};
use crate::errors::{BuildError, ValidationError, ensure_positive};
use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::traits::CSGOps;
use tracing::{debug, info};

/// Bolt circle of the small-block Chevy side, mm from the plate center.
pub const SBC_BOLT_PATTERN: [(Real, Real); 6] = [
    (76.0, 95.0),
    (-76.0, 95.0),
    (100.0, 0.0),
    (76.0, -95.0),
    (-76.0, -95.0),
    (-100.0, 0.0),
];

/// Bolt circle of the AX-15 side, mm from the plate center.
pub const AX15_BOLT_PATTERN: [(Real, Real); 6] = [
    (85.0, 110.0),
    (-85.0, 110.0),
    (120.0, 0.0),
    (85.0, -110.0),
    (-85.0, -110.0),
    (-120.0, 0.0),
];

/// Sides of the polygon approximating the plate rim.
pub const PLATE_SEGMENTS: usize = 160;
/// Sides of the polygon approximating the center bore.
pub const BORE_SEGMENTS: usize = 80;
/// Sides of the polygon approximating each bolt hole.
pub const BOLT_SEGMENTS: usize = 48;
/// Extra length given to every cutter, split evenly above and below the
/// plate, so no cutter cap is coplanar with a plate face.
pub const CUTTER_OVERTRAVEL: Real = 2.0;

/// Which half of the adapter a bolt hole belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoltPattern {
    /// Engine side
    SmallBlockChevy,
    /// Transmission side
    Ax15,
}

impl BoltPattern {
    /// Subtraction order: engine side first, then transmission side.
    pub const ALL: [BoltPattern; 2] = [BoltPattern::SmallBlockChevy, BoltPattern::Ax15];

    pub const fn coordinates(self) -> &'static [(Real, Real)] {
        match self {
            BoltPattern::SmallBlockChevy => &SBC_BOLT_PATTERN,
            BoltPattern::Ax15 => &AX15_BOLT_PATTERN,
        }
    }
}

/// Polygon metadata: the primitive a face of the finished plate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Plate,
    CenterBore,
    BoltHole { pattern: BoltPattern, index: usize },
}

/// A bolt hole center together with the feature tag its faces will carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltHole {
    pub feature: Feature,
    pub x: Real,
    pub y: Real,
}

/// Every bolt hole in subtraction order: the six SBC holes, then the six
/// AX-15 holes, each table in its declared order.
pub fn bolt_holes() -> impl Iterator<Item = BoltHole> {
    BoltPattern::ALL.into_iter().flat_map(|pattern| {
        pattern
            .coordinates()
            .iter()
            .enumerate()
            .map(move |(index, &(x, y))| BoltHole {
                feature: Feature::BoltHole { pattern, index },
                x,
                y,
            })
    })
}

/// Plate dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub thickness: Real,
    pub outer_radius: Real,
    pub center_bore_radius: Real,
    pub bolt_radius: Real,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            center_bore_radius: DEFAULT_CENTER_BORE_RADIUS,
            bolt_radius: DEFAULT_BOLT_RADIUS,
        }
    }
}

impl Dimensions {
    pub const fn new(
        thickness: Real,
        outer_radius: Real,
        center_bore_radius: Real,
        bolt_radius: Real,
    ) -> Self {
        Self {
            thickness,
            outer_radius,
            center_bore_radius,
            bolt_radius,
        }
    }

    /// Check that the dimensions describe a plate that can actually be cut.
    ///
    /// Every length must be finite and positive, the bore must be smaller
    /// than the plate, and each bolt hole must stay clear of the rim, the
    /// bore and every other hole. Tangency counts as a collision since it
    /// would leave a zero-width wall.
    ///
    /// # Errors
    /// The first [`ValidationError`] found, in the order listed above.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_positive("thickness", self.thickness)?;
        ensure_positive("outer_radius", self.outer_radius)?;
        ensure_positive("center_bore_radius", self.center_bore_radius)?;
        ensure_positive("bolt_radius", self.bolt_radius)?;

        if self.center_bore_radius >= self.outer_radius {
            return Err(ValidationError::BoreExceedsPlate {
                bore: self.center_bore_radius,
                outer: self.outer_radius,
            });
        }

        let holes: Vec<BoltHole> = bolt_holes().collect();
        for hole in &holes {
            let distance = hole.x.hypot(hole.y);
            let outer_reach = distance + self.bolt_radius;
            if outer_reach >= self.outer_radius {
                return Err(ValidationError::HoleOutsidePlate {
                    x: hole.x,
                    y: hole.y,
                    reach: outer_reach,
                    outer: self.outer_radius,
                });
            }
            let inner_reach = distance - self.bolt_radius;
            if inner_reach <= self.center_bore_radius {
                return Err(ValidationError::HoleIntersectsBore {
                    x: hole.x,
                    y: hole.y,
                    reach: inner_reach,
                    bore: self.center_bore_radius,
                });
            }
        }

        for (i, first) in holes.iter().enumerate() {
            for second in &holes[i + 1..] {
                let gap = (first.x - second.x).hypot(first.y - second.y);
                if gap <= 2.0 * self.bolt_radius {
                    return Err(ValidationError::HolesOverlap {
                        first: (first.x, first.y),
                        second: (second.x, second.y),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Build the adapter plate.
///
/// The plate sits on the XY plane (`0 ≤ z ≤ thickness`). The center bore is
/// subtracted first, then the twelve bolt holes in [`bolt_holes`] order.
/// Every cutter is [`CUTTER_OVERTRAVEL`] longer than the plate is thick so
/// the cuts go cleanly through. The seams the cuts leave in the faces are
/// welded afterwards, so the result is a closed, printable surface.
///
/// # Errors
/// [`BuildError::Validation`] if [`Dimensions::validate`] rejects `dims`, or
/// [`BuildError::EmptyResult`] if the subtractions leave no faces.
///
/// # Example
/// ```no_run
/// # use adapter_plate::adapter::{build_adapter, Dimensions};
/// let plate = build_adapter(&Dimensions::default())?;
/// assert!(plate.volume() > 0.0);
/// # Ok::<(), adapter_plate::errors::BuildError>(())
/// ```
pub fn build_adapter(dims: &Dimensions) -> Result<Mesh<Feature>, BuildError> {
    dims.validate()?;
    info!(
        thickness = dims.thickness,
        outer_radius = dims.outer_radius,
        center_bore_radius = dims.center_bore_radius,
        bolt_radius = dims.bolt_radius,
        "building adapter plate"
    );

    let mid_z = dims.thickness / 2.0;
    let cutter_height = dims.thickness + CUTTER_OVERTRAVEL;

    let plate = Mesh::cylinder(
        dims.outer_radius,
        dims.thickness,
        PLATE_SEGMENTS,
        Some(Feature::Plate),
    )?
    .float();

    let bore = Mesh::cylinder(
        dims.center_bore_radius,
        cutter_height,
        BORE_SEGMENTS,
        Some(Feature::CenterBore),
    )?
    .translate(0.0, 0.0, mid_z);

    let mut adapter = plate.difference(&bore);
    debug!(polygons = adapter.polygons.len(), "center bore cut");

    for hole in bolt_holes() {
        let cutter = Mesh::cylinder(
            dims.bolt_radius,
            cutter_height,
            BOLT_SEGMENTS,
            Some(hole.feature),
        )?
        .translate(hole.x, hole.y, mid_z);

        adapter = adapter.difference(&cutter);
        debug!(
            x = hole.x,
            y = hole.y,
            polygons = adapter.polygons.len(),
            "bolt hole cut"
        );
    }

    let adapter = adapter.weld_t_junctions(EPSILON);
    debug!(polygons = adapter.polygons.len(), "seams welded");

    if adapter.is_empty() {
        return Err(BuildError::EmptyResult);
    }

    info!(polygons = adapter.polygons.len(), "adapter plate built");
    Ok(adapter)
}
