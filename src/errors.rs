//! Validation and build errors

use crate::float_types::Real;

/// Problems with the dimensions or primitives handed to the geometry code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (NonPositive) A length that must be strictly positive is zero or negative
    #[error("(NonPositive) {name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: Real },
    /// (NonFinite) A length is NaN or infinite
    #[error("(NonFinite) {name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: Real },
    /// (TooFewSegments) A round primitive needs at least three sides
    #[error("(TooFewSegments) a cylinder needs at least 3 segments, got {0}")]
    TooFewSegments(usize),
    /// (BoreExceedsPlate) The center bore would remove the whole plate
    #[error("(BoreExceedsPlate) center bore radius {bore} must be smaller than outer radius {outer}")]
    BoreExceedsPlate { bore: Real, outer: Real },
    /// (HoleOutsidePlate) A bolt hole crosses the outer edge of the plate
    #[error("(HoleOutsidePlate) bolt hole at ({x}, {y}) reaches radius {reach}, beyond outer radius {outer}")]
    HoleOutsidePlate { x: Real, y: Real, reach: Real, outer: Real },
    /// (HoleIntersectsBore) A bolt hole cuts into the center bore
    #[error("(HoleIntersectsBore) bolt hole at ({x}, {y}) comes within radius {reach} of center, inside bore radius {bore}")]
    HoleIntersectsBore { x: Real, y: Real, reach: Real, bore: Real },
    /// (HolesOverlap) Two bolt holes intersect each other
    #[error("(HolesOverlap) bolt holes at ({}, {}) and ({}, {}) overlap", .first.0, .first.1, .second.0, .second.1)]
    HolesOverlap { first: (Real, Real), second: (Real, Real) },
}

/// Failure to produce an adapter solid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The boolean operations consumed every face of the plate
    #[error("boolean difference produced an empty solid")]
    EmptyResult,
}

/// Fail with [`ValidationError::NonFinite`] or [`ValidationError::NonPositive`]
/// unless `value` is a finite, strictly positive length.
pub(crate) fn ensure_positive(name: &'static str, value: Real) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { name, value });
    }
    Ok(())
}
