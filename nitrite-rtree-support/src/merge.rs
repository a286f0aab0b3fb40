//! Rectangle union and area.
//!
//! These back the insertion heuristics of the R-Tree: the tree picks the
//! subtree whose covering rectangle grows the least, so area has to be a
//! total order key and never NaN.

use crate::coordinate_model::{ActiveModel, CoordinateModel};
use crate::rectangle::Rectangle;
use crate::srs::SpatialReferenceSystem;
use crate::types::{recover, SpatialResult};

/// Returns the smallest rectangle covering both `a` and `b`.
pub fn try_joined(
    srs: Option<&SpatialReferenceSystem>,
    a: &Rectangle,
    b: &Rectangle,
) -> SpatialResult<Rectangle> {
    let model = ActiveModel::select(srs)?;
    let mut union = model.to_internal(a)?;
    model.expand(&mut union, &model.to_internal(b)?);
    Ok(model.from_internal(&union))
}

/// Returns the smallest rectangle covering both `a` and `b`, or `a` itself
/// on failure.
pub fn joined(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> Rectangle {
    recover("join", try_joined(srs, a, b), *a)
}

/// Grows `a` in place to cover `b`. On failure `a` is left unchanged.
pub fn try_join(
    srs: Option<&SpatialReferenceSystem>,
    a: &mut Rectangle,
    b: &Rectangle,
) -> SpatialResult<()> {
    *a = try_joined(srs, a, b)?;
    Ok(())
}

/// Grows `a` in place to cover `b`, the out-parameter form the storage
/// engine calls. On failure `a` is left unchanged.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::{merge, Rectangle};
///
/// let mut a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
/// merge::join(None, &mut a, &Rectangle::new(5.0, 5.0, 15.0, 15.0));
/// assert_eq!(a, Rectangle::new(0.0, 0.0, 15.0, 15.0));
/// ```
pub fn join(srs: Option<&SpatialReferenceSystem>, a: &mut Rectangle, b: &Rectangle) {
    *a = joined(srs, a, b);
}

/// Area of `rect` under the active coordinate model.
///
/// Cartesian area is `width * height`. Geographic area is in square units
/// of the ellipsoid axes.
pub fn try_area(srs: Option<&SpatialReferenceSystem>, rect: &Rectangle) -> SpatialResult<f64> {
    let model = ActiveModel::select(srs)?;
    Ok(model.area(&model.to_internal(rect)?))
}

/// Area of `rect`, `0` on failure.
pub fn area(srs: Option<&SpatialReferenceSystem>, rect: &Rectangle) -> f64 {
    recover("area", try_area(srs, rect), 0.0)
}

/// Area of the union of `a` and `b`. Non-finite areas are reported as
/// `f64::MAX`.
pub fn try_join_area(
    srs: Option<&SpatialReferenceSystem>,
    a: &Rectangle,
    b: &Rectangle,
) -> SpatialResult<f64> {
    let model = ActiveModel::select(srs)?;
    let mut union = model.to_internal(a)?;
    model.expand(&mut union, &model.to_internal(b)?);

    let area = model.area(&union);
    if area.is_finite() {
        Ok(area)
    } else {
        Ok(f64::MAX)
    }
}

/// Area of the union of `a` and `b`, never NaN or infinite.
///
/// A failed computation also yields `f64::MAX`, so a corrupt entry ranks as
/// the most expensive candidate when the union area orders insertion.
pub fn join_area(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> f64 {
    recover("join_area", try_join_area(srs, a, b), f64::MAX)
}
