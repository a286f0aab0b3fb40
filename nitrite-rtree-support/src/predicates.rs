//! Rectangle predicates used to prune R-Tree searches.
//!
//! Every predicate takes the reference system in effect (`None` meaning the
//! default Cartesian system) and two rectangles in native units. The `try_*`
//! forms report failures; the plain forms return `false` on failure and log
//! the broken invariant.
//!
//! `contains` and `equals` also require both rectangles to be ordered on
//! each axis. Debug builds assert this and panic on a reversed rectangle;
//! release builds skip the check.

use crate::coordinate_model::{ActiveModel, CoordinateModel};
use crate::rectangle::Rectangle;
use crate::srs::SpatialReferenceSystem;
use crate::types::{recover, SpatialResult};

/// No axis reversed. NaN coordinates pass so they reach the model, which
/// rejects them.
fn has_ordered_axes(rect: &Rectangle) -> bool {
    !(rect.min_x > rect.max_x || rect.min_y > rect.max_y)
}

/// Checks if `b` is covered by `a`.
pub fn try_contains(
    srs: Option<&SpatialReferenceSystem>,
    a: &Rectangle,
    b: &Rectangle,
) -> SpatialResult<bool> {
    debug_assert!(has_ordered_axes(a), "contains on reversed rectangle {}", a);
    debug_assert!(has_ordered_axes(b), "contains on reversed rectangle {}", b);

    let model = ActiveModel::select(srs)?;
    let a = model.to_internal(a)?;
    let b = model.to_internal(b)?;
    Ok(model.covered_by(&b, &a))
}

/// Checks if `b` is covered by `a`, returning `false` on failure.
pub fn contains(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
    recover("contains", try_contains(srs, a, b), false)
}

/// Checks if both rectangles denote the same region.
pub fn try_equals(
    srs: Option<&SpatialReferenceSystem>,
    a: &Rectangle,
    b: &Rectangle,
) -> SpatialResult<bool> {
    debug_assert!(has_ordered_axes(a), "equals on reversed rectangle {}", a);
    debug_assert!(has_ordered_axes(b), "equals on reversed rectangle {}", b);

    let model = ActiveModel::select(srs)?;
    let a = model.to_internal(a)?;
    let b = model.to_internal(b)?;
    Ok(model.equals_region(&a, &b))
}

/// Checks if both rectangles denote the same region, returning `false` on
/// failure.
pub fn equals(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
    recover("equals", try_equals(srs, a, b), false)
}

/// Checks if `a` is covered by `b`.
///
/// The storage engine encodes some search rectangles with min and max
/// reversed on both axes and expects the opposite answer for them. Both
/// rectangles are normalized first; the result is inverted when `a` is
/// reversed on both axes and differs from `b` in any coordinate.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::{predicates, Rectangle};
///
/// let b = Rectangle::new(0.0, 0.0, 10.0, 10.0);
/// let reversed = Rectangle::from_mbr([10.0, 0.0, 10.0, 0.0]);
/// assert!(predicates::within(None, &b, &b));
/// assert!(!predicates::within(None, &reversed, &b));
/// assert!(predicates::within(None, &reversed, &reversed));
/// ```
pub fn try_within(
    srs: Option<&SpatialReferenceSystem>,
    a: &Rectangle,
    b: &Rectangle,
) -> SpatialResult<bool> {
    let invert = a.is_inverted() && a != b;

    let model = ActiveModel::select(srs)?;
    let a = model.to_internal(&a.normalized())?;
    let b = model.to_internal(&b.normalized())?;
    let covered = model.covered_by(&a, &b);

    Ok(if invert { !covered } else { covered })
}

/// Checks if `a` is covered by `b`, returning `false` on failure.
/// See [`try_within`].
pub fn within(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
    recover("within", try_within(srs, a, b), false)
}

/// Always `true`.
///
/// Rectangles reaching this predicate come from the same index and are
/// known to overlap, so no separating-axis test is run. Debug builds assert
/// the weak ordering that any two valid rectangles satisfy.
pub fn intersects(_srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
    debug_assert!(
        !(b.min_x > a.max_x && b.max_x < a.min_x) && !(b.min_y > a.max_y && b.max_y < a.min_y),
        "intersects on unordered rectangles {} and {}",
        a,
        b
    );
    true
}

/// Negation of [`intersects`], so always `false`.
pub fn disjoint(srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
    !intersects(srs, a, b)
}
