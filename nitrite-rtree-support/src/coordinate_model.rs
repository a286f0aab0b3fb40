//! Coordinate models.
//!
//! Every rectangle operation has the same shape under both models: convert
//! the inputs to internal units, run the model's primitive, convert back.
//! [`ActiveModel::select`] picks the model once per call from the reference
//! system in effect.

use crate::geodesy::{full_turn, normalize_longitude, segment_latitude_range, AuthalicSphere};
use crate::geometry::Geometry;
use crate::rectangle::Rectangle;
use crate::srs::{SpatialReferenceSystem, SrsKind};
use crate::types::{SpatialError, SpatialResult};

/// The capability set shared by the Cartesian and Geographic models.
///
/// Rectangles passed to `covered_by`, `equals_region`, `expand` and `area`
/// are in internal units, as produced by `to_internal`.
pub trait CoordinateModel {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Converts a rectangle from native units to internal units.
    fn to_internal(&self, rect: &Rectangle) -> SpatialResult<Rectangle>;

    /// Converts a rectangle from internal units back to native units.
    fn from_internal(&self, rect: &Rectangle) -> Rectangle;

    /// Checks if `inner` is covered by `outer`.
    fn covered_by(&self, inner: &Rectangle, outer: &Rectangle) -> bool;

    /// Checks if both rectangles denote the same region.
    fn equals_region(&self, a: &Rectangle, b: &Rectangle) -> bool;

    /// Grows `target` to cover `other`.
    fn expand(&self, target: &mut Rectangle, other: &Rectangle);

    /// Area of the rectangle.
    fn area(&self, rect: &Rectangle) -> f64;

    /// Envelope of a geometry given in native units, returned in internal
    /// units. Empty geometries yield [`Rectangle::nan`].
    fn envelope(&self, geometry: &Geometry) -> SpatialResult<Rectangle>;
}

/// Floating point equality with a tolerance relative to the magnitude of the
/// operands.
pub(crate) fn approx_equals(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= f64::EPSILON * scale
}

fn check_coordinates(rect: &Rectangle) -> SpatialResult<()> {
    if rect.has_nan() {
        return Err(SpatialError::MalformedCoordinates(format!(
            "NaN coordinate in {}",
            rect
        )));
    }
    Ok(())
}

fn vertex_envelope(geometry: &Geometry, convert: impl Fn(f64) -> f64) -> Rectangle {
    let mut found = false;
    let mut envelope = Rectangle::new(
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );
    geometry.for_each_vertex(&mut |c| {
        let (x, y) = (convert(c.x), convert(c.y));
        envelope.min_x = envelope.min_x.min(x);
        envelope.max_x = envelope.max_x.max(x);
        envelope.min_y = envelope.min_y.min(y);
        envelope.max_y = envelope.max_y.max(y);
        found = true;
    });
    if found {
        envelope
    } else {
        Rectangle::nan()
    }
}

// ============================================================================
// Cartesian
// ============================================================================

/// Planar coordinates, used as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cartesian;

impl CoordinateModel for Cartesian {
    fn name(&self) -> &'static str {
        "cartesian"
    }

    fn to_internal(&self, rect: &Rectangle) -> SpatialResult<Rectangle> {
        check_coordinates(rect)?;
        Ok(*rect)
    }

    fn from_internal(&self, rect: &Rectangle) -> Rectangle {
        *rect
    }

    fn covered_by(&self, inner: &Rectangle, outer: &Rectangle) -> bool {
        inner.min_x >= outer.min_x
            && inner.max_x <= outer.max_x
            && inner.min_y >= outer.min_y
            && inner.max_y <= outer.max_y
    }

    fn equals_region(&self, a: &Rectangle, b: &Rectangle) -> bool {
        approx_equals(a.min_x, b.min_x)
            && approx_equals(a.max_x, b.max_x)
            && approx_equals(a.min_y, b.min_y)
            && approx_equals(a.max_y, b.max_y)
    }

    fn expand(&self, target: &mut Rectangle, other: &Rectangle) {
        target.min_x = target.min_x.min(other.min_x);
        target.min_y = target.min_y.min(other.min_y);
        target.max_x = target.max_x.max(other.max_x);
        target.max_y = target.max_y.max(other.max_y);
    }

    fn area(&self, rect: &Rectangle) -> f64 {
        (rect.max_x - rect.min_x) * (rect.max_y - rect.min_y)
    }

    fn envelope(&self, geometry: &Geometry) -> SpatialResult<Rectangle> {
        Ok(vertex_envelope(geometry, |v| v))
    }
}

// ============================================================================
// Geographic
// ============================================================================

/// Absolute tolerance, in radians, for geographic equality.
const ANGULAR_EPSILON: f64 = 1e-12;

fn angles_equal(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= ANGULAR_EPSILON
}

/// Angular coordinates on an ellipsoid, handled in radians.
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    angular_unit: f64,
    sphere: AuthalicSphere,
}

impl Geographic {
    /// Builds the model for a geographic reference system.
    ///
    /// # Errors
    /// Returns an error if the reference system is Cartesian.
    pub fn new(srs: &SpatialReferenceSystem) -> SpatialResult<Self> {
        match srs.kind() {
            SrsKind::Geographic(ellipsoid) => Ok(Self {
                angular_unit: srs.angular_unit(),
                sphere: AuthalicSphere::new(ellipsoid),
            }),
            SrsKind::Cartesian => Err(SpatialError::InvalidReferenceSystem(format!(
                "SRID {} is not geographic",
                srs.id()
            ))),
        }
    }

    fn spans_full_turn(rect: &Rectangle) -> bool {
        rect.max_x - rect.min_x >= full_turn() - ANGULAR_EPSILON
    }
}

impl CoordinateModel for Geographic {
    fn name(&self) -> &'static str {
        "geographic"
    }

    fn to_internal(&self, rect: &Rectangle) -> SpatialResult<Rectangle> {
        check_coordinates(rect)?;
        Ok(rect.map(|v| v * self.angular_unit))
    }

    fn from_internal(&self, rect: &Rectangle) -> Rectangle {
        rect.map(|v| v / self.angular_unit)
    }

    fn covered_by(&self, inner: &Rectangle, outer: &Rectangle) -> bool {
        if inner.min_y < outer.min_y || inner.max_y > outer.max_y {
            return false;
        }
        if Self::spans_full_turn(outer) {
            return true;
        }
        // Shift the inner box by whole turns so its west edge is not west of
        // the outer west edge.
        let turns = ((inner.min_x - outer.min_x) / full_turn()).floor();
        let (west, east) = if turns == 0.0 {
            (inner.min_x, inner.max_x)
        } else {
            let shift = turns * full_turn();
            (inner.min_x - shift, inner.max_x - shift)
        };
        west >= outer.min_x && east <= outer.max_x
    }

    fn equals_region(&self, a: &Rectangle, b: &Rectangle) -> bool {
        if !(angles_equal(a.min_y, b.min_y) && angles_equal(a.max_y, b.max_y)) {
            return false;
        }
        match (Self::spans_full_turn(a), Self::spans_full_turn(b)) {
            (true, true) => true,
            (false, false) => {
                let west_a = normalize_longitude(a.min_x);
                let west_b = normalize_longitude(b.min_x);
                let west_equal = angles_equal(west_a, west_b)
                    || angles_equal((west_a - west_b).abs(), full_turn());
                west_equal && angles_equal(a.width(), b.width())
            }
            _ => false,
        }
    }

    fn expand(&self, target: &mut Rectangle, other: &Rectangle) {
        Cartesian.expand(target, other)
    }

    fn area(&self, rect: &Rectangle) -> f64 {
        self.sphere
            .box_area(rect.min_x, rect.max_x, rect.min_y, rect.max_y)
    }

    fn envelope(&self, geometry: &Geometry) -> SpatialResult<Rectangle> {
        let unit = self.angular_unit;
        let mut envelope = vertex_envelope(geometry, |v| v * unit);
        if envelope.has_nan() {
            return Ok(envelope);
        }

        geometry.for_each_segment(&mut |p, q| {
            let (south, north) =
                segment_latitude_range(p.x * unit, p.y * unit, q.x * unit, q.y * unit);
            envelope.min_y = envelope.min_y.min(south);
            envelope.max_y = envelope.max_y.max(north);
        });
        Ok(envelope)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The coordinate model in effect for one call.
#[derive(Debug, Clone, Copy)]
pub enum ActiveModel {
    Cartesian(Cartesian),
    Geographic(Geographic),
}

impl ActiveModel {
    /// Selects the model for a reference system. An absent or Cartesian
    /// reference system selects the Cartesian model.
    pub fn select(srs: Option<&SpatialReferenceSystem>) -> SpatialResult<Self> {
        match srs {
            Some(srs) if srs.is_geographic() => Ok(ActiveModel::Geographic(Geographic::new(srs)?)),
            _ => Ok(ActiveModel::Cartesian(Cartesian)),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $model:ident => $call:expr) => {
        match $self {
            ActiveModel::Cartesian($model) => $call,
            ActiveModel::Geographic($model) => $call,
        }
    };
}

impl CoordinateModel for ActiveModel {
    fn name(&self) -> &'static str {
        delegate!(self, m => m.name())
    }

    fn to_internal(&self, rect: &Rectangle) -> SpatialResult<Rectangle> {
        delegate!(self, m => m.to_internal(rect))
    }

    fn from_internal(&self, rect: &Rectangle) -> Rectangle {
        delegate!(self, m => m.from_internal(rect))
    }

    fn covered_by(&self, inner: &Rectangle, outer: &Rectangle) -> bool {
        delegate!(self, m => m.covered_by(inner, outer))
    }

    fn equals_region(&self, a: &Rectangle, b: &Rectangle) -> bool {
        delegate!(self, m => m.equals_region(a, b))
    }

    fn expand(&self, target: &mut Rectangle, other: &Rectangle) {
        delegate!(self, m => m.expand(target, other))
    }

    fn area(&self, rect: &Rectangle) -> f64 {
        delegate!(self, m => m.area(rect))
    }

    fn envelope(&self, geometry: &Geometry) -> SpatialResult<Rectangle> {
        delegate!(self, m => m.envelope(geometry))
    }
}
