//! Spatial reference system descriptors.
//!
//! A reference system tells the support routines how to read a coordinate
//! pair: as planar values used as-is (Cartesian), or as angles on an
//! ellipsoid of revolution (Geographic). Descriptors are immutable values;
//! the catalog hands out clones and nothing here caches them.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::{self, Display};

use crate::constants::{
    WEB_MERCATOR_SRID, WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS, WGS84_SRID,
};
use crate::types::{SpatialError, SpatialResult, Srid};

/// Radians per degree, the default angular unit of geographic systems.
pub const DEGREE: f64 = PI / 180.0;

/// An ellipsoid of revolution described by its two semi axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    semi_major_axis: f64,
    semi_minor_axis: f64,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its semi-major axis and inverse flattening.
    ///
    /// An inverse flattening of `0` describes a sphere.
    ///
    /// # Errors
    /// Returns an error if the axis is not a positive finite number or the
    /// inverse flattening is neither `0` nor greater than `1`.
    pub fn from_inverse_flattening(
        semi_major_axis: f64,
        inverse_flattening: f64,
    ) -> SpatialResult<Self> {
        if !(semi_major_axis.is_finite() && semi_major_axis > 0.0) {
            return Err(SpatialError::InvalidReferenceSystem(format!(
                "Semi-major axis must be positive, got: {}",
                semi_major_axis
            )));
        }
        if inverse_flattening != 0.0 && !(inverse_flattening.is_finite() && inverse_flattening > 1.0)
        {
            return Err(SpatialError::InvalidReferenceSystem(format!(
                "Inverse flattening must be 0 or greater than 1, got: {}",
                inverse_flattening
            )));
        }

        let semi_minor_axis = if inverse_flattening == 0.0 {
            semi_major_axis
        } else {
            semi_major_axis * (1.0 - 1.0 / inverse_flattening)
        };
        Ok(Self {
            semi_major_axis,
            semi_minor_axis,
        })
    }

    /// Creates an ellipsoid directly from both semi axes.
    pub fn from_axes(semi_major_axis: f64, semi_minor_axis: f64) -> SpatialResult<Self> {
        for (name, axis) in [("Semi-major", semi_major_axis), ("Semi-minor", semi_minor_axis)] {
            if !(axis.is_finite() && axis > 0.0) {
                return Err(SpatialError::InvalidReferenceSystem(format!(
                    "{} axis must be positive, got: {}",
                    name, axis
                )));
            }
        }
        Ok(Self {
            semi_major_axis,
            semi_minor_axis,
        })
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    /// First eccentricity squared. Negative for prolate ellipsoids.
    pub fn eccentricity_squared(&self) -> f64 {
        let ratio = self.semi_minor_axis / self.semi_major_axis;
        1.0 - ratio * ratio
    }
}

/// The two coordinate models a reference system can describe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SrsKind {
    /// Planar coordinates in native units
    Cartesian,
    /// Angular coordinates on an ellipsoid
    Geographic(Ellipsoid),
}

/// A spatial reference system as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialReferenceSystem {
    id: Srid,
    name: String,
    kind: SrsKind,
    /// Radians per native angular unit, only meaningful for geographic systems
    angular_unit: f64,
}

impl SpatialReferenceSystem {
    /// Creates a Cartesian (projected) reference system.
    pub fn cartesian(id: Srid, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: SrsKind::Cartesian,
            angular_unit: 1.0,
        }
    }

    /// Creates a geographic reference system measured in degrees.
    ///
    /// # Errors
    /// Returns an error if the ellipsoid parameters are invalid.
    pub fn geographic(
        id: Srid,
        name: &str,
        semi_major_axis: f64,
        inverse_flattening: f64,
    ) -> SpatialResult<Self> {
        let ellipsoid = Ellipsoid::from_inverse_flattening(semi_major_axis, inverse_flattening)?;
        Ok(Self {
            id,
            name: name.to_string(),
            kind: SrsKind::Geographic(ellipsoid),
            angular_unit: DEGREE,
        })
    }

    /// WGS 84, the default geographic system.
    pub fn wgs84() -> Self {
        Self {
            id: WGS84_SRID,
            name: "WGS 84".to_string(),
            kind: SrsKind::Geographic(Ellipsoid {
                semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
                semi_minor_axis: WGS84_SEMI_MAJOR_AXIS * (1.0 - 1.0 / WGS84_INVERSE_FLATTENING),
            }),
            angular_unit: DEGREE,
        }
    }

    /// WGS 84 / Pseudo-Mercator, a projected Cartesian system.
    pub fn web_mercator() -> Self {
        Self::cartesian(WEB_MERCATOR_SRID, "WGS 84 / Pseudo-Mercator")
    }

    /// Replaces the angular unit, given in radians per native unit.
    ///
    /// # Errors
    /// Returns an error if the unit is not a positive finite number.
    pub fn with_angular_unit(mut self, radians_per_unit: f64) -> SpatialResult<Self> {
        if !(radians_per_unit.is_finite() && radians_per_unit > 0.0) {
            return Err(SpatialError::InvalidReferenceSystem(format!(
                "Angular unit must be positive, got: {}",
                radians_per_unit
            )));
        }
        self.angular_unit = radians_per_unit;
        Ok(self)
    }

    pub fn id(&self) -> Srid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SrsKind {
        &self.kind
    }

    pub fn is_cartesian(&self) -> bool {
        matches!(self.kind, SrsKind::Cartesian)
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self.kind, SrsKind::Geographic(_))
    }

    /// The ellipsoid of a geographic system, `None` for Cartesian ones.
    pub fn ellipsoid(&self) -> Option<&Ellipsoid> {
        match &self.kind {
            SrsKind::Geographic(ellipsoid) => Some(ellipsoid),
            SrsKind::Cartesian => None,
        }
    }

    /// Semi-major axis, `0` for Cartesian systems.
    pub fn semi_major_axis(&self) -> f64 {
        self.ellipsoid().map_or(0.0, |e| e.semi_major_axis())
    }

    /// Semi-minor axis, `0` for Cartesian systems.
    pub fn semi_minor_axis(&self) -> f64 {
        self.ellipsoid().map_or(0.0, |e| e.semi_minor_axis())
    }

    pub fn angular_unit(&self) -> f64 {
        self.angular_unit
    }

    /// Converts a value in native angular units to radians.
    pub fn to_radians(&self, d: f64) -> f64 {
        debug_assert!(self.is_geographic());
        d * self.angular_unit
    }

    /// Converts a value in radians to native angular units.
    pub fn from_radians(&self, r: f64) -> f64 {
        debug_assert!(self.is_geographic());
        r / self.angular_unit
    }
}

impl Display for SpatialReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SrsKind::Cartesian => write!(f, "SRS({}, \"{}\", cartesian)", self.id, self.name),
            SrsKind::Geographic(e) => write!(
                f,
                "SRS({}, \"{}\", geographic a={} b={})",
                self.id,
                self.name,
                e.semi_major_axis(),
                e.semi_minor_axis()
            ),
        }
    }
}
