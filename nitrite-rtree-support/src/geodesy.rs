//! Ellipsoidal helpers for the geographic coordinate model.
//!
//! All angles are in radians.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::srs::Ellipsoid;

const TAU: f64 = 2.0 * PI;

/// Below this the ellipsoid is treated as a sphere.
const SPHERE_TOLERANCE: f64 = 1e-15;

/// Area computation on the authalic sphere of an ellipsoid.
///
/// The authalic sphere has the same surface area as the ellipsoid, and
/// mapping geodetic latitudes to authalic latitudes preserves areas of
/// latitude bands exactly. Geodesic edges are approximated by great circles
/// on that sphere, which is accurate to first order in the flattening.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AuthalicSphere {
    e2: f64,
    qp: f64,
    radius_squared: f64,
}

impl AuthalicSphere {
    pub(crate) fn new(ellipsoid: &Ellipsoid) -> Self {
        let a = ellipsoid.semi_major_axis();
        let e2 = ellipsoid.eccentricity_squared();
        let mut sphere = Self {
            e2,
            qp: 2.0,
            radius_squared: a * a,
        };
        if e2.abs() >= SPHERE_TOLERANCE {
            sphere.qp = sphere.q(1.0);
            sphere.radius_squared = a * a * sphere.qp / 2.0;
        }
        sphere
    }

    /// `atanh(e x) / e`, continued to prolate ellipsoids and the sphere.
    fn atanh_ratio(&self, x: f64) -> f64 {
        if self.e2 > 0.0 {
            let e = self.e2.sqrt();
            (e * x).atanh() / e
        } else {
            let e = (-self.e2).sqrt();
            (e * x).atan() / e
        }
    }

    fn q(&self, sin_phi: f64) -> f64 {
        (1.0 - self.e2)
            * (sin_phi / (1.0 - self.e2 * sin_phi * sin_phi) + self.atanh_ratio(sin_phi))
    }

    /// Sine of the authalic latitude for geodetic latitude `phi`.
    pub(crate) fn sin_authalic(&self, phi: f64) -> f64 {
        let sin_phi = phi.sin();
        if self.e2.abs() < SPHERE_TOLERANCE {
            return sin_phi;
        }
        (self.q(sin_phi) / self.qp).clamp(-1.0, 1.0)
    }

    /// Area of the box `[west, east] x [south, north]` whose east and west
    /// edges are meridians and whose north and south edges are geodesics.
    ///
    /// A single geodesic cannot span more than half a turn, so wider boxes
    /// are split into equal pieces.
    pub(crate) fn box_area(&self, west: f64, east: f64, south: f64, north: f64) -> f64 {
        let width = east - west;
        let pieces = (width / PI).ceil().max(1.0);
        let piece_width = width / pieces;

        let t = (piece_width / 2.0).tan();
        let north_edge = 2.0 * (t * self.sin_authalic(north)).atan();
        let south_edge = 2.0 * (t * self.sin_authalic(south)).atan();
        let excess = (north_edge - south_edge).abs();

        self.radius_squared * excess * pieces
    }
}

/// Latitude range reached by the great-circle segment between two points,
/// including the vertex of the circle when it lies inside the segment.
///
/// Returns `(min_latitude, max_latitude)`.
pub(crate) fn segment_latitude_range(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> (f64, f64) {
    let mut south = lat1.min(lat2);
    let mut north = lat1.max(lat2);

    let p1 = unit_vector(lon1, lat1);
    let p2 = unit_vector(lon2, lat2);
    let normal = cross(&p1, &p2);
    let norm = dot(&normal, &normal).sqrt();
    // Coincident or antipodal endpoints: no unique great circle.
    if norm < 1e-15 {
        return (south, north);
    }
    let n = [normal[0] / norm, normal[1] / norm, normal[2] / norm];

    let vertex_latitude = n[2].abs().min(1.0).acos();
    let towards_pole = [-n[2] * n[0], -n[2] * n[1], 1.0 - n[2] * n[2]];
    let length = dot(&towards_pole, &towards_pole).sqrt();
    if length < 1e-15 {
        // The circle is the equator.
        return (south, north);
    }
    let north_vertex = [
        towards_pole[0] / length,
        towards_pole[1] / length,
        towards_pole[2] / length,
    ];
    let south_vertex = [-north_vertex[0], -north_vertex[1], -north_vertex[2]];

    if on_minor_arc(&p1, &p2, &normal, &north_vertex) {
        north = north.max(vertex_latitude);
    }
    if on_minor_arc(&p1, &p2, &normal, &south_vertex) {
        south = south.min(-vertex_latitude);
    }

    (south.max(-FRAC_PI_2), north.min(FRAC_PI_2))
}

/// Normalizes a longitude into `[-pi, pi)`.
pub(crate) fn normalize_longitude(lon: f64) -> f64 {
    (lon + PI).rem_euclid(TAU) - PI
}

pub(crate) fn full_turn() -> f64 {
    TAU
}

fn on_minor_arc(p1: &[f64; 3], p2: &[f64; 3], normal: &[f64; 3], p: &[f64; 3]) -> bool {
    dot(&cross(p1, p), normal) >= 0.0 && dot(&cross(p, p2), normal) >= 0.0
}

fn unit_vector(lon: f64, lat: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
