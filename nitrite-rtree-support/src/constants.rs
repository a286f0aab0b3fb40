//! Constants for the R-Tree support routines.

/// Size of the SRID prefix of a stored geometry record
pub const SRID_SIZE: usize = 4;

/// Bytes per (min, max) pair of a raw coordinate key
pub const KEY_SEGMENT_LEN: usize = 2 * std::mem::size_of::<f64>();

/// Span substituted for a zero-width dimension in the area-increase metric,
/// so points and lines still contribute a nonzero factor
pub const LINE_MBR_WEIGHT: f64 = 0.001;

/// Default nesting limit for geometry collections in the WKB decoder
pub const MAX_COLLECTION_DEPTH: usize = 32;

/// SRID of WGS 84
pub const WGS84_SRID: u32 = 4326;

/// WGS 84 semi-major axis in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS 84 inverse flattening
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// SRID of the Web Mercator projection
pub const WEB_MERCATOR_SRID: u32 = 3857;
