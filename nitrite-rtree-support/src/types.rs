//! Core types shared by the R-Tree support routines.
//!
//! This module defines:
//! - Error types and result types
//! - SRID alias and the extraction status codes handed to the storage engine
//! - Result structs of the raw-key metrics

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::rectangle::Rectangle;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in R-Tree support operations
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("Invalid reference system: {0}")]
    InvalidReferenceSystem(String),

    #[error("Spatial reference system {0} not found")]
    SrsNotFound(Srid),

    #[error("Malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("Geometry decode error: {0}")]
    Decode(String),

    #[error("Truncated geometry payload: {0}")]
    Truncated(#[from] io::Error),

    #[error("SRID mismatch: reference system is {expected}, record carries {found}")]
    SridMismatch { expected: Srid, found: Srid },

    #[error("Record with SRID {0} rejected: mixed SRID indexes are disabled")]
    MixedSridRejected(Srid),

    #[error("Invalid key encoding: {0}")]
    KeyEncoding(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for R-Tree support operations
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Spatial reference system identifier. `0` means "no reference system".
pub type Srid = u32;

/// Unwraps a boundary result, falling back to `default` on failure.
///
/// Failures here mean an internal computation broke on input the storage
/// engine considers valid, so they are reported as invariant violations.
pub(crate) fn recover<T>(operation: &str, result: SpatialResult<T>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::error!("Internal invariant violated in {}: {}", operation, err);
            default
        }
    }
}

// ============================================================================
// Extraction Results
// ============================================================================

/// Status code reported to the storage engine by MBR extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbrStatus {
    Success,
    Failure,
}

impl MbrStatus {
    /// The numeric code the storage engine expects (`0` or `-1`).
    pub fn code(&self) -> i32 {
        match self {
            MbrStatus::Success => 0,
            MbrStatus::Failure => -1,
        }
    }
}

impl<T> From<&SpatialResult<T>> for MbrStatus {
    fn from(result: &SpatialResult<T>) -> Self {
        if result.is_ok() {
            MbrStatus::Success
        } else {
            MbrStatus::Failure
        }
    }
}

/// Bounding rectangle extracted from a stored geometry record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMbr {
    /// Envelope in the native units of the record's reference system
    pub rectangle: Rectangle,
    /// SRID read from the record prefix
    pub srid: Srid,
}

// ============================================================================
// Raw-Key Metrics
// ============================================================================

/// Result of the area-increase metric on two raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaIncrease {
    /// Growth of the covering area caused by adding the second key
    pub delta: f64,
    /// Area of the rectangle covering both keys
    pub union_area: f64,
}
