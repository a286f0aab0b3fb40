//! # Nitrite R-Tree Support - Geometric Routines for Spatial Indexes
//!
//! This crate provides the geometry a storage engine's R-Tree needs on its
//! hot paths: rectangle predicates for search pruning, union and area for
//! insertion, raw-key metrics for node splits, and bounding rectangle
//! extraction from stored geometry records.
//!
//! ## Features
//!
//! - **Two Coordinate Models**: Cartesian rectangles and geographic boxes on an ellipsoid
//! - **Predicates**: Contains, Equals, Within (with the inverted-key rule), Intersects, Disjoint
//! - **Union and Area**: Planar and ellipsoidal area, never NaN where ordering matters
//! - **Raw-Key Metrics**: Area increase with rounding compensation, overlap area
//! - **MBR Extraction**: SRID-prefixed WKB records, both byte orders
//! - **No Panics at the Boundary**: Failures degrade to safe defaults and are logged
//!
//! ## Quick Start
//!
//! ```rust
//! use nitrite_rtree_support::{merge, predicates, Rectangle, SpatialReferenceSystem};
//!
//! let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
//! let b = Rectangle::new(5.0, 5.0, 15.0, 15.0);
//!
//! // Cartesian when no reference system is given
//! assert!(!predicates::contains(None, &a, &b));
//! assert_eq!(merge::join_area(None, &a, &b), 225.0);
//!
//! // Geographic area on WGS 84, in square meters
//! let wgs84 = SpatialReferenceSystem::wgs84();
//! let area = merge::area(Some(&wgs84), &a);
//! assert!(area > 1.2e12 && area < 1.3e12);
//! ```
//!
//! ## Raw Keys
//!
//! ```rust
//! use nitrite_rtree_support::raw_key::{encode_raw_key, overlap_area};
//!
//! let a = encode_raw_key(&[(0.0, 10.0), (0.0, 10.0)]);
//! let b = encode_raw_key(&[(5.0, 15.0), (5.0, 15.0)]);
//! assert_eq!(overlap_area(&a, &b, a.len()).unwrap(), 25.0);
//! ```

// Values
pub mod constants;
pub mod geometry;
pub mod rectangle;
pub mod srs;
pub mod types;

// Collaborators
pub mod catalog;
pub mod wkb;

// Geometry engines
pub mod coordinate_model;
mod geodesy;
pub mod extract;
pub mod merge;
pub mod predicates;
pub mod raw_key;

// Facade
pub mod config;
pub mod rtree_support;

pub use catalog::{fetch_srs, require_srs, InMemorySrsCatalog, SessionContext, SrsCatalog};
pub use config::{RtreeSupportBuilder, SupportConfig};
pub use coordinate_model::{ActiveModel, Cartesian, CoordinateModel, Geographic};
pub use extract::{encode_record, extract_mbr, extract_mbr_with, record_srid};
pub use geometry::{Coordinate, Geometry};
pub use raw_key::{area_increase, encode_raw_key, overlap_area, RawCoordinateKey};
pub use rectangle::Rectangle;
pub use rtree_support::RtreeSupport;
pub use srs::{Ellipsoid, SpatialReferenceSystem, SrsKind};
pub use types::{AreaIncrease, ExtractedMbr, MbrStatus, SpatialError, SpatialResult, Srid};
pub use wkb::{encode_wkb, GeometryDecoder, WkbDecoder};
