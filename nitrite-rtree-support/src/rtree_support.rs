use std::sync::Arc;

use crate::catalog::{self, SessionContext};
use crate::config::{RtreeSupportBuilder, SupportConfig};
use crate::extract;
use crate::merge;
use crate::predicates;
use crate::raw_key;
use crate::rectangle::Rectangle;
use crate::srs::SpatialReferenceSystem;
use crate::types::{AreaIncrease, ExtractedMbr, SpatialResult, Srid};

/// Entry point the storage engine holds on to.
///
/// `RtreeSupport` bundles the reference system catalog, the geometry decoder
/// and the tunables of [`SupportConfig`]. It keeps no per-call state, so one
/// instance can serve any number of threads; cloning is cheap.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::{encode_record, Geometry, Rectangle, RtreeSupport, SessionContext};
///
/// let support = RtreeSupport::default();
/// let ctx = SessionContext::new(1);
///
/// let record = encode_record(4326, &Geometry::point(10.0, 20.0)).unwrap();
/// let extracted = support.extract_record_mbr(&ctx, &record).unwrap();
/// assert_eq!(extracted.srid, 4326);
///
/// let srs = support.fetch_srs(&ctx, 4326);
/// let world = Rectangle::new(-180.0, -90.0, 180.0, 90.0);
/// assert!(support.contains(srs.as_ref(), &world, &extracted.rectangle));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RtreeSupport {
    inner: Arc<RtreeSupportInner>,
}

#[derive(Debug, Default)]
struct RtreeSupportInner {
    config: SupportConfig,
}

impl RtreeSupport {
    pub fn builder() -> RtreeSupportBuilder {
        RtreeSupportBuilder::new()
    }

    pub(crate) fn from_config(config: SupportConfig) -> Self {
        Self {
            inner: Arc::new(RtreeSupportInner { config }),
        }
    }

    pub fn config(&self) -> &SupportConfig {
        &self.inner.config
    }

    /// Looks up the reference system for `srid`. See [`catalog::fetch_srs`].
    pub fn fetch_srs(&self, ctx: &SessionContext, srid: Srid) -> Option<SpatialReferenceSystem> {
        catalog::fetch_srs(self.config().catalog(), ctx, srid)
    }

    pub fn contains(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        a: &Rectangle,
        b: &Rectangle,
    ) -> bool {
        predicates::contains(srs, a, b)
    }

    pub fn equals(&self, srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
        predicates::equals(srs, a, b)
    }

    pub fn within(&self, srs: Option<&SpatialReferenceSystem>, a: &Rectangle, b: &Rectangle) -> bool {
        predicates::within(srs, a, b)
    }

    pub fn intersects(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        a: &Rectangle,
        b: &Rectangle,
    ) -> bool {
        predicates::intersects(srs, a, b)
    }

    pub fn disjoint(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        a: &Rectangle,
        b: &Rectangle,
    ) -> bool {
        predicates::disjoint(srs, a, b)
    }

    /// Grows `a` in place to cover `b`.
    pub fn join(&self, srs: Option<&SpatialReferenceSystem>, a: &mut Rectangle, b: &Rectangle) {
        merge::join(srs, a, b)
    }

    pub fn joined(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        a: &Rectangle,
        b: &Rectangle,
    ) -> Rectangle {
        merge::joined(srs, a, b)
    }

    pub fn area(&self, srs: Option<&SpatialReferenceSystem>, rect: &Rectangle) -> f64 {
        merge::area(srs, rect)
    }

    pub fn join_area(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        a: &Rectangle,
        b: &Rectangle,
    ) -> f64 {
        merge::join_area(srs, a, b)
    }

    /// Extracts the bounding rectangle of a stored record with the
    /// configured decoder and mixed SRID policy.
    pub fn extract_mbr(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        record: &[u8],
    ) -> SpatialResult<ExtractedMbr> {
        let config = self.config();
        extract::extract_mbr_with(
            srs,
            record,
            config.decoder(),
            config.allow_mixed_srid_index(),
        )
    }

    /// Extracts the bounding rectangle of a stored record, resolving the
    /// reference system from the record's own SRID.
    ///
    /// An SRID missing from the catalog reads the record as Cartesian,
    /// subject to the mixed SRID policy.
    pub fn extract_record_mbr(
        &self,
        ctx: &SessionContext,
        record: &[u8],
    ) -> SpatialResult<ExtractedMbr> {
        let srid = extract::record_srid(record)?;
        let srs = self.fetch_srs(ctx, srid);
        self.extract_mbr(srs.as_ref(), record)
    }

    /// Area increase of raw key `a` when enlarged to cover `b`, with the
    /// configured zero-span weight.
    pub fn area_increase(&self, a: &[u8], b: &[u8], length: usize) -> SpatialResult<AreaIncrease> {
        raw_key::area_increase_weighted(a, b, length, self.config().line_mbr_weight())
    }

    pub fn overlap_area(&self, a: &[u8], b: &[u8], length: usize) -> SpatialResult<f64> {
        raw_key::overlap_area(a, b, length)
    }
}
