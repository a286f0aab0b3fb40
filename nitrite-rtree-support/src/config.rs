//! Configuration of the [`RtreeSupport`](crate::RtreeSupport) facade.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{InMemorySrsCatalog, SrsCatalog};
use crate::constants::{LINE_MBR_WEIGHT, MAX_COLLECTION_DEPTH};
use crate::rtree_support::RtreeSupport;
use crate::types::{SpatialError, SpatialResult};
use crate::wkb::{GeometryDecoder, WkbDecoder};

/// Settings and collaborators shared by every call made through one
/// [`RtreeSupport`].
#[derive(Clone)]
pub struct SupportConfig {
    catalog: Arc<dyn SrsCatalog>,
    decoder: Arc<dyn GeometryDecoder>,
    line_mbr_weight: f64,
    allow_mixed_srid_index: bool,
    max_collection_depth: usize,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            catalog: Arc::new(InMemorySrsCatalog::with_defaults()),
            decoder: Arc::new(WkbDecoder::new(MAX_COLLECTION_DEPTH)),
            line_mbr_weight: LINE_MBR_WEIGHT,
            allow_mixed_srid_index: true,
            max_collection_depth: MAX_COLLECTION_DEPTH,
        }
    }
}

impl fmt::Debug for SupportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportConfig")
            .field("line_mbr_weight", &self.line_mbr_weight)
            .field("allow_mixed_srid_index", &self.allow_mixed_srid_index)
            .field("max_collection_depth", &self.max_collection_depth)
            .finish_non_exhaustive()
    }
}

impl SupportConfig {
    pub fn catalog(&self) -> &dyn SrsCatalog {
        self.catalog.as_ref()
    }

    pub fn decoder(&self) -> &dyn GeometryDecoder {
        self.decoder.as_ref()
    }

    /// Span substituted for zero-width dimensions by the area-increase
    /// metric.
    pub fn line_mbr_weight(&self) -> f64 {
        self.line_mbr_weight
    }

    /// Whether records with a nonzero SRID are accepted when no reference
    /// system is given.
    pub fn allow_mixed_srid_index(&self) -> bool {
        self.allow_mixed_srid_index
    }

    pub fn max_collection_depth(&self) -> usize {
        self.max_collection_depth
    }
}

/// Builder for [`RtreeSupport`].
///
/// Invalid settings are remembered and reported by [`build`](Self::build).
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::{InMemorySrsCatalog, RtreeSupport, SpatialReferenceSystem};
///
/// let catalog = InMemorySrsCatalog::new();
/// catalog.register(SpatialReferenceSystem::wgs84());
///
/// let support = RtreeSupport::builder()
///     .catalog(catalog)
///     .allow_mixed_srid_index(false)
///     .build()
///     .unwrap();
/// assert!(!support.config().allow_mixed_srid_index());
/// ```
#[derive(Default)]
pub struct RtreeSupportBuilder {
    error: Option<SpatialError>,
    config: SupportConfig,
    custom_decoder: bool,
}

impl RtreeSupportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference system catalog.
    pub fn catalog<C: SrsCatalog + 'static>(mut self, catalog: C) -> Self {
        self.config.catalog = Arc::new(catalog);
        self
    }

    /// Sets a shared reference system catalog.
    pub fn shared_catalog(mut self, catalog: Arc<dyn SrsCatalog>) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Sets the geometry payload decoder. A custom decoder ignores
    /// [`max_collection_depth`](Self::max_collection_depth).
    pub fn decoder<D: GeometryDecoder + 'static>(mut self, decoder: D) -> Self {
        self.config.decoder = Arc::new(decoder);
        self.custom_decoder = true;
        self
    }

    /// Sets the span substituted for zero-width dimensions by the
    /// area-increase metric. Must be finite and positive.
    pub fn line_mbr_weight(mut self, weight: f64) -> Self {
        if self.error.is_none() {
            if weight.is_finite() && weight > 0.0 {
                self.config.line_mbr_weight = weight;
            } else {
                self.error = Some(SpatialError::InvalidOperation(format!(
                    "Line MBR weight must be finite and positive, got: {}",
                    weight
                )));
            }
        }
        self
    }

    pub fn allow_mixed_srid_index(mut self, allow: bool) -> Self {
        self.config.allow_mixed_srid_index = allow;
        self
    }

    /// Sets the nesting limit for geometry collections of the default
    /// decoder.
    pub fn max_collection_depth(mut self, depth: usize) -> Self {
        self.config.max_collection_depth = depth;
        self
    }

    /// Validates the settings and creates the facade.
    ///
    /// # Errors
    /// Returns the first invalid setting.
    pub fn build(mut self) -> SpatialResult<RtreeSupport> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.custom_decoder {
            self.config.decoder = Arc::new(WkbDecoder::new(self.config.max_collection_depth));
        }
        log::debug!("Built R-Tree support with {:?}", self.config);
        Ok(RtreeSupport::from_config(self.config))
    }
}
