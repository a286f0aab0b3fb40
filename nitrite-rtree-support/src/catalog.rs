//! Reference system lookup.
//!
//! The storage engine resolves an SRID to a reference system once per call
//! and passes the result into the geometric routines. The lookup itself is a
//! collaborator behind the [`SrsCatalog`] trait; the session it runs in is
//! passed explicitly as a [`SessionContext`].

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::srs::SpatialReferenceSystem;
use crate::types::{SpatialError, SpatialResult, Srid};

/// Session information handed to the catalog on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: u64,
}

impl SessionContext {
    pub fn new(session_id: u64) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }
}

/// A source of spatial reference system descriptors.
pub trait SrsCatalog: Send + Sync {
    /// Looks up the reference system for `srid`.
    ///
    /// Returns `Ok(None)` when the catalog has no such entry and `Err` when
    /// the lookup itself failed.
    fn acquire(
        &self,
        ctx: &SessionContext,
        srid: Srid,
    ) -> SpatialResult<Option<Arc<SpatialReferenceSystem>>>;
}

/// Fetches an owned snapshot of the reference system for `srid`.
///
/// SRID 0, unknown SRIDs and failed lookups all yield `None`, which the
/// geometric routines treat as the default Cartesian system.
pub fn fetch_srs(
    catalog: &dyn SrsCatalog,
    ctx: &SessionContext,
    srid: Srid,
) -> Option<SpatialReferenceSystem> {
    if srid == 0 {
        return None;
    }

    match catalog.acquire(ctx, srid) {
        Ok(Some(srs)) => Some(srs.as_ref().clone()),
        Ok(None) => {
            log::debug!("No spatial reference system found for SRID {}", srid);
            None
        }
        Err(err) => {
            log::warn!(
                "Spatial reference system lookup for SRID {} failed in session {}: {}",
                srid,
                ctx.session_id(),
                err
            );
            None
        }
    }
}

/// Like [`fetch_srs`] but reports a missing entry as an error, for callers
/// that require a reference system.
pub fn require_srs(
    catalog: &dyn SrsCatalog,
    ctx: &SessionContext,
    srid: Srid,
) -> SpatialResult<SpatialReferenceSystem> {
    fetch_srs(catalog, ctx, srid).ok_or(SpatialError::SrsNotFound(srid))
}

/// A catalog kept in memory.
#[derive(Default)]
pub struct InMemorySrsCatalog {
    entries: RwLock<HashMap<Srid, Arc<SpatialReferenceSystem>>>,
}

impl InMemorySrsCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding WGS 84 (4326) and Web Mercator (3857).
    pub fn with_defaults() -> Self {
        let catalog = Self::new();
        catalog.register(SpatialReferenceSystem::wgs84());
        catalog.register(SpatialReferenceSystem::web_mercator());
        catalog
    }

    /// Adds or replaces an entry, returning the replaced one.
    pub fn register(&self, srs: SpatialReferenceSystem) -> Option<Arc<SpatialReferenceSystem>> {
        self.entries.write().insert(srs.id(), Arc::new(srs))
    }

    /// Removes an entry.
    pub fn remove(&self, srid: Srid) -> Option<Arc<SpatialReferenceSystem>> {
        self.entries.write().remove(&srid)
    }

    pub fn contains(&self, srid: Srid) -> bool {
        self.entries.read().contains_key(&srid)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SrsCatalog for InMemorySrsCatalog {
    fn acquire(
        &self,
        _ctx: &SessionContext,
        srid: Srid,
    ) -> SpatialResult<Option<Arc<SpatialReferenceSystem>>> {
        Ok(self.entries.read().get(&srid).cloned())
    }
}
