use byteorder::{LittleEndian, WriteBytesExt};
use nitrite_rtree_support::{
    encode_raw_key, encode_record, Coordinate, Geometry, InMemorySrsCatalog, Rectangle,
    RtreeSupport, SessionContext, SpatialReferenceSystem, SpatialResult, Srid, SrsCatalog,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

/// SRID of the authalic sphere registered by [`create_test_context`].
pub const SPHERE_SRID: Srid = 4047;

/// Runs a test against a fresh context, panicking with the error if either
/// step fails.
pub fn run_test<B, T>(before: B, test: T)
where
    B: FnOnce() -> SpatialResult<TestContext>,
    T: FnOnce(&TestContext) -> SpatialResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let start_time = Instant::now();
    if let Err(e) = test(&ctx) {
        panic!("Test failed after {:?}: {:?}", start_time.elapsed(), e);
    }
    log::debug!("Test passed in {:?}", start_time.elapsed());
}

#[derive(Clone)]
pub struct TestContext {
    catalog: Arc<InMemorySrsCatalog>,
    support: RtreeSupport,
    session: SessionContext,
}

impl TestContext {
    pub fn support(&self) -> &RtreeSupport {
        &self.support
    }

    pub fn catalog(&self) -> &InMemorySrsCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetches a reference system through the facade.
    pub fn srs(&self, srid: Srid) -> Option<SpatialReferenceSystem> {
        self.support.fetch_srs(&self.session, srid)
    }
}

/// Creates a context whose catalog holds WGS 84, Web Mercator and a sphere.
pub fn create_test_context() -> SpatialResult<TestContext> {
    let catalog = Arc::new(InMemorySrsCatalog::with_defaults());
    catalog.register(SpatialReferenceSystem::geographic(
        SPHERE_SRID,
        "GRS 1980 Authalic Sphere",
        6_371_007.0,
        0.0,
    )?);

    let support = RtreeSupport::builder()
        .shared_catalog(catalog.clone() as Arc<dyn SrsCatalog>)
        .build()?;

    Ok(TestContext {
        catalog,
        support,
        session: SessionContext::new(1),
    })
}

pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rectangle {
    Rectangle::new(min_x, min_y, max_x, max_y)
}

/// Encodes a rectangle as a two-dimensional raw key.
pub fn key(rect: &Rectangle) -> Vec<u8> {
    encode_raw_key(&[(rect.min_x, rect.max_x), (rect.min_y, rect.max_y)])
}

/// Builds a stored record, panicking if the geometry cannot be encoded.
pub fn record(srid: Srid, geometry: &Geometry) -> Vec<u8> {
    encode_record(srid, geometry).unwrap()
}

/// Builds a stored record around an arbitrary payload.
pub fn record_with_payload(srid: Srid, payload: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(4 + payload.len());
    record.write_u32::<LittleEndian>(srid).unwrap();
    record.extend_from_slice(payload);
    record
}

/// A polygon whose single ring traces `rect` counter-clockwise.
pub fn box_polygon(rect: &Rectangle) -> Geometry {
    Geometry::Polygon(vec![vec![
        Coordinate::new(rect.min_x, rect.min_y),
        Coordinate::new(rect.max_x, rect.min_y),
        Coordinate::new(rect.max_x, rect.max_y),
        Coordinate::new(rect.min_x, rect.max_y),
        Coordinate::new(rect.min_x, rect.min_y),
    ]])
}

pub fn line(points: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect())
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A valid rectangle with corners in `[-extent, extent]`.
pub fn random_rect(rng: &mut StdRng, extent: f64) -> Rectangle {
    let x0: f64 = rng.gen_range(-extent..extent);
    let x1: f64 = rng.gen_range(-extent..extent);
    let y0: f64 = rng.gen_range(-extent..extent);
    let y1: f64 = rng.gen_range(-extent..extent);
    rect(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}
