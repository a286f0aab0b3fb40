//! Metrics over raw coordinate keys.
//!
//! The R-Tree stores node keys as flat arrays of `(min, max)` pairs of
//! 8-byte floats in native byte order, one pair per dimension. Insertion and
//! node splitting score candidates with the two metrics below without
//! decoding keys into rectangles, so there is no reference system here and
//! units do not matter.

use byteorder::{ByteOrder, NativeEndian};

use crate::constants::{KEY_SEGMENT_LEN, LINE_MBR_WEIGHT};
use crate::types::{AreaIncrease, SpatialError, SpatialResult};

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// A borrowed raw coordinate key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoordinateKey<'a> {
    bytes: &'a [u8],
}

impl<'a> RawCoordinateKey<'a> {
    /// Wraps `bytes`, whose length must be a multiple of 16.
    pub fn new(bytes: &'a [u8]) -> SpatialResult<Self> {
        if bytes.len() % KEY_SEGMENT_LEN != 0 {
            return Err(SpatialError::KeyEncoding(format!(
                "Key length {} is not a multiple of {}",
                bytes.len(),
                KEY_SEGMENT_LEN
            )));
        }
        Ok(Self { bytes })
    }

    /// Number of dimensions encoded in the key.
    pub fn dimensions(&self) -> usize {
        self.bytes.len() / KEY_SEGMENT_LEN
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The `(min, max)` pair of every dimension.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        let bytes = self.bytes;
        bytes.chunks_exact(KEY_SEGMENT_LEN).map(|segment| {
            (
                NativeEndian::read_f64(&segment[..F64_SIZE]),
                NativeEndian::read_f64(&segment[F64_SIZE..]),
            )
        })
    }
}

/// Encodes `(min, max)` pairs as a raw coordinate key.
pub fn encode_raw_key(pairs: &[(f64, f64)]) -> Vec<u8> {
    let mut bytes = vec![0u8; pairs.len() * KEY_SEGMENT_LEN];
    for (segment, (min, max)) in bytes.chunks_exact_mut(KEY_SEGMENT_LEN).zip(pairs) {
        NativeEndian::write_f64(&mut segment[..F64_SIZE], *min);
        NativeEndian::write_f64(&mut segment[F64_SIZE..], *max);
    }
    bytes
}

/// Takes the first `length` bytes of both keys.
fn key_pair<'a>(
    a: &'a [u8],
    b: &'a [u8],
    length: usize,
) -> SpatialResult<(RawCoordinateKey<'a>, RawCoordinateKey<'a>)> {
    if length > a.len() || length > b.len() {
        return Err(SpatialError::KeyEncoding(format!(
            "Key length {} exceeds the key buffers ({} and {} bytes)",
            length,
            a.len(),
            b.len()
        )));
    }
    Ok((
        RawCoordinateKey::new(&a[..length])?,
        RawCoordinateKey::new(&b[..length])?,
    ))
}

/// Growth of the area of key `a` when it is enlarged to also cover key `b`.
///
/// Zero spans are replaced by [`LINE_MBR_WEIGHT`] so points and lines still
/// compare. See [`area_increase_weighted`].
pub fn area_increase(a: &[u8], b: &[u8], length: usize) -> SpatialResult<AreaIncrease> {
    area_increase_weighted(a, b, length, LINE_MBR_WEIGHT)
}

/// Growth of the area of key `a` when it is enlarged to also cover key `b`,
/// substituting `line_weight` for zero spans.
///
/// With huge coordinates the union area and the area of `a` can round to the
/// same value although `b` sticks out of `a` (`3.29e284 - 100 == 3.29e284`).
/// While the running products are equal, the amount by which `b` sticks out
/// on each axis (or the union span when it does not) is multiplied into a
/// separate accumulator, and that accumulator is returned as the delta when
/// the final products are still equal.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::raw_key::{area_increase, encode_raw_key};
///
/// let a = encode_raw_key(&[(0.0, 10.0), (0.0, 10.0)]);
/// let b = encode_raw_key(&[(5.0, 15.0), (5.0, 15.0)]);
/// let increase = area_increase(&a, &b, a.len()).unwrap();
/// assert_eq!(increase.delta, 125.0);
/// assert_eq!(increase.union_area, 225.0);
/// ```
pub fn area_increase_weighted(
    a: &[u8],
    b: &[u8],
    length: usize,
    line_weight: f64,
) -> SpatialResult<AreaIncrease> {
    let (a, b) = key_pair(a, b, length)?;

    let mut a_area = 1.0;
    let mut union_area = 1.0;
    let mut compensation = 1.0;

    for ((a_min, a_max), (b_min, b_max)) in a.pairs().zip(b.pairs()) {
        let span = a_max - a_min;
        a_area *= if span == 0.0 { line_weight } else { span };

        let union_span = a_max.max(b_max) - a_min.min(b_min);
        union_area *= if union_span == 0.0 {
            line_weight
        } else {
            union_span
        };

        if union_area == a_area {
            if b_min < a_min || b_max > a_max {
                compensation *= (a_max.max(b_max) - a_max) + (a_min - a_min.min(b_min));
            } else {
                compensation *= union_span;
            }
        }
    }

    if union_area == a_area && compensation != 1.0 {
        log::trace!(
            "Area increase lost to rounding at area {}, using compensated delta {}",
            a_area,
            compensation
        );
        return Ok(AreaIncrease {
            delta: compensation,
            union_area,
        });
    }

    Ok(AreaIncrease {
        delta: union_area - a_area,
        union_area,
    })
}

/// Area shared by keys `a` and `b`, `0` if they are disjoint on any
/// dimension.
pub fn overlap_area(a: &[u8], b: &[u8], length: usize) -> SpatialResult<f64> {
    let (a, b) = key_pair(a, b, length)?;

    let mut area = 1.0;
    for ((a_min, a_max), (b_min, b_max)) in a.pairs().zip(b.pairs()) {
        let low = a_min.max(b_min);
        let high = a_max.min(b_max);
        if low > high {
            return Ok(0.0);
        }
        area *= high - low;
    }
    Ok(area)
}
