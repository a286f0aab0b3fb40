//! Bounding rectangle extraction from stored geometry records.
//!
//! A stored record is a 4-byte little-endian SRID followed by the geometry
//! payload. Extraction reads the SRID, decodes the payload and returns the
//! envelope in the native units of the reference system.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::SRID_SIZE;
use crate::coordinate_model::{ActiveModel, CoordinateModel};
use crate::geometry::Geometry;
use crate::rectangle::Rectangle;
use crate::srs::SpatialReferenceSystem;
use crate::types::{ExtractedMbr, SpatialError, SpatialResult, Srid};
use crate::wkb::{encode_wkb, GeometryDecoder, WkbDecoder};

/// Reads the SRID prefix of a stored record.
pub fn record_srid(record: &[u8]) -> SpatialResult<Srid> {
    if record.len() < SRID_SIZE {
        return Err(SpatialError::Decode(format!(
            "Record of {} bytes has no SRID prefix",
            record.len()
        )));
    }
    Ok(LittleEndian::read_u32(&record[..SRID_SIZE]))
}

/// Builds a stored record from an SRID and a geometry.
pub fn encode_record(srid: Srid, geometry: &Geometry) -> SpatialResult<Vec<u8>> {
    let payload = encode_wkb(geometry)?;
    let mut record = vec![0u8; SRID_SIZE];
    LittleEndian::write_u32(&mut record, srid);
    record.extend_from_slice(&payload);
    Ok(record)
}

/// Extracts the bounding rectangle of a stored record with the default WKB
/// decoder, allowing mixed SRID indexes.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::{encode_record, extract_mbr, Geometry};
///
/// let record = encode_record(0, &Geometry::point(3.0, 4.0)).unwrap();
/// let extracted = extract_mbr(None, &record).unwrap();
/// assert_eq!(extracted.rectangle.to_mbr(), [3.0, 3.0, 4.0, 4.0]);
/// assert_eq!(extracted.srid, 0);
/// ```
pub fn extract_mbr(
    srs: Option<&SpatialReferenceSystem>,
    record: &[u8],
) -> SpatialResult<ExtractedMbr> {
    extract_mbr_with(srs, record, &WkbDecoder::default(), true)
}

/// Extracts the bounding rectangle of a stored record.
///
/// When `srs` is given its id must match the record's SRID. Indexes created
/// over columns with mixed SRIDs call this without a reference system; such
/// records are read as Cartesian when `allow_mixed_srid` is set and
/// rejected otherwise. SRID 0 records are always accepted without a
/// reference system.
///
/// An empty geometry yields [`Rectangle::full_domain`].
///
/// # Errors
/// Returns an error if the record is too short, the SRID does not match,
/// or the payload cannot be decoded.
pub fn extract_mbr_with(
    srs: Option<&SpatialReferenceSystem>,
    record: &[u8],
    decoder: &dyn GeometryDecoder,
    allow_mixed_srid: bool,
) -> SpatialResult<ExtractedMbr> {
    let srid = record_srid(record)?;

    match srs {
        Some(srs) if srs.id() != srid => {
            return Err(SpatialError::SridMismatch {
                expected: srs.id(),
                found: srid,
            });
        }
        None if srid != 0 => {
            if !allow_mixed_srid {
                log::warn!("Rejecting record with SRID {} in an index without SRID", srid);
                return Err(SpatialError::MixedSridRejected(srid));
            }
            log::debug!("Reading record with SRID {} as Cartesian in a mixed SRID index", srid);
        }
        _ => {}
    }

    let geometry = match decoder.decode(srs, &record[SRID_SIZE..]) {
        Ok(geometry) => geometry,
        Err(err) => {
            log::warn!("Rejecting record with SRID {}: {}", srid, err);
            return Err(err);
        }
    };

    let model = ActiveModel::select(srs)?;
    let envelope = model.envelope(&geometry)?;
    let rectangle = if envelope.has_nan() {
        Rectangle::full_domain()
    } else {
        model.from_internal(&envelope)
    };
    debug_assert!(rectangle.is_valid(), "invalid envelope {}", rectangle);

    Ok(ExtractedMbr { rectangle, srid })
}
