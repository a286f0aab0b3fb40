//! Geometry payload decoding.
//!
//! The storage engine keeps geometries as OGC well-known binary. The
//! [`GeometryDecoder`] trait is the seam the extraction routine decodes
//! through; [`WkbDecoder`] is the default implementation.

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::{self, Cursor};

use crate::constants::MAX_COLLECTION_DEPTH;
use crate::geometry::{Coordinate, Geometry};
use crate::srs::SpatialReferenceSystem;
use crate::types::{SpatialError, SpatialResult};

const WKB_BIG_ENDIAN: u8 = 0;
const WKB_LITTLE_ENDIAN: u8 = 1;

const WKB_POINT: u32 = 1;
const WKB_LINESTRING: u32 = 2;
const WKB_POLYGON: u32 = 3;
const WKB_MULTIPOINT: u32 = 4;
const WKB_MULTILINESTRING: u32 = 5;
const WKB_MULTIPOLYGON: u32 = 6;
const WKB_GEOMETRYCOLLECTION: u32 = 7;

/// Byte order flag plus type code
const HEADER_SIZE: usize = 5;
const COORDINATE_SIZE: usize = 16;
/// Smallest well-formed geometry: a header followed by a zero count
const MIN_GEOMETRY_SIZE: usize = HEADER_SIZE + 4;

/// Decodes a geometry payload into an in-memory [`Geometry`].
pub trait GeometryDecoder: Send + Sync {
    /// Decodes `payload`, interpreting its coordinates under `srs`.
    ///
    /// # Errors
    /// Returns an error if the payload is malformed or truncated.
    fn decode(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        payload: &[u8],
    ) -> SpatialResult<Geometry>;
}

/// Decoder for OGC well-known binary in either byte order.
#[derive(Debug, Clone, Copy)]
pub struct WkbDecoder {
    max_depth: usize,
}

impl Default for WkbDecoder {
    fn default() -> Self {
        Self::new(MAX_COLLECTION_DEPTH)
    }
}

impl WkbDecoder {
    /// Creates a decoder that accepts at most `max_depth` nested geometry
    /// collections.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl GeometryDecoder for WkbDecoder {
    fn decode(
        &self,
        srs: Option<&SpatialReferenceSystem>,
        payload: &[u8],
    ) -> SpatialResult<Geometry> {
        let mut reader = WkbReader {
            cursor: Cursor::new(payload),
            big_endian: false,
            max_depth: self.max_depth,
        };
        let geometry = reader.read_geometry(0)?;
        if reader.remaining() > 0 {
            return Err(SpatialError::Decode(format!(
                "{} trailing bytes after {}",
                reader.remaining(),
                geometry.type_name()
            )));
        }

        if let Some(srs) = srs.filter(|srs| srs.is_geographic()) {
            check_geographic_range(srs, &geometry)?;
        }
        Ok(geometry)
    }
}

fn check_geographic_range(srs: &SpatialReferenceSystem, geometry: &Geometry) -> SpatialResult<()> {
    let mut invalid = None;
    geometry.for_each_vertex(&mut |c| {
        if invalid.is_some() {
            return;
        }
        let lon = srs.to_radians(c.x);
        let lat = srs.to_radians(c.y);
        if !(-PI..=PI).contains(&lon) || !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            invalid = Some(*c);
        }
    });

    match invalid {
        Some(c) => Err(SpatialError::MalformedCoordinates(format!(
            "Coordinate ({}) is out of range for {}",
            c, srs
        ))),
        None => Ok(()),
    }
}

struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
    big_endian: bool,
    max_depth: usize,
}

impl WkbReader<'_> {
    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        if self.big_endian {
            self.cursor.read_u32::<BigEndian>()
        } else {
            self.cursor.read_u32::<LittleEndian>()
        }
    }

    fn read_f64(&mut self) -> io::Result<f64> {
        if self.big_endian {
            self.cursor.read_f64::<BigEndian>()
        } else {
            self.cursor.read_f64::<LittleEndian>()
        }
    }

    /// Reads an element count and checks the payload can hold that many
    /// elements of at least `min_size` bytes each.
    fn read_count(&mut self, min_size: usize, what: &str) -> SpatialResult<usize> {
        let count = self.read_u32()? as usize;
        let needed = count.checked_mul(min_size);
        match needed {
            Some(needed) if needed <= self.remaining() => Ok(count),
            _ => Err(SpatialError::Decode(format!(
                "{} count {} exceeds the remaining {} bytes",
                what,
                count,
                self.remaining()
            ))),
        }
    }

    fn read_header(&mut self) -> SpatialResult<u32> {
        self.big_endian = match self.cursor.read_u8()? {
            WKB_BIG_ENDIAN => true,
            WKB_LITTLE_ENDIAN => false,
            other => {
                return Err(SpatialError::Decode(format!(
                    "Invalid byte order flag: {}",
                    other
                )))
            }
        };
        Ok(self.read_u32()?)
    }

    fn read_coordinate(&mut self) -> SpatialResult<Coordinate> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        if x.is_nan() != y.is_nan() {
            return Err(SpatialError::Decode(format!(
                "Point with a single NaN coordinate: ({}, {})",
                x, y
            )));
        }
        Ok(Coordinate::new(x, y))
    }

    fn read_line(&mut self) -> SpatialResult<Vec<Coordinate>> {
        let count = self.read_count(COORDINATE_SIZE, "Point")?;
        if count < 2 {
            return Err(SpatialError::Decode(format!(
                "Line string needs at least 2 points, got {}",
                count
            )));
        }
        (0..count).map(|_| self.read_coordinate()).collect()
    }

    fn read_ring(&mut self) -> SpatialResult<Vec<Coordinate>> {
        let count = self.read_count(COORDINATE_SIZE, "Point")?;
        if count < 4 {
            return Err(SpatialError::Decode(format!(
                "Polygon ring needs at least 4 points, got {}",
                count
            )));
        }
        let ring = (0..count)
            .map(|_| self.read_coordinate())
            .collect::<SpatialResult<Vec<_>>>()?;
        if ring.first() != ring.last() {
            return Err(SpatialError::Decode("Polygon ring is not closed".into()));
        }
        Ok(ring)
    }

    fn read_polygon(&mut self) -> SpatialResult<Vec<Vec<Coordinate>>> {
        let count = self.read_count(4, "Ring")?;
        if count == 0 {
            return Err(SpatialError::Decode("Polygon without rings".into()));
        }
        (0..count).map(|_| self.read_ring()).collect()
    }

    /// Reads a member of a multi geometry, which carries its own header.
    fn read_member(&mut self, expected: u32) -> SpatialResult<()> {
        let type_code = self.read_header()?;
        if type_code != expected {
            return Err(SpatialError::Decode(format!(
                "Expected member of type {}, got {}",
                expected, type_code
            )));
        }
        Ok(())
    }

    fn read_geometry(&mut self, depth: usize) -> SpatialResult<Geometry> {
        let type_code = self.read_header()?;
        match type_code {
            WKB_POINT => Ok(Geometry::Point(self.read_coordinate()?)),
            WKB_LINESTRING => Ok(Geometry::LineString(self.read_line()?)),
            WKB_POLYGON => Ok(Geometry::Polygon(self.read_polygon()?)),
            WKB_MULTIPOINT => {
                let count = self.read_count(HEADER_SIZE + COORDINATE_SIZE, "Point")?;
                let mut points = Vec::with_capacity(count);
                for _ in 0..count {
                    self.read_member(WKB_POINT)?;
                    points.push(self.read_coordinate()?);
                }
                Ok(Geometry::MultiPoint(points))
            }
            WKB_MULTILINESTRING => {
                let count = self.read_count(MIN_GEOMETRY_SIZE, "Line string")?;
                let mut lines = Vec::with_capacity(count);
                for _ in 0..count {
                    self.read_member(WKB_LINESTRING)?;
                    lines.push(self.read_line()?);
                }
                Ok(Geometry::MultiLineString(lines))
            }
            WKB_MULTIPOLYGON => {
                let count = self.read_count(MIN_GEOMETRY_SIZE, "Polygon")?;
                let mut polygons = Vec::with_capacity(count);
                for _ in 0..count {
                    self.read_member(WKB_POLYGON)?;
                    polygons.push(self.read_polygon()?);
                }
                Ok(Geometry::MultiPolygon(polygons))
            }
            WKB_GEOMETRYCOLLECTION => {
                if depth >= self.max_depth {
                    return Err(SpatialError::Decode(format!(
                        "Geometry collections nested deeper than {}",
                        self.max_depth
                    )));
                }
                let count = self.read_count(MIN_GEOMETRY_SIZE, "Geometry")?;
                let mut members = Vec::with_capacity(count);
                for _ in 0..count {
                    members.push(self.read_geometry(depth + 1)?);
                }
                Ok(Geometry::GeometryCollection(members))
            }
            other => Err(SpatialError::Decode(format!(
                "Unsupported geometry type: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a geometry as little-endian WKB.
pub fn encode_wkb(geometry: &Geometry) -> SpatialResult<Vec<u8>> {
    let mut out = Vec::new();
    write_geometry::<LittleEndian>(&mut out, WKB_LITTLE_ENDIAN, geometry)?;
    Ok(out)
}

/// Encodes a geometry as big-endian WKB.
pub fn encode_wkb_big_endian(geometry: &Geometry) -> SpatialResult<Vec<u8>> {
    let mut out = Vec::new();
    write_geometry::<BigEndian>(&mut out, WKB_BIG_ENDIAN, geometry)?;
    Ok(out)
}

fn write_count<B: ByteOrder>(out: &mut Vec<u8>, count: usize) -> io::Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many elements"))?;
    out.write_u32::<B>(count)
}

fn write_path<B: ByteOrder>(out: &mut Vec<u8>, path: &[Coordinate]) -> io::Result<()> {
    write_count::<B>(out, path.len())?;
    for c in path {
        out.write_f64::<B>(c.x)?;
        out.write_f64::<B>(c.y)?;
    }
    Ok(())
}

fn write_rings<B: ByteOrder>(out: &mut Vec<u8>, rings: &[Vec<Coordinate>]) -> io::Result<()> {
    write_count::<B>(out, rings.len())?;
    rings.iter().try_for_each(|ring| write_path::<B>(out, ring))
}

fn write_header<B: ByteOrder>(out: &mut Vec<u8>, flag: u8, type_code: u32) -> io::Result<()> {
    out.write_u8(flag)?;
    out.write_u32::<B>(type_code)
}

fn write_geometry<B: ByteOrder>(out: &mut Vec<u8>, flag: u8, geometry: &Geometry) -> io::Result<()> {
    match geometry {
        Geometry::Point(c) => {
            write_header::<B>(out, flag, WKB_POINT)?;
            out.write_f64::<B>(c.x)?;
            out.write_f64::<B>(c.y)
        }
        Geometry::LineString(line) => {
            write_header::<B>(out, flag, WKB_LINESTRING)?;
            write_path::<B>(out, line)
        }
        Geometry::Polygon(rings) => {
            write_header::<B>(out, flag, WKB_POLYGON)?;
            write_rings::<B>(out, rings)
        }
        Geometry::MultiPoint(points) => {
            write_header::<B>(out, flag, WKB_MULTIPOINT)?;
            write_count::<B>(out, points.len())?;
            for c in points {
                write_geometry::<B>(out, flag, &Geometry::Point(*c))?;
            }
            Ok(())
        }
        Geometry::MultiLineString(lines) => {
            write_header::<B>(out, flag, WKB_MULTILINESTRING)?;
            write_count::<B>(out, lines.len())?;
            for line in lines {
                write_header::<B>(out, flag, WKB_LINESTRING)?;
                write_path::<B>(out, line)?;
            }
            Ok(())
        }
        Geometry::MultiPolygon(polygons) => {
            write_header::<B>(out, flag, WKB_MULTIPOLYGON)?;
            write_count::<B>(out, polygons.len())?;
            for rings in polygons {
                write_header::<B>(out, flag, WKB_POLYGON)?;
                write_rings::<B>(out, rings)?;
            }
            Ok(())
        }
        Geometry::GeometryCollection(members) => {
            write_header::<B>(out, flag, WKB_GEOMETRYCOLLECTION)?;
            write_count::<B>(out, members.len())?;
            members
                .iter()
                .try_for_each(|member| write_geometry::<B>(out, flag, member))
        }
    }
}
