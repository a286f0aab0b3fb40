//! In-memory geometry values decoded from stored records.
//!
//! Only what envelope computation needs is modelled: vertices and the
//! linear segments between them. Topology (validity, orientation, holes
//! inside shells) is left to the decoder that produced the value.

use std::fmt::{self, Display};

/// A 2D coordinate (x, y) in the native units of its reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The empty point is encoded with both coordinates NaN.
    pub fn is_empty(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// A decoded geometry value.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    /// Exterior ring followed by interior rings
    Polygon(Vec<Vec<Coordinate>>),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    /// Creates the empty point.
    pub fn empty_point() -> Self {
        Geometry::Point(Coordinate::new(f64::NAN, f64::NAN))
    }

    /// Returns the OGC type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// Checks if the geometry has no vertices at all.
    pub fn is_empty(&self) -> bool {
        let mut empty = true;
        self.for_each_vertex(&mut |_| empty = false);
        empty
    }

    /// Visits every non-empty vertex.
    pub fn for_each_vertex(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(c) => {
                if !c.is_empty() {
                    f(c)
                }
            }
            Geometry::MultiPoint(points) => points.iter().filter(|c| !c.is_empty()).for_each(f),
            Geometry::LineString(line) => line.iter().for_each(f),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                rings.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(f),
            Geometry::GeometryCollection(members) => {
                members.iter().for_each(|g| g.for_each_vertex(f))
            }
        }
    }

    /// Visits every linear segment of line strings and polygon rings.
    pub fn for_each_segment(&self, f: &mut impl FnMut(&Coordinate, &Coordinate)) {
        fn walk(path: &[Coordinate], f: &mut impl FnMut(&Coordinate, &Coordinate)) {
            for pair in path.windows(2) {
                f(&pair[0], &pair[1]);
            }
        }

        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
            Geometry::LineString(line) => walk(line, f),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                rings.iter().for_each(|path| walk(path, f))
            }
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().flatten().for_each(|ring| walk(ring, f))
            }
            Geometry::GeometryCollection(members) => {
                members.iter().for_each(|g| g.for_each_segment(f))
            }
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn path(f: &mut fmt::Formatter<'_>, coords: &[Coordinate]) -> fmt::Result {
            write!(f, "(")?;
            for (i, c) in coords.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", c)?;
            }
            write!(f, ")")
        }

        fn paths(f: &mut fmt::Formatter<'_>, list: &[Vec<Coordinate>]) -> fmt::Result {
            write!(f, "(")?;
            for (i, coords) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                path(f, coords)?;
            }
            write!(f, ")")
        }

        write!(f, "{}", self.type_name())?;
        match self {
            Geometry::Point(c) if c.is_empty() => write!(f, " EMPTY"),
            Geometry::Point(c) => write!(f, "({})", c),
            Geometry::LineString(line) | Geometry::MultiPoint(line) => path(f, line),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => paths(f, rings),
            Geometry::MultiPolygon(polygons) => {
                write!(f, "(")?;
                for (i, rings) in polygons.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    paths(f, rings)?;
                }
                write!(f, ")")
            }
            Geometry::GeometryCollection(members) => {
                write!(f, "(")?;
                for (i, g) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", g)?;
                }
                write!(f, ")")
            }
        }
    }
}
