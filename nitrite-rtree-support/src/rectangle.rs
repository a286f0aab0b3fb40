use serde::{Deserialize, Serialize};

/// A 2D minimum bounding rectangle.
///
/// `Rectangle` stores the min corner `(min_x, min_y)` and the max corner
/// `(max_x, max_y)` in the native units of the active reference system. Its
/// flat form, as the storage engine keeps it, is `[xmin, xmax, ymin, ymax]`
/// (see [`Rectangle::from_mbr`]).
///
/// Valid rectangles satisfy `min_x <= max_x` and `min_y <= max_y`. A
/// rectangle reversed on both axes is a legacy inverted encoding that only
/// [`within`](crate::predicates::within) understands.
///
/// # Examples
///
/// ```rust
/// use nitrite_rtree_support::Rectangle;
///
/// let rect = Rectangle::new(0.0, 0.0, 10.0, 5.0);
/// assert_eq!(rect.to_mbr(), [0.0, 10.0, 0.0, 5.0]);
/// assert_eq!(rect.width(), 10.0);
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Rectangle {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rectangle({}, {}, {}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl From<[f64; 4]> for Rectangle {
    fn from(mbr: [f64; 4]) -> Self {
        Rectangle::from_mbr(mbr)
    }
}

impl From<Rectangle> for [f64; 4] {
    fn from(rect: Rectangle) -> Self {
        rect.to_mbr()
    }
}

impl Rectangle {
    /// Creates a rectangle from its min corner and max corner.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rectangle {
        Rectangle {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Creates a rectangle from the storage layout `[xmin, xmax, ymin, ymax]`.
    pub fn from_mbr(mbr: [f64; 4]) -> Rectangle {
        Rectangle {
            min_x: mbr[0],
            max_x: mbr[1],
            min_y: mbr[2],
            max_y: mbr[3],
        }
    }

    /// Returns the storage layout `[xmin, xmax, ymin, ymax]`.
    pub fn to_mbr(&self) -> [f64; 4] {
        [self.min_x, self.max_x, self.min_y, self.max_y]
    }

    /// A rectangle covering every finite coordinate, used as the envelope of
    /// empty geometries.
    pub fn full_domain() -> Rectangle {
        Rectangle::new(f64::MIN, f64::MIN, f64::MAX, f64::MAX)
    }

    /// A rectangle with all four coordinates NaN, the envelope of an empty
    /// geometry before substitution.
    pub fn nan() -> Rectangle {
        Rectangle::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Checks if the rectangle satisfies `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Checks if min and max are reversed on both axes.
    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x && self.min_y > self.max_y
    }

    /// Checks if any coordinate is NaN.
    pub fn has_nan(&self) -> bool {
        self.to_mbr().iter().any(|v| v.is_nan())
    }

    /// Returns the rectangle with min and max swapped where they are reversed.
    pub fn normalized(&self) -> Rectangle {
        Rectangle {
            min_x: self.min_x.min(self.max_x),
            max_x: self.min_x.max(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_y: self.min_y.max(self.max_y),
        }
    }

    /// Applies `f` to every coordinate.
    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Rectangle {
        Rectangle {
            min_x: f(self.min_x),
            max_x: f(self.max_x),
            min_y: f(self.min_y),
            max_y: f(self.max_y),
        }
    }
}
