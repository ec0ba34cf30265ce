//! Polyline paths.
//!
//! A [`Path`] is the ordered list of points a thick line is drawn through.
//! Paths are open: the first and last points have a single neighbour.

use std::fmt;
use std::str::FromStr;

use crate::math::Vec3;

/// A path point.
pub type Point = Vec3;

/// Errors produced while building or parsing a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no points.
    Empty,
    /// The path has more points than 16-bit indices can address.
    TooManyPoints { count: usize, max: usize },
    /// A point in the text form could not be parsed.
    Parse { point: usize, reason: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "path must contain at least one point"),
            Self::TooManyPoints { count, max } => {
                write!(f, "path has {count} points, at most {max} are supported")
            }
            Self::Parse { point, reason } => write!(f, "invalid point #{point}: {reason}"),
        }
    }
}

impl std::error::Error for PathError {}

/// An ordered, non-empty sequence of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Largest supported point count.
    ///
    /// `create_indices(N)` references vertex slots up to `2N + 1`, which
    /// must fit in a `u16`.
    pub const MAX_POINTS: usize = (u16::MAX as usize - 1) / 2;

    /// Create a path from its points.
    pub fn new(points: Vec<Point>) -> Result<Self, PathError> {
        if points.is_empty() {
            return Err(PathError::Empty);
        }
        if points.len() > Self::MAX_POINTS {
            return Err(PathError::TooManyPoints {
                count: points.len(),
                max: Self::MAX_POINTS,
            });
        }
        Ok(Self { points })
    }

    /// Create a path from `[x, y, z]` triples.
    pub fn from_arrays(points: &[[f32; 3]]) -> Result<Self, PathError> {
        Self::new(points.iter().map(|p| Point::from(*p)).collect())
    }

    /// The zig-zag path used by the line viewer when no path is given.
    pub fn demo() -> Self {
        Self {
            points: vec![
                Point::new(0.0, -1.0, 0.0),
                Point::new(1.0, -1.0, 0.0),
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.25, -0.75, 0.0),
            ],
        }
    }

    /// The path points, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments (`len - 1`).
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Iterate over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Parses the text form of a path.
///
/// Points are separated by `;` or newlines and coordinates by `,` or
/// whitespace. Two coordinates give a point on the z = 0 plane. Blank
/// entries and `#` comments are skipped.
///
/// ```
/// use miterline_core::path::Path;
///
/// let path: Path = "0,0; 1,0,0\n1 1 0".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// ```
impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut points = Vec::new();

        for line in s.lines() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            for entry in line.split(';') {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                points.push(parse_point(entry, points.len())?);
            }
        }

        Self::new(points)
    }
}

fn parse_point(entry: &str, index: usize) -> Result<Point, PathError> {
    let coords = entry
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|c| !c.is_empty())
        .map(|c| {
            c.parse::<f32>().map_err(|e| PathError::Parse {
                point: index,
                reason: format!("'{c}': {e}"),
            })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    if coords.iter().any(|c| !c.is_finite()) {
        return Err(PathError::Parse {
            point: index,
            reason: "non-finite coordinate".to_string(),
        });
    }

    match coords.as_slice() {
        [x, y] => Ok(Point::new(*x, *y, 0.0)),
        [x, y, z] => Ok(Point::new(*x, *y, *z)),
        other => Err(PathError::Parse {
            point: index,
            reason: format!("expected 2 or 3 coordinates, found {}", other.len()),
        }),
    }
}
