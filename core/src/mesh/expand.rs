//! Path expansion into duplicated vertex attributes.
//!
//! Every path point becomes two mesh vertices which the vertex shader
//! pushes to opposite sides of the line. The functions here produce the
//! flat attribute streams for those vertices and the quad indices joining
//! consecutive point pairs.
//!
//! All functions are pure and accept empty input, which yields empty
//! output.

use crate::path::Point;

/// Number of scalars [`duplicate`] emits per point when `mirror` is set.
pub const MIRROR_SCALARS_PER_POINT: usize = 2;

/// Number of scalars [`duplicate`] emits per point when `mirror` is unset.
pub const POSITION_SCALARS_PER_POINT: usize = 6;

/// Number of indices [`create_indices`] emits per point.
pub const INDICES_PER_POINT: usize = 6;

/// Duplicate every point into two vertices.
///
/// With `mirror` set the point coordinates are ignored and each point
/// yields the side signal `-1.0, 1.0`. Otherwise each point yields its
/// coordinates twice: `x, y, z, x, y, z`.
pub fn duplicate(points: &[Point], mirror: bool) -> Vec<f32> {
    if mirror {
        let mut out = Vec::with_capacity(points.len() * MIRROR_SCALARS_PER_POINT);
        for _ in points {
            out.push(-1.0);
            out.push(1.0);
        }
        out
    } else {
        let mut out = Vec::with_capacity(points.len() * POSITION_SCALARS_PER_POINT);
        for p in points {
            out.extend_from_slice(&[p.x, p.y, p.z, p.x, p.y, p.z]);
        }
        out
    }
}

/// Shift the path by `offset` points, clamping at both ends.
///
/// Entry `i` of the result is `points[clamp(i + offset, 0, len - 1)]`.
/// With `offset = -1` the first entry is the first point itself, and with
/// `offset = 1` the last entry is the last point itself: an open path has
/// no neighbour beyond its ends and the shader sees a zero-length tangent
/// there.
pub fn relative(points: &[Point], offset: isize) -> Vec<Point> {
    let Some(last) = points.len().checked_sub(1) else {
        return Vec::new();
    };
    let last = last as isize;

    (0..points.len())
        .map(|i| points[clamp(i as isize + offset, 0, last) as usize])
        .collect()
}

/// Quad indices for `point_count` duplicated points.
///
/// Point `j` owns vertex slots `2j` and `2j + 1`; its quad spans slots
/// `2j..=2j + 3` as triangles `(0, 1, 2)` and `(2, 1, 3)`. A quad is
/// emitted for every point, including the last one whose slots
/// `2N` and `2N + 1` do not exist. Only the first
/// `(point_count - 1) * 6` indices may be drawn.
///
/// Indices are `u16`; `2 * point_count + 1` must not exceed `u16::MAX`
/// (see [`Path::MAX_POINTS`](crate::path::Path::MAX_POINTS)).
pub fn create_indices(point_count: usize) -> Vec<u16> {
    debug_assert!(
        point_count == 0 || 2 * point_count + 1 <= u16::MAX as usize,
        "{point_count} points overflow 16-bit indices"
    );

    let mut indices = Vec::with_capacity(point_count * INDICES_PER_POINT);
    for j in 0..point_count {
        let i = (2 * j) as u16;
        indices.extend_from_slice(&[i, i + 1, i + 2, i + 2, i + 1, i + 3]);
    }
    indices
}

/// Number of indices that may be drawn for `point_count` points.
pub fn draw_index_count(point_count: usize) -> usize {
    point_count.saturating_sub(1) * INDICES_PER_POINT
}

/// Clamp `value` into `[begin, end]`.
///
/// `end` wins when the range is inverted.
pub fn clamp(value: isize, begin: isize, end: isize) -> isize {
    if value > end {
        end
    } else if value < begin {
        begin
    } else {
        value
    }
}
