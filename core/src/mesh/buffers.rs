//! Flat vertex and index buffers for one polyline.

use super::data::CpuMesh;
use super::expand::{create_indices, draw_index_count, duplicate, relative};
use super::layout::{PolylineAttribute, VertexLayout};
use crate::path::Path;

/// The five buffers produced for one [`Path`] and their derived counts.
///
/// Every buffer is a plain `Vec` so its length travels with it. For a path
/// of `N` points:
///
/// - positions, next, previous: `6N` floats (`2N` vertices of 3 floats)
/// - directions: `2N` floats (`2N` vertices of 1 float)
/// - indices: `6N` values, of which only the first `6(N - 1)` are drawn
///
/// Buffers are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    directions: Vec<f32>,
    previous: Vec<f32>,
    next: Vec<f32>,
    indices: Vec<u16>,
    point_count: usize,
}

impl MeshBuffers {
    /// Expand a path into its mesh buffers.
    pub fn from_path(path: &Path) -> Self {
        let points = path.points();
        let buffers = Self {
            positions: duplicate(points, false),
            directions: duplicate(points, true),
            previous: duplicate(&relative(points, -1), false),
            next: duplicate(&relative(points, 1), false),
            indices: create_indices(points.len()),
            point_count: points.len(),
        };

        debug_assert!(buffers.draw_index_count() <= buffers.indices.len());
        debug_assert!(
            buffers.draw_indices().iter().all(|&i| (i as usize) < buffers.vertex_count()),
            "drawn indices must reference existing vertices"
        );

        log::debug!(
            "expanded {} points into {} vertices, {} drawable indices",
            buffers.point_count,
            buffers.vertex_count(),
            buffers.draw_index_count()
        );
        buffers
    }

    /// Duplicated point coordinates (3 floats per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Side signal, `-1.0` then `1.0` per point (1 float per vertex).
    pub fn directions(&self) -> &[f32] {
        &self.directions
    }

    /// Duplicated previous points (3 floats per vertex).
    pub fn previous(&self) -> &[f32] {
        &self.previous
    }

    /// Duplicated next points (3 floats per vertex).
    pub fn next(&self) -> &[f32] {
        &self.next
    }

    /// Get an attribute buffer by semantic.
    pub fn attribute(&self, attribute: PolylineAttribute) -> &[f32] {
        match attribute {
            PolylineAttribute::Position => &self.positions,
            PolylineAttribute::Direction => &self.directions,
            PolylineAttribute::Next => &self.next,
            PolylineAttribute::Previous => &self.previous,
        }
    }

    /// All generated indices, including the trailing undrawn quad.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// The indices that may be drawn.
    pub fn draw_indices(&self) -> &[u16] {
        &self.indices[..self.draw_index_count()]
    }

    /// Number of path points.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Number of mesh vertices (two per point).
    pub fn vertex_count(&self) -> usize {
        self.point_count * 2
    }

    /// Number of segments (`points - 1`).
    pub fn segment_count(&self) -> usize {
        self.point_count.saturating_sub(1)
    }

    /// Number of indices stored.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of indices to draw: six per segment.
    pub fn draw_index_count(&self) -> usize {
        draw_index_count(self.point_count)
    }

    /// Convert into byte buffers laid out as [`VertexLayout::polyline`].
    ///
    /// The full index buffer is kept; the draw count is bounded to
    /// [`draw_index_count`](Self::draw_index_count).
    pub fn to_cpu_mesh(&self) -> CpuMesh {
        let mesh = PolylineAttribute::ALL
            .iter()
            .fold(CpuMesh::new(VertexLayout::polyline()), |mesh, attribute| {
                mesh.with_vertex_data(
                    attribute.location() as usize,
                    bytemuck::cast_slice(self.attribute(*attribute)).to_vec(),
                )
            });

        mesh.with_indices_u16(&self.indices)
            .with_draw_count(self.draw_index_count() as u32)
            .with_label(format!("polyline[{}]", self.point_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_path_buffers() {
        let buffers = MeshBuffers::from_path(&Path::demo());

        assert_eq!(buffers.point_count(), 5);
        assert_eq!(buffers.vertex_count(), 10);
        assert_eq!(buffers.segment_count(), 4);
        assert_eq!(buffers.positions().len(), 30);
        assert_eq!(buffers.directions().len(), 10);
        assert_eq!(buffers.previous().len(), 30);
        assert_eq!(buffers.next().len(), 30);
        assert_eq!(buffers.index_count(), 30);
        assert_eq!(buffers.draw_index_count(), 24);
        assert_eq!(buffers.draw_indices().len(), 24);
    }

    #[test]
    fn test_demo_path_neighbours() {
        let buffers = MeshBuffers::from_path(&Path::demo());
        // First point has no predecessor: previous is the point itself.
        assert_eq!(&buffers.previous()[..6], &[0.0, -1.0, 0.0, 0.0, -1.0, 0.0]);
        assert_eq!(&buffers.previous()[6..12], &[0.0, -1.0, 0.0, 0.0, -1.0, 0.0]);
        assert_eq!(&buffers.next()[..6], &[1.0, -1.0, 0.0, 1.0, -1.0, 0.0]);
        // Last point has no successor: next is the point itself.
        assert_eq!(&buffers.next()[24..], &[0.25, -0.75, 0.0, 0.25, -0.75, 0.0]);
    }

    #[test]
    fn test_single_point_draws_nothing() {
        let path = Path::from_arrays(&[[1.0, 2.0, 3.0]]).unwrap();
        let buffers = MeshBuffers::from_path(&path);
        assert_eq!(buffers.vertex_count(), 2);
        assert_eq!(buffers.segment_count(), 0);
        assert_eq!(buffers.index_count(), 6);
        assert!(buffers.draw_indices().is_empty());
        assert_eq!(buffers.previous(), buffers.positions());
        assert_eq!(buffers.next(), buffers.positions());
    }

    #[test]
    fn test_attribute_lookup() {
        let buffers = MeshBuffers::from_path(&Path::demo());
        assert_eq!(buffers.attribute(PolylineAttribute::Position), buffers.positions());
        assert_eq!(buffers.attribute(PolylineAttribute::Direction), buffers.directions());
        assert_eq!(buffers.attribute(PolylineAttribute::Next), buffers.next());
        assert_eq!(buffers.attribute(PolylineAttribute::Previous), buffers.previous());
    }

    #[test]
    fn test_attribute_lengths_match_layout() {
        let buffers = MeshBuffers::from_path(&Path::demo());
        for attribute in PolylineAttribute::ALL {
            assert_eq!(
                buffers.attribute(attribute).len(),
                buffers.vertex_count() * attribute.components() as usize
            );
        }
    }

    #[test]
    fn test_to_cpu_mesh() {
        let buffers = MeshBuffers::from_path(&Path::demo());
        let mesh = buffers.to_cpu_mesh();

        assert_eq!(mesh.buffer_count(), 4);
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.index_count(), 30);
        assert_eq!(mesh.draw_count(), 24);
        assert_eq!(mesh.label(), Some("polyline[5]"));
        assert_eq!(mesh.vertex_buffer_data(0).map(<[u8]>::len), Some(30 * 4));
        assert_eq!(mesh.vertex_buffer_data(1).map(<[u8]>::len), Some(10 * 4));

        let direction_bytes: &[u8] = bytemuck::cast_slice(buffers.directions());
        assert_eq!(mesh.vertex_buffer_data(1), Some(direction_bytes));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let path = Path::demo();
        assert_eq!(MeshBuffers::from_path(&path), MeshBuffers::from_path(&path));
    }
}
