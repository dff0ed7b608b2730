//! Mesh adapters for extracted vertex lists.
//!
//! The extractor returns an unindexed triangle soup. These helpers turn it
//! into the forms a renderer or file exporter consumes: grouped triangles,
//! position and flat-normal buffers, statistics and Wavefront OBJ text.

use std::io::{self, Write};

use isomesh_core::{Point3, Triangle};

use crate::error::{IsoError, Result};
use crate::extractor::check_vertex_count;

/// Group a flat vertex list into triangles.
///
/// # Errors
/// Returns `InvalidState` if the vertex count is not a multiple of 3.
pub fn triangles_from_vertices(vertices: &[Point3]) -> Result<Vec<Triangle>> {
    check_vertex_count(vertices.len())?;
    Ok(vertices
        .chunks_exact(3)
        .map(|v| [v[0], v[1], v[2]])
        .collect())
}

/// Unit normal of a triangle from its winding, or zero if degenerate.
#[inline]
pub fn face_normal(tri: &Triangle) -> Point3 {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    e1.cross(e2).normalize()
}

/// Area of a triangle.
#[inline]
pub fn triangle_area(tri: &Triangle) -> f32 {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    e1.cross(e2).length() * 0.5
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices (triangle_count * 3).
    pub vertex_count: usize,
    /// Approximate surface area (sum of triangle areas).
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from a set of triangles.
    ///
    /// An empty mesh reports a zero bounding box.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let triangle_count = triangles.len();
        let vertex_count = triangle_count * 3;

        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for tri in triangles {
            for &v in tri {
                bbox_min = bbox_min.min(v);
                bbox_max = bbox_max.max(v);
            }
            surface_area += triangle_area(tri);
        }

        if triangles.is_empty() {
            bbox_min = Point3::ZERO;
            bbox_max = Point3::ZERO;
        }

        Self {
            triangle_count,
            vertex_count,
            surface_area,
            bbox_min,
            bbox_max,
        }
    }

    /// Compute statistics from a flat vertex list.
    ///
    /// # Errors
    /// Returns `InvalidState` if the vertex count is not a multiple of 3.
    pub fn from_vertices(vertices: &[Point3]) -> Result<Self> {
        Ok(Self::from_triangles(&triangles_from_vertices(vertices)?))
    }

    /// Size of the bounding box along each axis.
    pub fn extent(&self) -> Point3 {
        self.bbox_max - self.bbox_min
    }
}

/// Renderable buffers: interleaving-ready positions with per-vertex normals.
///
/// No vertices are shared, so every vertex of a triangle carries that
/// triangle's face normal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions as `[x, y, z]`.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as `[x, y, z]`, one per position.
    pub normals: Vec<[f32; 3]>,
}

impl MeshBuffers {
    /// Build position and flat-normal buffers from a flat vertex list.
    ///
    /// # Errors
    /// Returns `InvalidState` if the vertex count is not a multiple of 3.
    pub fn from_vertices(vertices: &[Point3]) -> Result<Self> {
        check_vertex_count(vertices.len())?;

        let mut positions = Vec::with_capacity(vertices.len());
        let mut normals = Vec::with_capacity(vertices.len());
        for v in vertices.chunks_exact(3) {
            let normal = face_normal(&[v[0], v[1], v[2]]).as_array();
            for p in v {
                positions.push(p.as_array());
                normals.push(normal);
            }
        }

        Ok(Self { positions, normals })
    }

    /// Number of vertices in the buffers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the buffers hold no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Write a vertex list as Wavefront OBJ.
///
/// Every three vertices become one face; indices are 1-based as OBJ requires.
///
/// # Errors
/// Returns `InvalidInput` without writing anything if the vertex count is not
/// a multiple of 3, and propagates any error from `writer`.
pub fn write_obj<W: Write>(vertices: &[Point3], mut writer: W) -> io::Result<()> {
    if vertices.len() % 3 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("vertex count {} is not a multiple of 3", vertices.len()),
        ));
    }
    let triangles = vertices.len() / 3;

    writeln!(writer, "# isomesh generated mesh")?;
    writeln!(writer, "# {} triangles, {} vertices", triangles, vertices.len())?;
    writeln!(writer)?;

    for v in vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    writeln!(writer)?;

    for i in 0..triangles {
        let base = i * 3 + 1;
        writeln!(writer, "f {} {} {}", base, base + 1, base + 2)?;
    }

    writer.flush()
}

/// Export a vertex list to an OBJ format string.
///
/// # Errors
/// Returns `InvalidState` if the vertex count is not a multiple of 3.
pub fn vertices_to_obj(vertices: &[Point3]) -> Result<String> {
    check_vertex_count(vertices.len())?;

    let mut obj = Vec::new();
    write_obj(vertices, &mut obj).map_err(|e| IsoError::InvalidState {
        message: format!("OBJ export failed: {}", e),
    })?;
    Ok(String::from_utf8_lossy(&obj).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_triangles_from_vertices() {
        let triangles = triangles_from_vertices(&two_triangles()).unwrap();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1][2], Point3::new(0.0, 0.0, 1.0));

        assert!(matches!(
            triangles_from_vertices(&two_triangles()[..4]),
            Err(IsoError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_mesh_stats() {
        let stats = MeshStats::from_vertices(&two_triangles()).unwrap();

        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 6);
        assert!((stats.surface_area - 1.0).abs() < 1e-6);

        // Bounding box should cover [0,1]³
        assert_eq!(stats.bbox_min, Point3::ZERO);
        assert_eq!(stats.extent(), Point3::splat(1.0));
    }

    #[test]
    fn test_mesh_stats_empty() {
        let stats = MeshStats::from_triangles(&[]);
        assert_eq!(stats.triangle_count, 0);
        assert_eq!(stats.surface_area, 0.0);
        assert_eq!(stats.bbox_min, Point3::ZERO);
        assert_eq!(stats.bbox_max, Point3::ZERO);
    }

    #[test]
    fn test_mesh_buffers_flat_normals() {
        let buffers = MeshBuffers::from_vertices(&two_triangles()).unwrap();
        assert_eq!(buffers.len(), 6);
        assert_eq!(buffers.normals.len(), 6);

        for n in &buffers.normals[..3] {
            assert_eq!(*n, [0.0, 0.0, 1.0]);
        }
        for n in &buffers.normals[3..] {
            assert_eq!(*n, [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_mesh_buffers_empty() {
        let buffers = MeshBuffers::from_vertices(&[]).unwrap();
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_vertices_to_obj() {
        let obj = vertices_to_obj(&two_triangles()[..3]).unwrap();

        assert!(obj.contains("v 0 0 0"));
        assert!(obj.contains("v 1 0 0"));
        assert!(obj.contains("v 0 1 0"));
        assert!(obj.contains("f 1 2 3"));
        assert!(!obj.contains("f 4 5 6"));
    }

    #[test]
    fn test_write_obj_counts_lines() {
        let mut out = Vec::new();
        write_obj(&two_triangles(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
        assert!(text.contains("f 4 5 6"));
    }

    #[test]
    fn test_write_obj_rejects_partial_triangle() {
        let mut out = Vec::new();
        let err = write_obj(&vec![Point3::ZERO; 4], &mut out).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }
}
