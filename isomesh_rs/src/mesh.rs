//! Triangle-soup mesh assembly, statistics and OBJ export.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use isomesh_core::{Point3, Triangle, Vertex};

use crate::error::Result;

/// Extracted surface as flat vertex and index arrays.
///
/// Vertices are never shared: triangle `i` owns vertices `3i..3i+3`, and the
/// index buffer is simply `0, 1, 2, ...`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in world units.
    pub positions: Vec<Point3>,
    /// Unit vertex normals, or zero where the density gradient vanished.
    pub normals: Vec<Point3>,
    /// Triangle indices into `positions`/`normals`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Assemble a mesh from triangles, scaling positions by `scale`.
    pub fn from_triangles<I>(triangles: I, scale: f32) -> Self
    where
        I: IntoIterator<Item = Triangle>,
    {
        let triangles = triangles.into_iter();
        let (lower, _) = triangles.size_hint();
        let mut positions = Vec::with_capacity(lower * 3);
        let mut normals = Vec::with_capacity(lower * 3);

        for tri in triangles {
            for v in tri {
                positions.push(v.position * scale);
                normals.push(v.normal);
            }
        }

        let indices = (0..positions.len() as u32).collect();
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices (`3 × triangle_count`).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let vertex = |i: u32| Vertex::new(self.positions[i as usize], self.normals[i as usize]);
            [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])]
        })
    }

    /// Reverse the vertex order of every triangle.
    ///
    /// The vertex data of each triangle is swapped in place; the index
    /// buffer stays `0, 1, 2, ...`.
    pub fn flip_winding(&mut self) {
        for base in (0..self.positions.len()).step_by(3) {
            self.positions.swap(base, base + 2);
            self.normals.swap(base, base + 2);
        }
    }

    /// Compute statistics for this mesh.
    pub fn stats(&self) -> MeshStats {
        MeshStats::from_mesh(self)
    }

    /// Export to Wavefront OBJ text with positions, normals and faces.
    pub fn to_obj(&self) -> String {
        Obj(self).to_string()
    }

    /// Stream the OBJ text to a file.
    pub fn write_obj<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write!(writer, "{}", Obj(self))?;
        writer.flush()?;
        Ok(())
    }
}

/// Wavefront OBJ rendering of a mesh, shared by the string and file paths.
struct Obj<'a>(&'a Mesh);

impl fmt::Display for Obj<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.0;
        writeln!(f, "# isomesh generated mesh")?;
        writeln!(
            f,
            "# {} triangles, {} vertices",
            mesh.triangle_count(),
            mesh.vertex_count()
        )?;
        writeln!(f)?;

        for p in &mesh.positions {
            writeln!(f, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for n in &mesh.normals {
            writeln!(f, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        writeln!(f)?;

        // OBJ indices are 1-based
        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(f, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        Ok(())
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices (triangle_count * 3).
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from a mesh.
    ///
    /// An empty mesh reports a zero-sized box at the origin.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for tri in mesh.triangles() {
            for v in &tri {
                bbox_min = bbox_min.min(v.position);
                bbox_max = bbox_max.max(v.position);
            }

            let e1 = tri[1].position - tri[0].position;
            let e2 = tri[2].position - tri[0].position;
            surface_area += e1.cross(e2).length() * 0.5;
        }

        if mesh.is_empty() {
            bbox_min = Point3::ZERO;
            bbox_max = Point3::ZERO;
        }

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Point3::new(x, y, z), Point3::new(0.0, 0.0, 1.0))
    }

    fn two_triangles() -> Mesh {
        Mesh::from_triangles(
            [
                [vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0)],
                [vertex(1.0, 0.0, 0.0), vertex(1.0, 1.0, 0.0), vertex(0.0, 1.0, 0.0)],
            ],
            1.0,
        )
    }

    #[test]
    fn test_from_triangles_layout() {
        let mesh = two_triangles();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.normals.len(), 6);
    }

    #[test]
    fn test_scale_applies_to_positions_only() {
        let mesh = Mesh::from_triangles([[vertex(1.0, 2.0, 3.0); 3]], 0.5);
        assert_eq!(mesh.positions[0], Point3::new(0.5, 1.0, 1.5));
        assert_eq!(mesh.normals[0], Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_flip_winding() {
        let mut mesh = two_triangles();
        let before: Vec<_> = mesh.triangles().collect();
        mesh.flip_winding();
        let after: Vec<_> = mesh.triangles().collect();

        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a[0], b[2]);
            assert_eq!(a[1], b[1]);
            assert_eq!(a[2], b[0]);
        }

        mesh.flip_winding();
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_mesh_stats() {
        let stats = two_triangles().stats();
        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 6);
        assert!((stats.surface_area - 1.0).abs() < 1e-6);
        assert_eq!(stats.bbox_min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(stats.bbox_max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_mesh_stats() {
        let stats = Mesh::default().stats();
        assert_eq!(stats.triangle_count, 0);
        assert_eq!(stats.surface_area, 0.0);
        assert_eq!(stats.bbox_min, Point3::ZERO);
    }

    #[test]
    fn test_to_obj() {
        let obj = two_triangles().to_obj();
        assert!(obj.contains("# 2 triangles, 6 vertices"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert_eq!(obj.lines().filter(|l| l.starts_with("vn ")).count(), 6);
        assert!(obj.contains("f 1//1 2//2 3//3"));
        assert!(obj.contains("f 4//4 5//5 6//6"));
    }

    #[test]
    fn test_write_obj() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mesh.obj");
        let mesh = two_triangles();
        mesh.write_obj(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, mesh.to_obj());
    }

    #[test]
    fn test_write_obj_reports_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("mesh.obj");
        let err = two_triangles().write_obj(&path).unwrap_err();
        assert!(matches!(err, crate::error::IsoError::Io(_)));
    }

    #[test]
    fn test_empty_mesh_obj() {
        let obj = Mesh::default().to_obj();
        assert!(obj.starts_with("# isomesh generated mesh\n# 0 triangles, 0 vertices\n"));
        assert!(!obj.lines().any(|l| l.starts_with("f ")));
    }
}
