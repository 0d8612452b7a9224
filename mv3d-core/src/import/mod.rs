//! Geometry import.
//!
//! Converts a model file into a flat triangle list. The format is decided by
//! sniffing the file content, never the extension: binary STL by its
//! `84 + 50 * n` length signature, ASCII STL by its `solid` preamble,
//! anything else goes to the OBJ backend.
//!
//! Every backend's output passes the same fixed finishing policy before it
//! becomes a [`Mesh`]: all faces triangulated, missing or zeroed normals
//! regenerated from the edge cross product, vertex indices validated before
//! any vertex is fetched, and per-attribute index streams merged where the
//! backend has them. The policy is not configurable; downstream code relies
//! on every face being exactly three vertices with a normal present.

mod obj;
mod stl;

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::mesh::Mesh;

/// Failure modes of [`import`]. Each carries a human-readable detail; a
/// failed import never exposes a partial [`Mesh`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The backend could not parse the file at all.
    #[error("load failure: {0}")]
    LoadFailure(String),
    /// The file parsed but contained no usable triangle geometry.
    #[error("no mesh data: {0}")]
    NoMeshData(String),
    /// A face references a vertex index outside the mesh's vertex list.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
}

/// Imports the model file at `path` into a normalized [`Mesh`].
pub fn import(path: &Path) -> Result<Mesh, ImportError> {
    let data = std::fs::read(path)
        .map_err(|e| ImportError::LoadFailure(format!("{}: {e}", path.display())))?;
    import_slice(&data)
}

/// Imports a model already loaded into memory. The file-reading half of
/// [`import`] is split off so parsing stays testable without a filesystem.
pub fn import_slice(data: &[u8]) -> Result<Mesh, ImportError> {
    let format = detect_format(data);
    debug!("detected model format: {format:?}");

    let triangles = match format {
        Format::StlBinary => stl::parse_binary(data)?,
        Format::StlAscii => stl::parse_ascii(data)?,
        Format::Obj => obj::parse(data)?,
    };

    if triangles.is_empty() {
        return Err(ImportError::NoMeshData(
            "file contains no triangle geometry".into(),
        ));
    }

    debug!("imported {} triangles", triangles.len());
    Ok(Mesh::new(triangles))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    StlBinary,
    StlAscii,
    Obj,
}

fn detect_format(data: &[u8]) -> Format {
    // Binary first: a binary STL may well start with "solid" in its header,
    // but only the binary layout satisfies the length signature.
    if stl::matches_binary(data) {
        Format::StlBinary
    } else if stl::matches_ascii(data) {
        Format::StlAscii
    } else {
        Format::Obj
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    /// Assembles a binary STL from `(normal, v0, v1, v2)` triples.
    fn binary_stl(triangles: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            for vector in triangle {
                for value in vector {
                    data.extend_from_slice(&value.to_le_bytes());
                }
            }
            data.extend_from_slice(&[0, 0]);
        }
        data
    }

    #[test]
    fn binary_stl_imports_one_triangle() {
        let data = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);
        let mesh = import_slice(&data).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles[0].normal, Vec3::Z);
        assert_eq!(mesh.min_bounds, Vec3::ZERO);
        assert_eq!(mesh.max_bounds, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn binary_detection_wins_over_a_solid_header() {
        // Header bytes spell "solid" but the length signature is binary.
        let mut data = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);
        data[..5].copy_from_slice(b"solid");
        assert_eq!(detect_format(&data), Format::StlBinary);
        assert!(import_slice(&data).is_ok());
    }

    #[test]
    fn ascii_stl_with_zero_facets_is_no_mesh_data() {
        let data = b"solid empty\nendsolid empty\n";
        match import_slice(data) {
            Err(ImportError::NoMeshData(_)) => {}
            other => panic!("expected NoMeshData, got {other:?}"),
        }
    }

    #[test]
    fn binary_stl_with_zero_triangles_is_no_mesh_data() {
        let data = binary_stl(&[]);
        match import_slice(&data) {
            Err(ImportError::NoMeshData(_)) => {}
            other => panic!("expected NoMeshData, got {other:?}"),
        }
    }

    #[test]
    fn obj_face_with_out_of_range_index_is_invalid_index() {
        let data = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        match import_slice(data) {
            Err(ImportError::InvalidIndex(_)) => {}
            other => panic!("expected InvalidIndex, got {other:?}"),
        }
    }

    #[test]
    fn obj_triangle_without_normals_gets_a_face_normal() {
        let data = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = import_slice(data).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!((mesh.triangles[0].normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn obj_quad_is_triangulated() {
        let data = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = import_slice(data).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn unreadable_garbage_is_a_load_failure() {
        // Not STL by either signature, not parseable as OBJ geometry.
        let data = b"f 1 2 oops\n";
        match import_slice(data) {
            Err(ImportError::LoadFailure(_)) | Err(ImportError::NoMeshData(_)) => {}
            other => panic!("expected a failed import, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let err = import(Path::new("/nonexistent/model.stl")).unwrap_err();
        match err {
            ImportError::LoadFailure(detail) => assert!(detail.contains("model.stl")),
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }
}
