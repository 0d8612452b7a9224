//! OBJ backend, wrapping `tobj`.
//!
//! Load options are fixed: everything is triangulated and the per-attribute
//! index streams are merged into one, so each face arrives as exactly three
//! vertex indices. Materials are irrelevant to the viewer and are discarded.

use std::collections::HashMap;
use std::io::BufReader;

use glam::Vec3;

use super::ImportError;
use crate::mesh::{Triangle, face_normal};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

pub(super) fn parse(data: &[u8]) -> Result<Vec<Triangle>, ImportError> {
    let mut reader = BufReader::new(data);
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_path| {
        // MTL references may point anywhere; treat every one as empty.
        Ok((Vec::new(), HashMap::new()))
    })
    .map_err(|e| match e {
        tobj::LoadError::FaceVertexOutOfBounds => ImportError::InvalidIndex(e.to_string()),
        other => ImportError::LoadFailure(other.to_string()),
    })?;

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        for face in mesh.indices.chunks(3) {
            // Triangulation is mandatory upstream; a short remainder chunk is
            // skipped rather than treated as an error.
            let &[i0, i1, i2] = face else {
                continue;
            };
            let vertices = [
                position(mesh, i0)?,
                position(mesh, i1)?,
                position(mesh, i2)?,
            ];
            // One normal per face, taken at the face's first index when the
            // file carries normals at all.
            let normal = normal(mesh, i0).unwrap_or_else(|| face_normal(vertices));
            triangles.push(Triangle::new(vertices, normal));
        }
    }
    Ok(triangles)
}

fn position(mesh: &tobj::Mesh, index: u32) -> Result<Vec3, ImportError> {
    let base = index as usize * 3;
    if base + 3 > mesh.positions.len() {
        return Err(ImportError::InvalidIndex(format!(
            "face references vertex {index} but the mesh has {} vertices",
            mesh.positions.len() / 3
        )));
    }
    Ok(Vec3::new(
        mesh.positions[base],
        mesh.positions[base + 1],
        mesh.positions[base + 2],
    ))
}

fn normal(mesh: &tobj::Mesh, index: u32) -> Option<Vec3> {
    let base = index as usize * 3;
    if base + 3 > mesh.normals.len() {
        return None;
    }
    let n = Vec3::new(
        mesh.normals[base],
        mesh.normals[base + 1],
        mesh.normals[base + 2],
    );
    (n.length_squared() > f32::EPSILON).then(|| n.normalize())
}
