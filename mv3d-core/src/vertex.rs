//! Interleaved vertex layouts for GPU upload.
//!
//! The model and the axis gizmo share one layout, 9 floats per vertex:
//! position at offset 0, color at offset 3, normal at offset 6. Producing
//! the float data is pure and lives here; uploading it is the viewer's job.

use glam::Vec3;

use crate::mesh::Mesh;

/// Floats per interleaved vertex: 3 position + 3 color + 3 normal.
pub const VERTEX_COMPONENTS: usize = 9;
/// Constant color applied to every model vertex.
pub const MODEL_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.8);
/// World-space length of each gizmo axis.
pub const AXIS_LENGTH: f32 = 2.0;

/// Flattens the mesh into interleaved position/color/normal data, three
/// vertices per triangle, every vertex carrying its triangle's face normal.
pub fn mesh_vertices(mesh: &Mesh) -> Vec<f32> {
    let mut data = Vec::with_capacity(mesh.triangles.len() * 3 * VERTEX_COMPONENTS);
    for triangle in &mesh.triangles {
        for vertex in &triangle.vertices {
            push_vertex(&mut data, *vertex, MODEL_COLOR, triangle.normal);
        }
    }
    data
}

/// Vertex data for the three reference axes: origin to +X in red, +Y in
/// green, +Z in blue. Two endpoints per axis, same layout as the model.
pub fn axis_vertices() -> Vec<f32> {
    let axes = [
        (Vec3::X, Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::Y, Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::Z, Vec3::new(0.0, 0.0, 1.0)),
    ];
    let mut data = Vec::with_capacity(axes.len() * 2 * VERTEX_COMPONENTS);
    for (direction, color) in axes {
        // Lines have no meaningful surface normal; +Z keeps the layout uniform.
        push_vertex(&mut data, Vec3::ZERO, color, Vec3::Z);
        push_vertex(&mut data, direction * AXIS_LENGTH, color, Vec3::Z);
    }
    data
}

fn push_vertex(data: &mut Vec<f32>, position: Vec3, color: Vec3, normal: Vec3) {
    data.extend_from_slice(&position.to_array());
    data.extend_from_slice(&color.to_array());
    data.extend_from_slice(&normal.to_array());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    #[test]
    fn single_triangle_produces_27_floats() {
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let mesh = Mesh::new(vec![Triangle::new(
            [Vec3::ZERO, Vec3::X, Vec3::Y],
            normal,
        )]);
        let data = mesh_vertices(&mesh);
        assert_eq!(data.len(), 27);

        // Normal occupies floats [6..9) of every vertex.
        for vertex in 0..3 {
            let base = vertex * VERTEX_COMPONENTS;
            assert_eq!(&data[base + 6..base + 9], normal.to_array().as_slice());
            assert_eq!(&data[base + 3..base + 6], MODEL_COLOR.to_array().as_slice());
        }
        // First vertex position.
        assert_eq!(&data[0..3], &[0.0, 0.0, 0.0]);
        // Second vertex position starts one stride in.
        assert_eq!(&data[9..12], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn buffer_length_is_nine_floats_per_vertex() {
        let mesh = Mesh::new(vec![
            Triangle::from_vertices([Vec3::ZERO, Vec3::X, Vec3::Y]),
            Triangle::from_vertices([Vec3::ZERO, Vec3::Y, Vec3::Z]),
        ]);
        assert_eq!(mesh_vertices(&mesh).len(), 2 * 3 * VERTEX_COMPONENTS);
    }

    #[test]
    fn axis_gizmo_layout() {
        let data = axis_vertices();
        assert_eq!(data.len(), 54);

        // X axis: origin then (AXIS_LENGTH, 0, 0), both red.
        assert_eq!(&data[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&data[3..6], &[1.0, 0.0, 0.0]);
        assert_eq!(&data[9..12], &[AXIS_LENGTH, 0.0, 0.0]);

        // Y axis endpoint, green.
        assert_eq!(&data[27..30], &[0.0, AXIS_LENGTH, 0.0]);
        assert_eq!(&data[30..33], &[0.0, 1.0, 0.0]);

        // Z axis endpoint, blue.
        assert_eq!(&data[45..48], &[0.0, 0.0, AXIS_LENGTH]);
        assert_eq!(&data[48..51], &[0.0, 0.0, 1.0]);
    }
}
