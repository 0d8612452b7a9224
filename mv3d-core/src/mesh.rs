//! Triangle mesh data and spatial metadata.
//!
//! A [`Mesh`] is the flat triangle list produced by the importer together
//! with the derived fields the renderer relies on: axis-aligned bounds, the
//! geometric center, and a uniform scale factor that fits the mesh into a
//! canonical display volume.

use glam::Vec3;

/// Extent below which a bounding-box dimension counts as degenerate.
pub const DEGENERATE_EXTENT: f32 = 1e-6;

/// A single triangle with one face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
}

impl Triangle {
    /// Creates a triangle with an explicit face normal.
    pub fn new(vertices: [Vec3; 3], normal: Vec3) -> Self {
        Self { vertices, normal }
    }

    /// Creates a triangle whose face normal is computed from its edges.
    pub fn from_vertices(vertices: [Vec3; 3]) -> Self {
        Self {
            vertices,
            normal: face_normal(vertices),
        }
    }
}

/// Normalized cross product of the triangle's first two edges. Zero for a
/// degenerate triangle rather than NaN.
pub fn face_normal(vertices: [Vec3; 3]) -> Vec3 {
    let edge1 = vertices[1] - vertices[0];
    let edge2 = vertices[2] - vertices[0];
    edge1.cross(edge2).normalize_or_zero()
}

/// A triangle mesh plus derived spatial metadata.
///
/// The derived fields are only meaningful once every triangle is in place;
/// [`Mesh::new`] normalizes on construction so a `Mesh` handed out by the
/// importer is always consistent. An empty mesh never leaves the importer.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub min_bounds: Vec3,
    pub max_bounds: Vec3,
    pub center: Vec3,
    pub scale: f32,
}

impl Mesh {
    /// Creates a mesh from a triangle list and derives its spatial metadata.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut mesh = Self {
            triangles,
            min_bounds: Vec3::ZERO,
            max_bounds: Vec3::ZERO,
            center: Vec3::ZERO,
            scale: 1.0,
        };
        mesh.normalize();
        mesh
    }

    /// Recomputes bounds, center and scale from the current triangle data.
    ///
    /// Bounds are seeded from the first triangle's first vertex and expanded
    /// per component across every vertex of every triangle. The scale is the
    /// reciprocal of the largest bounding-box dimension, or `1.0` when that
    /// dimension is below [`DEGENERATE_EXTENT`] (a single point or a flat
    /// sliver). Idempotent for fixed triangle data; a no-op when the
    /// triangle list is empty.
    pub fn normalize(&mut self) {
        let Some(first) = self.triangles.first() else {
            return;
        };

        let mut min = first.vertices[0];
        let mut max = first.vertices[0];
        for triangle in &self.triangles {
            for vertex in &triangle.vertices {
                min = min.min(*vertex);
                max = max.max(*vertex);
            }
        }

        self.min_bounds = min;
        self.max_bounds = max;
        self.center = (min + max) * 0.5;

        let max_dim = (max - min).max_element();
        self.scale = if max_dim > DEGENERATE_EXTENT {
            1.0 / max_dim
        } else {
            1.0
        };
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Mesh {
        const CORNERS: [[f32; 3]; 8] = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        const FACES: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 6, 2],
            [3, 7, 6],
            [1, 2, 6],
            [1, 6, 5],
            [0, 4, 7],
            [0, 7, 3],
        ];
        let triangles = FACES
            .iter()
            .map(|face| {
                Triangle::from_vertices([
                    Vec3::from(CORNERS[face[0]]),
                    Vec3::from(CORNERS[face[1]]),
                    Vec3::from(CORNERS[face[2]]),
                ])
            })
            .collect();
        Mesh::new(triangles)
    }

    #[test]
    fn bounds_envelope_every_vertex() {
        let mesh = Mesh::new(vec![
            Triangle::from_vertices([
                Vec3::new(-2.0, 1.0, 0.5),
                Vec3::new(3.0, -4.0, 2.0),
                Vec3::new(0.0, 0.0, -1.5),
            ]),
            Triangle::from_vertices([
                Vec3::new(1.0, 5.0, 0.0),
                Vec3::new(-1.0, 2.0, 3.0),
                Vec3::new(0.5, 0.5, 0.5),
            ]),
        ]);

        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                assert!(mesh.min_bounds.cmple(*vertex).all());
                assert!(mesh.max_bounds.cmpge(*vertex).all());
            }
        }
        let midpoint = (mesh.min_bounds + mesh.max_bounds) * 0.5;
        assert_eq!(mesh.center, midpoint);
    }

    #[test]
    fn unit_cube_metadata() {
        let mesh = unit_cube();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.min_bounds, Vec3::ZERO);
        assert_eq!(mesh.max_bounds, Vec3::ONE);
        assert_eq!(mesh.center, Vec3::splat(0.5));
        assert_eq!(mesh.scale, 1.0);
    }

    #[test]
    fn scale_is_reciprocal_of_largest_dimension() {
        let mesh = Mesh::new(vec![Triangle::from_vertices([
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ])]);
        assert!((mesh.scale - 0.25).abs() < 1e-6);
        assert!(mesh.scale > 0.0);
    }

    #[test]
    fn degenerate_extent_scale_defaults_to_one() {
        let point = Vec3::new(7.0, -3.0, 1.0);
        let mesh = Mesh::new(vec![Triangle::from_vertices([point, point, point])]);
        assert_eq!(mesh.scale, 1.0);
        assert_eq!(mesh.center, point);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut mesh = unit_cube();
        let (min, max, center, scale) =
            (mesh.min_bounds, mesh.max_bounds, mesh.center, mesh.scale);
        mesh.normalize();
        assert_eq!(mesh.min_bounds, min);
        assert_eq!(mesh.max_bounds, max);
        assert_eq!(mesh.center, center);
        assert_eq!(mesh.scale, scale);
    }

    #[test]
    fn normalize_is_a_noop_on_an_empty_mesh() {
        let mut mesh = Mesh {
            triangles: Vec::new(),
            min_bounds: Vec3::ZERO,
            max_bounds: Vec3::ZERO,
            center: Vec3::ZERO,
            scale: 1.0,
        };
        mesh.normalize();
        assert!(mesh.is_empty());
        assert_eq!(mesh.scale, 1.0);
    }

    #[test]
    fn face_normal_of_ccw_triangle_in_xy_plane_points_up_z() {
        let normal = face_normal([Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert!((normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn face_normal_of_degenerate_triangle_is_zero() {
        let normal = face_normal([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]);
        assert_eq!(normal, Vec3::ZERO);
    }
}
