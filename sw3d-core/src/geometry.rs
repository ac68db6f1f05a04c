/// Geometry primitives for 3D rendering
use crate::error::{Error, Result};
use crate::vector::{self, point, Vector4};

/// Three vertex indices into a mesh.
pub type Face = [usize; 3];

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector4; 3],
}

impl Triangle {
    pub fn new(v0: Vector4, v1: Vector4, v2: Vector4) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The triangle a face selects out of a point list.
    pub fn from_face(points: &[Vector4], face: &Face) -> Self {
        Self::new(points[face[0]], points[face[1]], points[face[2]])
    }

    /// Calculate the face normal from the triangle's vertices
    ///
    /// Counter-clockwise winding (right-handed) gives the normal's direction.
    /// Degenerate triangles yield NaN components.
    pub fn calculate_normal(&self) -> Vector4 {
        let [v0, v1, v2] = &self.vertices;

        let edge1 = vector::subtract(v1, v0);
        let edge2 = vector::subtract(v2, v0);

        let mut normal = vector::cross(&edge1, &edge2);
        vector::normalize_in_place(&mut normal);
        normal
    }

    /// Midpoint of the axis-aligned bounding box.
    ///
    /// Not the true centroid; lighting uses this value.
    pub fn bounding_center(&self) -> Vector4 {
        let mid = |axis: usize| {
            let values = self.vertices.map(|v| v[axis]);
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            min + (max - min) / 2.0
        };

        point(mid(0), mid(1), mid(2))
    }
}

/// An indexed triangle mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<Vector4>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking that every face index points at a vertex.
    pub fn new(vertices: Vec<Vector4>, faces: Vec<Face>) -> Result<Self> {
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::FaceIndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// For generators whose indices are valid by construction.
    pub(crate) fn from_generated(vertices: Vec<Vector4>, faces: Vec<Face>) -> Self {
        debug_assert!(faces.iter().flatten().all(|&i| i < vertices.len()));
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vector4] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A single vertex at the origin.
    pub fn point() -> Self {
        Self::from_generated(vec![point(0.0, 0.0, 0.0)], Vec::new())
    }

    /// The unit cube asset: corners at ±1, twelve outward-wound triangles.
    ///
    /// Vertex `i` has x from bit 0, y from bit 1 and z from bit 2 of `i`.
    pub fn cube() -> Self {
        let vertices = (0..8)
            .map(|i| {
                let coord = |bit: usize| if i & (1 << bit) != 0 { 1.0 } else { -1.0 };
                point(coord(0), coord(1), coord(2))
            })
            .collect();

        Self::from_generated(vertices, CUBE_FACES.to_vec())
    }
}

/// Pairs of corners joined by the cube's twelve edges.
pub const CUBE_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 2],
    [1, 3],
    [2, 3],
    [4, 5],
    [4, 6],
    [5, 7],
    [6, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

const CUBE_FACES: [Face; 12] = [
    // z = -1
    [0, 2, 1],
    [1, 2, 3],
    // z = +1
    [4, 5, 6],
    [5, 7, 6],
    // x = -1
    [0, 4, 2],
    [2, 4, 6],
    // x = +1
    [1, 3, 5],
    [3, 7, 5],
    // y = -1
    [0, 1, 4],
    [1, 5, 4],
    // y = +1
    [2, 6, 3],
    [3, 6, 7],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_follows_winding() {
        let a = point(0.0, 0.0, 5.0);
        let b = point(1.0, 0.0, 5.0);
        let c = point(0.0, 1.0, 5.0);

        let n = Triangle::new(a, b, c).calculate_normal();
        assert!((n.z - 1.0).abs() < 1e-12);

        let flipped = Triangle::new(a, c, b).calculate_normal();
        assert!((flipped.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_center_is_not_centroid() {
        let t = Triangle::new(point(0.0, 0.0, 0.0), point(4.0, 0.0, 0.0), point(0.0, 2.0, 2.0));
        let c = t.bounding_center();
        assert_eq!((c.x, c.y, c.z, c.w), (2.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_mesh_rejects_bad_index() {
        let err = Mesh::new(vec![point(0.0, 0.0, 0.0); 3], vec![[0, 1, 2], [0, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            Error::FaceIndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3,
            }
        );
    }

    #[test]
    fn test_point_mesh() {
        let mesh = Mesh::point();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
        assert_eq!(cube.vertices()[0], point(-1.0, -1.0, -1.0));
        assert_eq!(cube.vertices()[7], point(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let cube = Mesh::cube();
        for face in cube.faces() {
            let triangle = Triangle::from_face(cube.vertices(), face);
            let normal = triangle.calculate_normal();
            let center = triangle.bounding_center();
            // outward normals agree with the direction from the cube centre
            assert!(vector::dot(&normal, &center) > 0.0, "face {:?}", face);
        }
    }

    #[test]
    fn test_cube_edges_join_neighbours() {
        for [a, b] in CUBE_EDGES {
            assert_eq!((a ^ b).count_ones(), 1);
        }
    }
}
