/// Procedural mesh generators
///
/// Every generator is a pure function of its parameters. Small or zero
/// parameters give degenerate meshes (no faces) instead of failing.
use std::f64::consts::TAU;

use crate::geometry::{Face, Mesh};
use crate::vector::{self, point, Vector4};

/// Regular polygon on the unit circle in the z = 0 plane
///
/// Ring vertex `i` sits at angle `-TAU * i / point_count`, clockwise seen from
/// +z. Triangles and squares are split directly; from five points on a centre
/// vertex is inserted at index 0 and the ring is fanned around it.
pub fn polygon(point_count: usize) -> Mesh {
    let fan = point_count > 4;
    let mut vertices = Vec::with_capacity(point_count + usize::from(fan));

    if fan {
        vertices.push(point(0.0, 0.0, 0.0));
    }

    let point_angle = TAU / point_count as f64;
    for i in 0..point_count {
        let angle = -point_angle * i as f64;
        vertices.push(point(angle.cos(), angle.sin(), 0.0));
    }

    let faces: Vec<Face> = match point_count {
        0..=2 => Vec::new(),
        3 => vec![[0, 1, 2]],
        4 => vec![[0, 1, 2], [0, 2, 3]],
        _ => (1..point_count)
            .map(|i| [0, i, i + 1])
            .chain(std::iter::once([0, point_count, 1]))
            .collect(),
    };

    Mesh::from_generated(vertices, faces)
}

/// Corners of a unit icosahedron.
const ICOSAHEDRON_X: f64 = 0.525731112119133606;
const ICOSAHEDRON_Z: f64 = 0.850650808352039932;

const ICOSAHEDRON_VERTICES: [[f64; 3]; 12] = [
    [-ICOSAHEDRON_X, 0.0, ICOSAHEDRON_Z],
    [ICOSAHEDRON_X, 0.0, ICOSAHEDRON_Z],
    [-ICOSAHEDRON_X, 0.0, -ICOSAHEDRON_Z],
    [ICOSAHEDRON_X, 0.0, -ICOSAHEDRON_Z],
    [0.0, ICOSAHEDRON_Z, ICOSAHEDRON_X],
    [0.0, ICOSAHEDRON_Z, -ICOSAHEDRON_X],
    [0.0, -ICOSAHEDRON_Z, ICOSAHEDRON_X],
    [0.0, -ICOSAHEDRON_Z, -ICOSAHEDRON_X],
    [ICOSAHEDRON_Z, ICOSAHEDRON_X, 0.0],
    [-ICOSAHEDRON_Z, ICOSAHEDRON_X, 0.0],
    [ICOSAHEDRON_Z, -ICOSAHEDRON_X, 0.0],
    [-ICOSAHEDRON_Z, -ICOSAHEDRON_X, 0.0],
];

const ICOSAHEDRON_FACES: [Face; 20] = [
    [0, 1, 4],
    [0, 4, 9],
    [9, 4, 5],
    [4, 8, 5],
    [4, 1, 8],
    [8, 1, 10],
    [8, 10, 3],
    [5, 8, 3],
    [5, 3, 2],
    [2, 3, 7],
    [7, 3, 10],
    [7, 10, 6],
    [7, 6, 11],
    [11, 6, 0],
    [0, 6, 1],
    [6, 10, 1],
    [9, 11, 0],
    [9, 2, 11],
    [9, 5, 2],
    [7, 11, 2],
];

/// Geodesic sphere of unit radius
///
/// Each icosahedron face is split `depth` times into four. Leaf triangles
/// get their own three vertices, so the mesh has `20 * 4^depth` faces and
/// three times as many vertices.
pub fn geodesic_sphere(depth: u32) -> Mesh {
    let face_count = 20 * 4usize.pow(depth);
    let mut builder = SphereBuilder {
        points: Vec::with_capacity(face_count * 3),
        faces: Vec::with_capacity(face_count),
    };

    let corners = ICOSAHEDRON_VERTICES.map(|[x, y, z]| point(x, y, z));
    for [a, b, c] in ICOSAHEDRON_FACES {
        builder.subdivide(corners[a], corners[b], corners[c], depth);
    }

    Mesh::from_generated(builder.points, builder.faces)
}

struct SphereBuilder {
    points: Vec<Vector4>,
    faces: Vec<Face>,
}

impl SphereBuilder {
    fn subdivide(&mut self, v1: Vector4, v2: Vector4, v3: Vector4, depth: u32) {
        if depth == 0 {
            let first = self.points.len();
            self.points.extend([v1, v2, v3]);
            self.faces.push([first, first + 1, first + 2]);
            return;
        }

        let midpoint = |a: &Vector4, b: &Vector4| {
            let mut m = vector::add(a, b);
            vector::normalize_in_place(&mut m);
            m
        };

        let v12 = midpoint(&v1, &v2);
        let v23 = midpoint(&v2, &v3);
        let v31 = midpoint(&v3, &v1);

        self.subdivide(v1, v12, v31, depth - 1);
        self.subdivide(v2, v23, v12, depth - 1);
        self.subdivide(v3, v31, v23, depth - 1);
        self.subdivide(v12, v23, v31, depth - 1);
    }
}

/// Torus around the z axis
///
/// The tube (small ring) is swept around the large ring. Vertices form a
/// `(small_divisions + 1) x (large_divisions + 1)` grid whose last row and
/// column repeat the first, and each grid cell becomes two triangles.
pub fn torus(
    large_radius: f64,
    small_radius: f64,
    small_divisions: usize,
    large_divisions: usize,
) -> Mesh {
    let step = |divisions: usize| {
        if divisions == 0 {
            0.0
        } else {
            TAU / divisions as f64
        }
    };
    let small_step = step(small_divisions);
    let large_step = step(large_divisions);

    let mut vertices = Vec::with_capacity((small_divisions + 1) * (large_divisions + 1));
    for i in 0..=small_divisions {
        let (small_sin, small_cos) = (i as f64 * small_step).sin_cos();
        let base_radius = large_radius + small_radius * small_cos;

        for j in 0..=large_divisions {
            let (large_sin, large_cos) = (j as f64 * large_step).sin_cos();
            vertices.push(point(
                base_radius * large_cos,
                base_radius * large_sin,
                small_radius * small_sin,
            ));
        }
    }

    let row = large_divisions + 1;
    let mut faces = Vec::with_capacity(2 * small_divisions * large_divisions);
    for i in 0..small_divisions {
        for j in 0..large_divisions {
            let v1 = i * row + j;
            let v2 = v1 + row;
            faces.push([v1, v1 + 1, v2]);
            faces.push([v2, v1 + 1, v2 + 1]);
        }
    }

    Mesh::from_generated(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_degenerate() {
        assert_eq!(polygon(0).vertex_count(), 0);

        let single = polygon(1);
        assert_eq!(single.vertex_count(), 1);
        assert_eq!(single.face_count(), 0);

        let edge = polygon(2);
        assert_eq!(edge.vertex_count(), 2);
        assert_eq!(edge.face_count(), 0);
    }

    #[test]
    fn test_polygon_triangle() {
        let mesh = polygon(3);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_polygon_square() {
        let mesh = polygon(4);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_polygon_fan() {
        let mesh = polygon(6);
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.faces()[0], [0, 1, 2]);
        assert_eq!(mesh.faces()[5], [0, 6, 1]);
        assert_eq!(mesh.vertices()[0], point(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_polygon_ring_is_clockwise() {
        let mesh = polygon(4);
        let v = mesh.vertices();
        assert!((v[0].x - 1.0).abs() < 1e-12);
        // quarter turn clockwise from +x lands on -y
        assert!((v[1].y + 1.0).abs() < 1e-12);
        for vertex in v {
            assert!((vector::distance(vertex) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sphere_depth_zero() {
        let mesh = geodesic_sphere(0);
        assert_eq!(mesh.vertex_count(), 60);
        assert_eq!(mesh.face_count(), 20);
        assert_eq!(mesh.faces()[1], [3, 4, 5]);
    }

    #[test]
    fn test_sphere_depth_one() {
        let mesh = geodesic_sphere(1);
        assert_eq!(mesh.vertex_count(), 240);
        assert_eq!(mesh.face_count(), 80);
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        for depth in 0..4 {
            let mesh = geodesic_sphere(depth);
            for v in mesh.vertices() {
                assert!((vector::distance(v) - 1.0).abs() < 1e-9);
                assert_eq!(v.w, 1.0);
            }
        }
    }

    #[test]
    fn test_torus_counts() {
        let mesh = torus(7.0, 2.0, 3, 4);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.face_count(), 24);
        assert_eq!(mesh.faces()[0], [0, 1, 5]);
        assert_eq!(mesh.faces()[1], [5, 1, 6]);
    }

    #[test]
    fn test_torus_seam_repeats_start() {
        let mesh = torus(7.0, 2.0, 8, 12);
        let v = mesh.vertices();
        assert_eq!(v[0], point(9.0, 0.0, 0.0));
        let last_in_row = v[12];
        assert!((last_in_row.x - 9.0).abs() < 1e-9);
        assert!(last_in_row.y.abs() < 1e-9);
    }

    #[test]
    fn test_torus_zero_divisions() {
        let mesh = torus(7.0, 2.0, 0, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.vertices()[0].iter().all(|c| c.is_finite()));

        let strip = torus(7.0, 2.0, 0, 5);
        assert_eq!(strip.vertex_count(), 6);
        assert_eq!(strip.face_count(), 0);
    }
}
