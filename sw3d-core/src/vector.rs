/// Homogeneous vector helpers
///
/// Only the x, y and z components take part in these operations. The w
/// component is a tag: 1 for points, and every operation that builds a new
/// vector sets it to [`POINT_W`].
use nalgebra::Vector3;

pub type Vector4 = nalgebra::Vector4<f64>;

/// Tag stored in the w component of points.
pub const POINT_W: f64 = 1.0;

/// Build a point (`w = 1`).
pub fn point(x: f64, y: f64, z: f64) -> Vector4 {
    Vector4::new(x, y, z, POINT_W)
}

fn xyz(v: &Vector4) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

fn tagged(v: Vector3<f64>) -> Vector4 {
    Vector4::new(v.x, v.y, v.z, POINT_W)
}

pub fn dot(a: &Vector4, b: &Vector4) -> f64 {
    xyz(a).dot(&xyz(b))
}

pub fn cross(a: &Vector4, b: &Vector4) -> Vector4 {
    tagged(xyz(a).cross(&xyz(b)))
}

pub fn add(a: &Vector4, b: &Vector4) -> Vector4 {
    tagged(xyz(a) + xyz(b))
}

pub fn subtract(a: &Vector4, b: &Vector4) -> Vector4 {
    tagged(xyz(a) - xyz(b))
}

/// Squared length of the x, y, z part, measured from the origin.
pub fn squared_distance(v: &Vector4) -> f64 {
    xyz(v).norm_squared()
}

pub fn distance(v: &Vector4) -> f64 {
    squared_distance(v).sqrt()
}

/// Return a unit-length copy of `v`.
///
/// `v` must not be the zero vector: the division is not guarded and the
/// result is NaN in that case.
pub fn normalize(v: &Vector4) -> Vector4 {
    let mut copy = tagged(xyz(v));
    normalize_in_place(&mut copy);
    copy
}

/// Normalize `v` in place and hand it back.
///
/// Same precondition as [`normalize`]; w is left untouched.
pub fn normalize_in_place(v: &mut Vector4) -> &mut Vector4 {
    let length = distance(v);
    v.x /= length;
    v.y /= length;
    v.z /= length;
    v
}
