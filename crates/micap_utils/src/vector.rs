use na::{Point3, Vector3};
use ndarray as nd;
extern crate nalgebra as na;

pub type Vector3f = Vector3<f32>;
pub type Point3f = Point3<f32>;

pub fn vec_from_array_f(positions: &nd::Array2<f32>, row_index: usize) -> Vector3f {
    let row = positions.row(row_index);
    Vector3f::new(row[0], row[1], row[2])
}

pub fn point_from_array_f(positions: &nd::Array2<f32>, row_index: usize) -> Point3f {
    let row = positions.row(row_index);
    Point3f::new(row[0], row[1], row[2])
}

pub fn vec_from_fixed(v: &[f32; 3]) -> Vector3f {
    Vector3f::new(v[0], v[1], v[2])
}

pub fn to_fixed_vec3(v: &Vector3f) -> [f32; 3] {
    [v.x, v.y, v.z]
}
