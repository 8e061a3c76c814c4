use nalgebra as na;

/// Converts XYZ Euler angles (radians) to a unit quaternion.
//following https://github.com/mrdoob/three.js/blob/034181b82baa318ff19c9e8bcfc41d07411dc0cd/src/math/Quaternion.js#L201
pub fn euler_to_quaternion(euler_x: f32, euler_y: f32, euler_z: f32) -> na::UnitQuaternion<f32> {
    let c1 = f32::cos(euler_x / 2.0);
    let c2 = f32::cos(euler_y / 2.0);
    let c3 = f32::cos(euler_z / 2.0);
    let s1 = f32::sin(euler_x / 2.0);
    let s2 = f32::sin(euler_y / 2.0);
    let s3 = f32::sin(euler_z / 2.0);
    let rot = na::Quaternion::new(
        c1 * c2 * c3 - s1 * s2 * s3,
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
    );
    na::UnitQuaternion::new_normalize(rot)
}

/// Builds the matrix whose rows are the given world-space axes.
/// Multiplying a world-space vector by it yields the coordinates of that
/// vector in the frame spanned by the axes. Axes must be orthonormal.
pub fn basis_from_rows(x_axis: &na::Vector3<f32>, y_axis: &na::Vector3<f32>, z_axis: &na::Vector3<f32>) -> na::Matrix3<f32> {
    na::Matrix3::from_rows(&[x_axis.transpose(), y_axis.transpose(), z_axis.transpose()])
}

/// Converts an orthonormal matrix to a unit quaternion.
pub fn matrix_to_quaternion(mat: &na::Matrix3<f32>) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::from_rotation_matrix(&na::Rotation3::from_matrix_unchecked(*mat))
}
