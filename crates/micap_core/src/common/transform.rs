use nalgebra as na;

/// Per-axis tolerance for the "scale is exactly 1" preconditions.
pub const SCALE_TOLERANCE: f32 = 1e-4;

/// A rigid transform stored as (rotation, translation).
///
/// Scale and shear are not representable; composing and inverting stays
/// within the rigid group by construction, and rotations are renormalized
/// after every composition to bound floating-point drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    pub rotation: na::UnitQuaternion<f32>,
    pub translation: na::Vector3<f32>,
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self {
            rotation: na::UnitQuaternion::identity(),
            translation: na::Vector3::zeros(),
        }
    }

    pub fn from_parts(rotation: na::UnitQuaternion<f32>, translation: na::Vector3<f32>) -> Self {
        Self { rotation, translation }
    }

    /// A pure translation, rotation left at identity.
    pub fn from_translation(translation: na::Vector3<f32>) -> Self {
        Self {
            rotation: na::UnitQuaternion::identity(),
            translation,
        }
    }

    /// Applies `other` first, then `self`. Associative, not commutative.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut rotation = self.rotation * other.rotation;
        rotation.renormalize();
        Self {
            rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    pub fn transform_point(&self, point: &na::Point3<f32>) -> na::Point3<f32> {
        self.rotation * point + self.translation
    }

    pub fn transform_rotation(&self, rotation: &na::UnitQuaternion<f32>) -> na::UnitQuaternion<f32> {
        let mut rotated = self.rotation * rotation;
        rotated.renormalize();
        rotated
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Whether every axis of `scale` is 1 within [`SCALE_TOLERANCE`].
pub fn is_unit_scale(scale: &na::Vector3<f32>) -> bool {
    scale.iter().all(|s| (s - 1.0).abs() <= SCALE_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sample_transform() -> RigidTransform {
        RigidTransform::from_parts(
            na::UnitQuaternion::from_euler_angles(0.4, -1.1, 0.7),
            na::Vector3::new(1.0, -2.0, 3.5),
        )
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let rot_z = RigidTransform::from_parts(
            na::UnitQuaternion::from_axis_angle(&na::Vector3::z_axis(), FRAC_PI_2),
            na::Vector3::zeros(),
        );
        let shift_x = RigidTransform::from_translation(na::Vector3::new(1.0, 0.0, 0.0));

        // Shift along x, then rotate: the point ends up on the y axis.
        let p = rot_z.compose(&shift_x).transform_point(&na::Point3::origin());
        assert_relative_eq!(p, na::Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        // Rotate first, then shift: the point stays on the x axis.
        let p = shift_x.compose(&rot_z).transform_point(&na::Point3::origin());
        assert_relative_eq!(p, na::Point3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn inverse_law() {
        let a = sample_transform();
        let p = na::Point3::new(-0.3, 2.2, 0.9);
        let round_trip = a.inverse().transform_point(&a.transform_point(&p));
        assert_relative_eq!(round_trip, p, epsilon = 1e-5);

        let composed = a.inverse().compose(&a);
        assert_relative_eq!(composed.translation, na::Vector3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(composed.rotation.angle(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn transform_rotation_composes_orientations() {
        let a = sample_transform();
        let r = na::UnitQuaternion::from_axis_angle(&na::Vector3::x_axis(), 0.5);
        let expected = a.rotation * r;
        assert_relative_eq!(a.transform_rotation(&r).angle_to(&expected), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn unit_scale_tolerance() {
        assert!(is_unit_scale(&na::Vector3::new(1.0, 1.0, 1.0)));
        assert!(is_unit_scale(&na::Vector3::new(1.00005, 0.99995, 1.0)));
        assert!(!is_unit_scale(&na::Vector3::new(1.0, 1.0, 1.01)));
        assert!(!is_unit_scale(&na::Vector3::new(2.0, 2.0, 2.0)));
    }
}
