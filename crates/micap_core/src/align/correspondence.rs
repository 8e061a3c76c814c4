use crate::common::transform::RigidTransform;
use nalgebra as na;

/// A single user-chosen point pair: a reference point in the aligned
/// object's local space and the world position of its real-world marker at
/// the reference frame. Consumed by [`solve_offset`] and then discarded.
#[derive(Clone, Copy, Debug)]
pub struct Correspondence {
    pub local_point: na::Point3<f32>,
    pub global_point: na::Point3<f32>,
}

/// Solves the static local offset `O` such that
/// `rigidbody.compose(&O).transform_point(local_point) == global_point`.
///
/// One point pair pins down the three translational degrees of freedom and
/// nothing more, so `O` carries no rotation correction: the object is
/// expected to have been pre-rotated to the documented axis convention
/// before alignment is invoked.
pub fn solve_offset(rigidbody: &RigidTransform, correspondence: &Correspondence) -> RigidTransform {
    // The marker position pulled back into the rigid body's frame.
    let target_in_body = rigidbody.inverse().transform_point(&correspondence.global_point);
    RigidTransform::from_translation(target_in_body - correspondence.local_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tracked_pose() -> RigidTransform {
        RigidTransform::from_parts(
            na::UnitQuaternion::from_euler_angles(0.2, 0.9, -0.4),
            na::Vector3::new(3.0, -1.0, 0.5),
        )
    }

    #[test]
    fn solved_offset_places_local_point_at_marker() {
        let rigidbody = tracked_pose();
        let correspondence = Correspondence {
            local_point: na::Point3::new(0.1, -0.2, 0.05),
            global_point: na::Point3::new(2.5, 0.3, 1.0),
        };
        let offset = solve_offset(&rigidbody, &correspondence);
        let placed = rigidbody.compose(&offset).transform_point(&correspondence.local_point);
        assert_relative_eq!(placed, correspondence.global_point, epsilon = 1e-5);
        assert_relative_eq!(offset.rotation.angle(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn identity_pose_origin_reference() {
        let correspondence = Correspondence {
            local_point: na::Point3::origin(),
            global_point: na::Point3::new(1.0, 0.0, 0.0),
        };
        let offset = solve_offset(&RigidTransform::identity(), &correspondence);
        assert_relative_eq!(offset.translation, na::Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(offset.rotation.angle(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn solving_twice_yields_the_same_offset() {
        let rigidbody = tracked_pose();
        let correspondence = Correspondence {
            local_point: na::Point3::new(-0.4, 0.0, 0.7),
            global_point: na::Point3::new(1.1, 2.2, 3.3),
        };
        let first = solve_offset(&rigidbody, &correspondence);
        let second = solve_offset(&rigidbody, &correspondence);
        assert_relative_eq!(first.translation, second.translation, epsilon = 0.0);
    }

    #[test]
    fn coincident_points_reduce_to_identity_translation() {
        let rigidbody = tracked_pose();
        let local_point = na::Point3::new(0.3, 0.1, -0.2);
        let correspondence = Correspondence {
            local_point,
            global_point: rigidbody.transform_point(&local_point),
        };
        let offset = solve_offset(&rigidbody, &correspondence);
        assert_relative_eq!(offset.translation, na::Vector3::zeros(), epsilon = 1e-5);
    }
}
