use crate::align::correspondence::{solve_offset, Correspondence};
use crate::common::marker::MarkerSet;
use crate::common::transform::{is_unit_scale, RigidTransform};
use crate::{Error, Result};
use log::{debug, info};
use nalgebra as na;

/// Per-frame rigid-body pose lookup, injected so the solver never depends on
/// a concrete tracking pipeline. Poses are trusted as supplied; orientation
/// is never re-derived from raw markers here.
pub trait PoseProvider {
    fn pose_at(&self, frame: usize) -> Option<RigidTransform>;
}

/// Pose stream backed by a frame-indexed vector.
#[derive(Clone, Debug, Default)]
pub struct VecPoseProvider {
    poses: Vec<RigidTransform>,
}

impl VecPoseProvider {
    pub fn new(poses: Vec<RigidTransform>) -> Self {
        Self { poses }
    }
}

impl PoseProvider for VecPoseProvider {
    fn pose_at(&self, frame: usize) -> Option<RigidTransform> {
        self.poses.get(frame).copied()
    }
}

/// Scene-side collaborator for the alignment operation. The host resolves
/// opaque object identifiers and owns the constraint storage; the core only
/// ever hands it a finished offset.
pub trait AlignmentHost {
    /// Local scale of the object, one component per axis. `None` when the
    /// identifier does not resolve.
    fn object_scale(&self, object: &str) -> Option<na::Vector3<f32>>;

    /// Position of the user-placed proxy point, expressed in the object's
    /// local space. `None` when no proxy point is set on the object.
    fn reference_point(&self, object: &str) -> Option<na::Point3<f32>>;

    /// Durably attach `offset` as the object's parent/constraint transform
    /// against `rigidbody`, replacing any offset from a previous alignment.
    fn attach_offset(&mut self, object: &str, rigidbody: &str, offset: &RigidTransform);
}

/// Selection inputs for one alignment operation, passed explicitly instead
/// of living in host-global state.
#[derive(Clone, Debug)]
pub struct AlignmentRequest<'a> {
    pub object: &'a str,
    pub rigidbody: &'a str,
    pub markers: &'a MarkerSet,
    /// Index of the marker chosen as the proxy point's real-world
    /// counterpart.
    pub reference_marker: usize,
    /// Frame at which the correspondence was captured.
    pub reference_frame: usize,
}

/// One-shot alignment: checks preconditions, solves the offset from the
/// single point correspondence and attaches it through the host. Once
/// attached, `object_pose(t) = rigidbody_pose(t) ∘ offset` holds for every
/// frame because the rigid-body stream is already correct for every frame.
///
/// Nothing is written to the host until all checks have passed.
pub fn align_object<H, P>(host: &mut H, provider: &P, request: &AlignmentRequest<'_>) -> Result<RigidTransform>
where
    H: AlignmentHost,
    P: PoseProvider,
{
    let scale = host
        .object_scale(request.object)
        .ok_or_else(|| Error::Configuration(format!("object '{}' is not set or cannot be resolved", request.object)))?;
    if !is_unit_scale(&scale) {
        return Err(Error::Configuration(format!(
            "object '{}' must have scale 1 on all axes before alignment (found [{}, {}, {}])",
            request.object, scale.x, scale.y, scale.z
        )));
    }

    let local_point = host
        .reference_point(request.object)
        .ok_or_else(|| Error::Configuration(format!("no reference point is set on object '{}'", request.object)))?;
    let global_point = request.markers.position(request.reference_marker)?;

    let pose = provider.pose_at(request.reference_frame).ok_or_else(|| {
        Error::Correspondence(format!(
            "rigid body '{}' has no pose at reference frame {}",
            request.rigidbody, request.reference_frame
        ))
    })?;

    let offset = solve_offset(&pose, &Correspondence { local_point, global_point });
    debug!(
        "solved alignment offset for '{}': translation [{}, {}, {}]",
        request.object, offset.translation.x, offset.translation.y, offset.translation.z
    );

    host.attach_offset(request.object, request.rigidbody, &offset);
    info!("aligned '{}' to rigid body '{}'", request.object, request.rigidbody);
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::marker::Marker;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    struct FakeHost {
        scale: na::Vector3<f32>,
        reference_point: Option<na::Point3<f32>>,
        attached: HashMap<String, (String, RigidTransform)>,
    }

    impl FakeHost {
        fn unit() -> Self {
            Self {
                scale: na::Vector3::new(1.0, 1.0, 1.0),
                reference_point: Some(na::Point3::new(0.0, 0.5, 0.0)),
                attached: HashMap::new(),
            }
        }
    }

    impl AlignmentHost for FakeHost {
        fn object_scale(&self, _object: &str) -> Option<na::Vector3<f32>> {
            Some(self.scale)
        }

        fn reference_point(&self, _object: &str) -> Option<na::Point3<f32>> {
            self.reference_point
        }

        fn attach_offset(&mut self, object: &str, rigidbody: &str, offset: &RigidTransform) {
            self.attached.insert(object.to_string(), (rigidbody.to_string(), *offset));
        }
    }

    fn request<'a>(markers: &'a MarkerSet) -> AlignmentRequest<'a> {
        AlignmentRequest {
            object: "bow",
            rigidbody: "bow_rb",
            markers,
            reference_marker: 0,
            reference_frame: 0,
        }
    }

    #[test]
    fn attaches_offset_satisfying_the_correspondence() {
        let markers = MarkerSet::new(vec![Marker::new("frog", na::Point3::new(2.0, 0.5, -1.0))]);
        let pose = RigidTransform::from_parts(
            na::UnitQuaternion::from_euler_angles(0.1, -0.3, 0.8),
            na::Vector3::new(0.4, 1.2, -0.6),
        );
        let provider = VecPoseProvider::new(vec![pose]);
        let mut host = FakeHost::unit();

        let offset = align_object(&mut host, &provider, &request(&markers)).unwrap();

        let (rigidbody, attached) = &host.attached["bow"];
        assert_eq!(rigidbody, "bow_rb");
        assert_relative_eq!(attached.translation, offset.translation, epsilon = 0.0);

        let placed = pose.compose(attached).transform_point(&na::Point3::new(0.0, 0.5, 0.0));
        assert_relative_eq!(placed, na::Point3::new(2.0, 0.5, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn rerunning_overwrites_the_previous_offset() {
        let markers_a = MarkerSet::new(vec![Marker::new("frog", na::Point3::new(1.0, 0.0, 0.0))]);
        let markers_b = MarkerSet::new(vec![Marker::new("frog", na::Point3::new(5.0, 0.0, 0.0))]);
        let provider = VecPoseProvider::new(vec![RigidTransform::identity()]);
        let mut host = FakeHost::unit();

        align_object(&mut host, &provider, &request(&markers_a)).unwrap();
        align_object(&mut host, &provider, &request(&markers_b)).unwrap();

        assert_eq!(host.attached.len(), 1);
        let (_, attached) = &host.attached["bow"];
        assert_relative_eq!(attached.translation.x, 4.5, epsilon = 1e-6);
    }

    #[test]
    fn non_unit_scale_is_rejected_before_any_mutation() {
        let markers = MarkerSet::new(vec![Marker::new("frog", na::Point3::origin())]);
        let provider = VecPoseProvider::new(vec![RigidTransform::identity()]);
        let mut host = FakeHost::unit();
        host.scale = na::Vector3::new(1.0, 2.0, 1.0);

        let result = align_object(&mut host, &provider, &request(&markers));
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(host.attached.is_empty());
    }

    #[test]
    fn missing_proxy_point_is_a_configuration_error() {
        let markers = MarkerSet::new(vec![Marker::new("frog", na::Point3::origin())]);
        let provider = VecPoseProvider::new(vec![RigidTransform::identity()]);
        let mut host = FakeHost::unit();
        host.reference_point = None;

        let result = align_object(&mut host, &provider, &request(&markers));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn dropped_marker_and_missing_pose_are_correspondence_errors() {
        let provider = VecPoseProvider::new(vec![RigidTransform::identity()]);
        let mut host = FakeHost::unit();

        let dropped = MarkerSet::new(vec![Marker::missing("frog")]);
        assert!(matches!(
            align_object(&mut host, &provider, &request(&dropped)),
            Err(Error::Correspondence(_))
        ));

        let markers = MarkerSet::new(vec![Marker::new("frog", na::Point3::origin())]);
        let empty_provider = VecPoseProvider::default();
        assert!(matches!(
            align_object(&mut host, &empty_provider, &request(&markers)),
            Err(Error::Correspondence(_))
        ));
        assert!(host.attached.is_empty());
    }
}
