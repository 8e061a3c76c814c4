use crate::{Error, Result};
use nalgebra as na;
use std::collections::{BTreeMap, BTreeSet};

/// One captured joint transform: local translation and rotation relative to
/// the joint's parent, at the capture device's physical scale.
#[derive(Clone, Copy, Debug)]
pub struct JointSample {
    pub translation: na::Vector3<f32>,
    pub rotation: na::UnitQuaternion<f32>,
}

impl JointSample {
    pub fn new(translation: na::Vector3<f32>, rotation: na::UnitQuaternion<f32>) -> Self {
        Self { translation, rotation }
    }

    pub fn identity() -> Self {
        Self {
            translation: na::Vector3::zeros(),
            rotation: na::UnitQuaternion::identity(),
        }
    }
}

/// All joint samples captured at one instant. `time` is in seconds; the
/// host maps it to scene frames.
#[derive(Clone, Debug)]
pub struct PoseFrame {
    pub time: f32,
    pub joints: BTreeMap<String, JointSample>,
}

/// A time-ordered sequence of pose frames, immutable once built.
#[derive(Clone, Debug)]
pub struct CaptureClip {
    frames: Vec<PoseFrame>,
}

impl CaptureClip {
    /// Builds a clip, rejecting empty input and non-increasing frame times.
    pub fn new(frames: Vec<PoseFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::DataFormat("capture clip contains no frames".to_string()));
        }
        for pair in frames.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(Error::DataFormat(format!(
                    "capture clip frame times must be strictly increasing (got {} after {})",
                    pair[1].time, pair[0].time
                )));
            }
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[PoseFrame] {
        &self.frames
    }

    /// Seconds from the first to the last frame.
    pub fn duration(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time) - self.frames.first().map_or(0.0, |f| f.time)
    }

    /// Union of joint names appearing anywhere in the clip.
    pub fn joint_names(&self) -> BTreeSet<&str> {
        self.frames
            .iter()
            .flat_map(|frame| frame.joints.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(time: f32, names: &[&str]) -> PoseFrame {
        PoseFrame {
            time,
            joints: names.iter().map(|n| (n.to_string(), JointSample::identity())).collect(),
        }
    }

    #[test]
    fn rejects_empty_and_unordered_clips() {
        assert!(matches!(CaptureClip::new(vec![]), Err(Error::DataFormat(_))));
        let unordered = vec![frame(0.0, &["Wrist"]), frame(0.0, &["Wrist"])];
        assert!(matches!(CaptureClip::new(unordered), Err(Error::DataFormat(_))));
    }

    #[test]
    fn duration_and_joint_union() {
        let clip = CaptureClip::new(vec![frame(0.5, &["Wrist"]), frame(1.25, &["Wrist", "Thumb 1"])]).unwrap();
        assert!((clip.duration() - 0.75).abs() < 1e-6);
        let names = clip.joint_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("Thumb 1"));
    }
}
