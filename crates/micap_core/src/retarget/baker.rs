use crate::retarget::retargeter::BoneSample;
use nalgebra as na;
use std::collections::BTreeMap;

/// The animation-subsystem boundary: accepts a bone identifier, a time and a
/// local transform, and persists it as exactly one sampled keyframe. No
/// interpolation, no resampling, no frame-rate conversion.
pub trait KeyframeSink {
    fn insert_keyframe(&mut self, bone: &str, time: f32, translation: &na::Vector3<f32>, rotation: &na::UnitQuaternion<f32>);
}

/// Writes every retargeted sample into the sink, preserving order.
pub fn bake_keyframes<S: KeyframeSink>(samples: &[BoneSample], sink: &mut S) {
    for sample in samples {
        sink.insert_keyframe(&sample.bone, sample.time, &sample.translation, &sample.rotation);
    }
}

/// One animation channel: `(time, value)` keyframe points in insertion
/// order.
#[derive(Clone, Debug, Default)]
pub struct Channel {
    points: Vec<(f32, f32)>,
}

impl Channel {
    pub fn push(&mut self, time: f32, value: f32) {
        self.points.push((time, value));
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }
}

/// Location channels of one bone, one per axis.
#[derive(Clone, Debug, Default)]
pub struct LocationChannels {
    pub x: Channel,
    pub y: Channel,
    pub z: Channel,
}

impl LocationChannels {
    fn insert(&mut self, time: f32, translation: &na::Vector3<f32>) {
        self.x.push(time, translation.x);
        self.y.push(time, translation.y);
        self.z.push(time, translation.z);
    }
}

/// Quaternion rotation channels of one bone.
#[derive(Clone, Debug, Default)]
pub struct RotationChannels {
    pub w: Channel,
    pub x: Channel,
    pub y: Channel,
    pub z: Channel,
}

impl RotationChannels {
    fn insert(&mut self, time: f32, rotation: &na::UnitQuaternion<f32>) {
        self.w.push(time, rotation.w);
        self.x.push(time, rotation.i);
        self.y.push(time, rotation.j);
        self.z.push(time, rotation.k);
    }
}

/// Location and rotation channels of one bone.
#[derive(Clone, Debug, Default)]
pub struct BoneChannels {
    pub location: LocationChannels,
    pub rotation: RotationChannels,
}

/// In-memory keyframe store, one channel group per bone. Reference
/// implementation of [`KeyframeSink`]; hosts with real animation tracks
/// mirror this layout (location x/y/z plus quaternion w/x/y/z curves).
#[derive(Clone, Debug, Default)]
pub struct ChannelBank {
    bones: BTreeMap<String, BoneChannels>,
}

impl ChannelBank {
    pub fn bone(&self, name: &str) -> Option<&BoneChannels> {
        self.bones.get(name)
    }

    pub fn bones(&self) -> impl Iterator<Item = (&str, &BoneChannels)> {
        self.bones.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn num_bones(&self) -> usize {
        self.bones.len()
    }

    /// Total keyframes across all bones (one per baked sample).
    pub fn num_keyframes(&self) -> usize {
        self.bones.values().map(|c| c.location.x.points().len()).sum()
    }
}

impl KeyframeSink for ChannelBank {
    fn insert_keyframe(&mut self, bone: &str, time: f32, translation: &na::Vector3<f32>, rotation: &na::UnitQuaternion<f32>) {
        let channels = self.bones.entry(bone.to_string()).or_default();
        channels.location.insert(time, translation);
        channels.rotation.insert(time, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retarget::binding::BoneBinding;
    use crate::retarget::clip::{CaptureClip, JointSample, PoseFrame};
    use crate::retarget::retargeter::retarget_clip;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    #[test]
    fn bakes_one_keyframe_per_sample() {
        let frames = vec![
            PoseFrame {
                time: 0.0,
                joints: BTreeMap::from([(
                    "wrist".to_string(),
                    JointSample::new(na::Vector3::new(2.0, 0.0, 0.0), na::UnitQuaternion::identity()),
                )]),
            },
            PoseFrame {
                time: 1.0,
                joints: BTreeMap::from([(
                    "wrist".to_string(),
                    JointSample::new(na::Vector3::new(4.0, 0.0, 0.0), na::UnitQuaternion::identity()),
                )]),
            },
        ];
        let clip = CaptureClip::new(frames).unwrap();
        let mut binding = BoneBinding::new();
        binding.insert("wrist", "Wrist");

        let samples = retarget_clip(&clip, &binding, 0.5, &na::Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let mut bank = ChannelBank::default();
        bake_keyframes(&samples, &mut bank);

        assert_eq!(bank.num_bones(), 1);
        let wrist = bank.bone("Wrist").unwrap();
        assert_eq!(wrist.location.x.points(), &[(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(wrist.location.y.points(), &[(0.0, 0.0), (1.0, 0.0)]);
        assert_relative_eq!(wrist.rotation.w.points()[0].1, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn keyframe_order_follows_sample_order() {
        let mut bank = ChannelBank::default();
        let q = na::UnitQuaternion::identity();
        bank.insert_keyframe("b", 0.0, &na::Vector3::zeros(), &q);
        bank.insert_keyframe("b", 0.5, &na::Vector3::zeros(), &q);
        bank.insert_keyframe("b", 1.5, &na::Vector3::zeros(), &q);
        let times: Vec<f32> = bank.bone("b").unwrap().location.x.points().iter().map(|p| p.0).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.5]);
    }
}
