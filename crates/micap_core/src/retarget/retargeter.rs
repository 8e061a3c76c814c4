use crate::common::transform::is_unit_scale;
use crate::retarget::binding::BoneBinding;
use crate::retarget::clip::CaptureClip;
use crate::{Error, Result};
use log::debug;
use nalgebra as na;

/// One retargeted keyframe-to-be: a bone's local transform at a point in
/// time, expressed relative to the bone's rest pose.
#[derive(Clone, Debug)]
pub struct BoneSample {
    pub bone: String,
    pub time: f32,
    pub translation: na::Vector3<f32>,
    pub rotation: na::UnitQuaternion<f32>,
}

/// Maps the clip's joint samples onto bound bones.
///
/// Translations are multiplied by `palm_size` to reconcile the capture
/// device's physical units with the skeleton's modeling units; rotations are
/// composed directly onto the bone's local axis, relying on capture source
/// and rig sharing an axis convention per joint. Unbound joints are skipped.
///
/// Fails before producing any sample when `palm_size` is not positive, when
/// the armature scale is not 1 (it would compound multiplicatively with
/// `palm_size`), or when no clip joint matches any bound bone.
pub fn retarget_clip(
    clip: &CaptureClip,
    binding: &BoneBinding,
    palm_size: f32,
    armature_scale: &na::Vector3<f32>,
) -> Result<Vec<BoneSample>> {
    if !(palm_size > 0.0) {
        return Err(Error::Configuration(format!(
            "palm size must be a positive length (got {palm_size})"
        )));
    }
    if !is_unit_scale(armature_scale) {
        return Err(Error::Configuration(format!(
            "the target armature must have scale 1 on all axes (found [{}, {}, {}]); \
             apply the scale before importing",
            armature_scale.x, armature_scale.y, armature_scale.z
        )));
    }

    let bound: Vec<&str> = clip
        .joint_names()
        .into_iter()
        .filter(|name| binding.bone_for(name).is_some())
        .collect();
    if bound.is_empty() {
        return Err(Error::Binding(
            "none of the captured joints match a bone in the current selection".to_string(),
        ));
    }
    debug!("retargeting {} of {} captured joints", bound.len(), clip.joint_names().len());

    let mut samples = Vec::with_capacity(clip.frames().len() * bound.len());
    for frame in clip.frames() {
        for (joint, sample) in &frame.joints {
            let Some(bone) = binding.bone_for(joint) else {
                continue;
            };
            samples.push(BoneSample {
                bone: bone.to_string(),
                time: frame.time,
                translation: sample.translation * palm_size,
                rotation: sample.rotation,
            });
        }
    }
    Ok(samples)
}
