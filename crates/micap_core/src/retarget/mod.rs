pub mod baker;
pub mod binding;
pub mod clip;
pub mod retargeter;

pub use baker::{bake_keyframes, ChannelBank, KeyframeSink};
pub use binding::BoneBinding;
pub use clip::{CaptureClip, JointSample, PoseFrame};
pub use retargeter::{retarget_clip, BoneSample};

use crate::Result;
use log::info;
use nalgebra as na;

/// Full import operation: retarget the clip and bake the resulting samples.
/// Validation happens entirely inside [`retarget_clip`], so a failed import
/// never writes a keyframe. Returns the number of keyframes written.
pub fn import_clip<S: KeyframeSink>(
    clip: &CaptureClip,
    binding: &BoneBinding,
    palm_size: f32,
    armature_scale: &na::Vector3<f32>,
    sink: &mut S,
) -> Result<usize> {
    let samples = retarget_clip(clip, binding, palm_size, armature_scale)?;
    bake_keyframes(&samples, sink);
    info!(
        "imported capture clip: {} keyframes across {} frames",
        samples.len(),
        clip.frames().len()
    );
    Ok(samples.len())
}
