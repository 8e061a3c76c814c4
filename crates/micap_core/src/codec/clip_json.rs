//! Codec for the generic capture-clip document:
//! `{ "frames": [ { "joints": { "<name>": { "translation": [x, y, z],
//! "rotation": [...] } } } ] }`.
//!
//! `rotation` is either 4 components (w, x, y, z quaternion) or 3 components
//! (XYZ Euler angles in radians). `time` per frame is optional; absent times
//! default to the frame index.

use crate::retarget::clip::{CaptureClip, JointSample, PoseFrame};
use crate::{Error, Result};
use micap_utils::{numerical::euler_to_quaternion, vector::vec_from_fixed};
use nalgebra as na;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct ClipDoc {
    frames: Vec<FrameDoc>,
}

#[derive(Deserialize)]
struct FrameDoc {
    #[serde(default)]
    time: Option<f32>,
    joints: BTreeMap<String, JointDoc>,
}

#[derive(Deserialize)]
struct JointDoc {
    translation: [f32; 3],
    rotation: Vec<f32>,
}

fn rotation_from_components(joint: &str, rotation: &[f32]) -> Result<na::UnitQuaternion<f32>> {
    match rotation {
        [w, x, y, z] => Ok(na::UnitQuaternion::new_normalize(na::Quaternion::new(*w, *x, *y, *z))),
        [x, y, z] => Ok(euler_to_quaternion(*x, *y, *z)),
        other => Err(Error::DataFormat(format!(
            "joint '{joint}': rotation must have 4 (quaternion) or 3 (euler) components, got {}",
            other.len()
        ))),
    }
}

/// Parses a capture-clip JSON document.
pub fn clip_from_str(json: &str) -> Result<CaptureClip> {
    let doc: ClipDoc = serde_json::from_str(json)?;
    let mut frames = Vec::with_capacity(doc.frames.len());
    for (index, frame) in doc.frames.into_iter().enumerate() {
        let mut joints = BTreeMap::new();
        for (name, joint) in frame.joints {
            let rotation = rotation_from_components(&name, &joint.rotation)?;
            joints.insert(name, JointSample::new(vec_from_fixed(&joint.translation), rotation));
        }
        #[allow(clippy::cast_precision_loss)]
        frames.push(PoseFrame {
            time: frame.time.unwrap_or(index as f32),
            joints,
        });
    }
    CaptureClip::new(frames)
}
