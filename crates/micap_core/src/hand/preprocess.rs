//! Normalizes a raw hand recording before solving: rescales every frame so
//! the palm (wrist to middle knuckle) matches the configured palm size, and
//! estimates per-joint bone lengths as averages over the whole recording.

use crate::codec::hand_json::{HandFrame, HandRecording};
use crate::common::hand_joint::HandJoint;
use crate::common::types::HandType;
use crate::{Error, Result};
use enum_map::{enum_map, EnumMap};
use log::debug;
use strum::IntoEnumIterator;

/// A recording scaled to the target palm size, with average distances from
/// each joint to its predecessor. Constant bone lengths keep the solved
/// hand from breathing when the capture jitters.
#[derive(Clone, Debug)]
pub struct PreprocessedHand {
    pub name: String,
    pub hand_type: HandType,
    pub frames: Vec<HandFrame>,
    pub average_joint_distance: EnumMap<HandJoint, f32>,
}

fn scale_frame(frame: &HandFrame, index: usize, palm_size: f32) -> Result<HandFrame> {
    let palm = (frame.position(HandJoint::Middle1) - frame.position(HandJoint::Wrist)).norm();
    if palm <= f32::EPSILON {
        return Err(Error::DataFormat(format!(
            "frame {index}: wrist and middle knuckle coincide, cannot derive palm scale"
        )));
    }
    Ok(HandFrame {
        timestamp: frame.timestamp,
        world_positions: &frame.world_positions * (palm_size / palm),
    })
}

fn average_joint_distances(frames: &[HandFrame]) -> EnumMap<HandJoint, f32> {
    let mut sums: EnumMap<HandJoint, f32> = enum_map! { _ => 0.0 };
    for frame in frames {
        for joint in HandJoint::iter() {
            let Some(predecessor) = joint.predecessor() else {
                continue;
            };
            sums[joint] += (frame.position(joint) - frame.position(predecessor)).norm();
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let count = frames.len() as f32;
    for (_, sum) in sums.iter_mut() {
        *sum /= count;
    }
    sums
}

/// Scales all frames to `palm_size` and computes average joint distances.
pub fn preprocess_recording(recording: &HandRecording, palm_size: f32) -> Result<PreprocessedHand> {
    if !(palm_size > 0.0) {
        return Err(Error::Configuration(format!(
            "palm size must be a positive length (got {palm_size})"
        )));
    }
    if recording.frames.is_empty() {
        return Err(Error::DataFormat(format!("hand '{}' contains no frames", recording.name)));
    }

    let frames = recording
        .frames
        .iter()
        .enumerate()
        .map(|(index, frame)| scale_frame(frame, index, palm_size))
        .collect::<Result<Vec<_>>>()?;
    let average_joint_distance = average_joint_distances(&frames);
    debug!(
        "preprocessed hand '{}': {} frames at palm size {palm_size}",
        recording.name,
        frames.len()
    );

    Ok(PreprocessedHand {
        name: recording.name.clone(),
        hand_type: recording.hand_type,
        frames,
        average_joint_distance,
    })
}
