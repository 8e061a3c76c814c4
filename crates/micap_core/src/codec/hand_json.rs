//! Codec for the hand-capture recording tool's JSON output: a list of hands,
//! each with a name, a hand type and per-frame world positions for the 21
//! hand joints (camelCase field names).

use crate::common::hand_joint::HandJoint;
use crate::common::types::HandType;
use crate::{Error, Result};
use micap_utils::vector::{point_from_array_f, Point3f};
use ndarray as nd;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandDoc {
    name: String,
    hand_type: String,
    animation_data: Vec<FrameDoc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameDoc {
    timestamp: f32,
    world_positions: Vec<PositionDoc>,
    // Present in recordings but not consumed by the core.
    #[serde(default)]
    #[allow(dead_code)]
    normalized_positions: Option<Vec<PositionDoc>>,
}

#[derive(Deserialize)]
struct PositionDoc {
    x: f32,
    y: f32,
    z: f32,
}

/// One recorded frame: world positions of all 21 joints, row-indexed by
/// [`HandJoint`].
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub timestamp: f32,
    pub world_positions: nd::Array2<f32>,
}

impl HandFrame {
    pub fn position(&self, joint: HandJoint) -> Point3f {
        point_from_array_f(&self.world_positions, joint.index())
    }
}

/// A complete recording of one hand.
#[derive(Clone, Debug)]
pub struct HandRecording {
    pub name: String,
    pub hand_type: HandType,
    pub frames: Vec<HandFrame>,
}

fn convert_hand(doc: HandDoc) -> Result<HandRecording> {
    let hand_type = HandType::from_tag(&doc.hand_type).ok_or_else(|| {
        Error::DataFormat(format!("hand '{}': unrecognized hand type '{}'", doc.name, doc.hand_type))
    })?;
    let mut frames = Vec::with_capacity(doc.animation_data.len());
    for (index, frame) in doc.animation_data.into_iter().enumerate() {
        if frame.world_positions.len() != HandJoint::COUNT {
            return Err(Error::DataFormat(format!(
                "hand '{}', frame {index}: has {} world positions, expected {}",
                doc.name,
                frame.world_positions.len(),
                HandJoint::COUNT
            )));
        }
        let mut world_positions = nd::Array2::<f32>::zeros((HandJoint::COUNT, 3));
        for (row, position) in frame.world_positions.iter().enumerate() {
            world_positions[[row, 0]] = position.x;
            world_positions[[row, 1]] = position.y;
            world_positions[[row, 2]] = position.z;
        }
        frames.push(HandFrame {
            timestamp: frame.timestamp,
            world_positions,
        });
    }
    Ok(HandRecording {
        name: doc.name,
        hand_type,
        frames,
    })
}

/// Parses a recording document (a JSON list of hands).
pub fn hands_from_str(json: &str) -> Result<Vec<HandRecording>> {
    let docs: Vec<HandDoc> = serde_json::from_str(json)?;
    docs.into_iter().map(convert_hand).collect()
}

/// Reads and parses a recording file.
pub fn hands_from_path(path: impl AsRef<Path>) -> Result<Vec<HandRecording>> {
    let json = std::fs::read_to_string(path)?;
    hands_from_str(&json)
}
