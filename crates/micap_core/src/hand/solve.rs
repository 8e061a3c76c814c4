//! Converts world-space joint positions into per-joint local transforms.
//!
//! Each joint gets an orthonormal frame derived from the capture geometry:
//! the wrist frame from the wrist/index/middle/ring positions (chirality
//! flips the palm direction), knuckles from their finger direction against
//! the wrist's up axis, mid and distal joints from their finger plane, tips
//! translation-only. Local rotations are the joint frame expressed in its
//! parent's frame, matching how the generated bones are parented.
//!
//! Frame matrices here map world-space vectors into the joint's local
//! coordinates (rows are the world-space axes).

use crate::codec::hand_json::HandFrame;
use crate::common::hand_joint::{HandJoint, KNUCKLE_JOINTS, MID_AND_DISTAL_JOINTS, TIP_JOINTS};
use crate::common::types::HandType;
use crate::hand::preprocess::PreprocessedHand;
use crate::retarget::clip::{CaptureClip, JointSample, PoseFrame};
use crate::Result;
use enum_map::{enum_map, EnumMap};
use micap_utils::numerical::{basis_from_rows, matrix_to_quaternion};
use micap_utils::vector::Point3f;
use nalgebra as na;
use std::collections::BTreeMap;

fn wrist_frame(wrist: Point3f, index: Point3f, middle: Point3f, ring: Point3f, hand_type: HandType) -> na::Matrix3<f32> {
    let to_index = index - wrist;
    let to_middle = middle - wrist;
    let to_ring = ring - wrist;

    // y points from the wrist to the middle knuckle.
    let y_axis = to_middle.normalize();
    let palm_dir = match hand_type {
        HandType::Left => to_index.cross(&to_ring).normalize(),
        HandType::Right => to_ring.cross(&to_index).normalize(),
    };
    let z_axis = y_axis.cross(&palm_dir).normalize();
    // x is -palm direction adjusted to be perpendicular to y and z.
    let x_axis = y_axis.cross(&z_axis).normalize();

    basis_from_rows(&x_axis, &y_axis, &z_axis)
}

fn solve_knuckle(
    joint_loc: Point3f,
    wrist_loc: Point3f,
    wrist_mat: &na::Matrix3<f32>,
    succ_loc: Point3f,
    joint_dist: f32,
) -> (na::Vector3<f32>, na::UnitQuaternion<f32>, na::Matrix3<f32>) {
    let to_joint = (joint_loc - wrist_loc).normalize() * joint_dist;
    let local_loc = wrist_mat * to_joint;

    // World-space x axis of the wrist serves as the up direction.
    let up_dir: na::Vector3<f32> = wrist_mat.row(0).transpose();
    let y_axis = (succ_loc - joint_loc).normalize();
    let x_axis = y_axis.cross(&up_dir).normalize();
    let z_axis = x_axis.cross(&y_axis).normalize();
    let joint_mat = basis_from_rows(&x_axis, &y_axis, &z_axis);

    let local_rot = matrix_to_quaternion(&(wrist_mat * joint_mat.transpose()));
    (local_loc, local_rot, joint_mat)
}

fn solve_mid_distal(
    joint_loc: Point3f,
    pred_loc: Point3f,
    pred_mat: &na::Matrix3<f32>,
    succ_loc: Point3f,
    joint_dist: f32,
) -> (na::Vector3<f32>, na::UnitQuaternion<f32>, na::Matrix3<f32>) {
    // The finger plane is spanned by the bone and its successor; locations
    // before bone-length normalization define it so angles are preserved.
    let to_joint = joint_loc - pred_loc;
    let to_successor = succ_loc - joint_loc;
    let plane_normal = to_successor.cross(&to_joint).normalize();

    let local_loc = pred_mat * (to_joint.normalize() * joint_dist);

    let x_axis = plane_normal;
    let y_axis = to_successor.normalize();
    let z_axis = x_axis.cross(&y_axis).normalize();
    let joint_mat = basis_from_rows(&x_axis, &y_axis, &z_axis);

    let local_rot = matrix_to_quaternion(&(pred_mat * joint_mat.transpose()));
    (local_loc, local_rot, joint_mat)
}

fn solve_tip(joint_loc: Point3f, pred_loc: Point3f, pred_mat: &na::Matrix3<f32>, joint_dist: f32) -> na::Vector3<f32> {
    pred_mat * ((joint_loc - pred_loc).normalize() * joint_dist)
}

fn solve_frame(
    frame: &HandFrame,
    hand_type: HandType,
    joint_dists: &EnumMap<HandJoint, f32>,
) -> BTreeMap<String, JointSample> {
    let mut frame_mats: EnumMap<HandJoint, na::Matrix3<f32>> = enum_map! { _ => na::Matrix3::identity() };
    frame_mats[HandJoint::Wrist] = wrist_frame(
        frame.position(HandJoint::Wrist),
        frame.position(HandJoint::Index1),
        frame.position(HandJoint::Middle1),
        frame.position(HandJoint::Ring1),
        hand_type,
    );

    // The wrist itself is driven by the armature, so it emits no sample.
    let mut joints = BTreeMap::new();

    for joint in KNUCKLE_JOINTS {
        let successor = joint.successor().unwrap();
        let (loc, rot, mat) = solve_knuckle(
            frame.position(joint),
            frame.position(HandJoint::Wrist),
            &frame_mats[HandJoint::Wrist],
            frame.position(successor),
            joint_dists[joint],
        );
        frame_mats[joint] = mat;
        joints.insert(joint.to_string(), JointSample::new(loc, rot));
    }

    for joint in MID_AND_DISTAL_JOINTS {
        let predecessor = joint.predecessor().unwrap();
        let successor = joint.successor().unwrap();
        let (loc, rot, mat) = solve_mid_distal(
            frame.position(joint),
            frame.position(predecessor),
            &frame_mats[predecessor],
            frame.position(successor),
            joint_dists[joint],
        );
        frame_mats[joint] = mat;
        joints.insert(joint.to_string(), JointSample::new(loc, rot));
    }

    for joint in TIP_JOINTS {
        let predecessor = joint.predecessor().unwrap();
        let loc = solve_tip(
            frame.position(joint),
            frame.position(predecessor),
            &frame_mats[predecessor],
            joint_dists[joint],
        );
        joints.insert(joint.to_string(), JointSample::new(loc, na::UnitQuaternion::identity()));
    }

    joints
}

/// Solves every frame of a preprocessed hand into a capture clip keyed by
/// joint display names, ready for retargeting.
pub fn solve_hand(hand: &PreprocessedHand) -> Result<CaptureClip> {
    let frames = hand
        .frames
        .iter()
        .map(|frame| PoseFrame {
            time: frame.timestamp,
            joints: solve_frame(frame, hand.hand_type, &hand.average_joint_distance),
        })
        .collect();
    CaptureClip::new(frames)
}
