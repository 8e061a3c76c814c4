use enum_map::Enum;
use strum_macros::{Display, EnumIter};

/// The joints reported by the hand-capture tool, in recording order.
/// This order indexes the per-frame position tables.
#[derive(Clone, Copy, Debug, Enum, EnumIter, PartialEq, Eq, Hash, Display)]
pub enum HandJoint {
    #[strum(serialize = "Wrist")]
    Wrist,
    #[strum(serialize = "Thumb 1")]
    Thumb1,
    #[strum(serialize = "Thumb 2")]
    Thumb2,
    #[strum(serialize = "Thumb 3")]
    Thumb3,
    #[strum(serialize = "Thumb Tip")]
    ThumbTip,
    #[strum(serialize = "Index 1")]
    Index1,
    #[strum(serialize = "Index 2")]
    Index2,
    #[strum(serialize = "Index 3")]
    Index3,
    #[strum(serialize = "Index Tip")]
    IndexTip,
    #[strum(serialize = "Middle 1")]
    Middle1,
    #[strum(serialize = "Middle 2")]
    Middle2,
    #[strum(serialize = "Middle 3")]
    Middle3,
    #[strum(serialize = "Middle Tip")]
    MiddleTip,
    #[strum(serialize = "Ring 1")]
    Ring1,
    #[strum(serialize = "Ring 2")]
    Ring2,
    #[strum(serialize = "Ring 3")]
    Ring3,
    #[strum(serialize = "Ring Tip")]
    RingTip,
    #[strum(serialize = "Pinky 1")]
    Pinky1,
    #[strum(serialize = "Pinky 2")]
    Pinky2,
    #[strum(serialize = "Pinky 3")]
    Pinky3,
    #[strum(serialize = "Pinky Tip")]
    PinkyTip,
}

/// Knuckle joints, parented directly to the wrist.
pub const KNUCKLE_JOINTS: [HandJoint; 5] = [
    HandJoint::Thumb1,
    HandJoint::Index1,
    HandJoint::Middle1,
    HandJoint::Ring1,
    HandJoint::Pinky1,
];

/// Mid and distal joints, parented to the previous joint of their finger.
/// Ordered so a joint always appears after its predecessor.
pub const MID_AND_DISTAL_JOINTS: [HandJoint; 10] = [
    HandJoint::Thumb2,
    HandJoint::Thumb3,
    HandJoint::Index2,
    HandJoint::Index3,
    HandJoint::Middle2,
    HandJoint::Middle3,
    HandJoint::Ring2,
    HandJoint::Ring3,
    HandJoint::Pinky2,
    HandJoint::Pinky3,
];

/// Fingertips, translation-only.
pub const TIP_JOINTS: [HandJoint; 5] = [
    HandJoint::ThumbTip,
    HandJoint::IndexTip,
    HandJoint::MiddleTip,
    HandJoint::RingTip,
    HandJoint::PinkyTip,
];

impl HandJoint {
    /// Number of joints in a recording frame.
    pub const COUNT: usize = <HandJoint as Enum>::LENGTH;

    /// The joint this one is parented to, `None` for the wrist.
    pub fn predecessor(self) -> Option<HandJoint> {
        use HandJoint::*;
        match self {
            Wrist => None,
            Thumb1 | Index1 | Middle1 | Ring1 | Pinky1 => Some(Wrist),
            Thumb2 => Some(Thumb1),
            Thumb3 => Some(Thumb2),
            ThumbTip => Some(Thumb3),
            Index2 => Some(Index1),
            Index3 => Some(Index2),
            IndexTip => Some(Index3),
            Middle2 => Some(Middle1),
            Middle3 => Some(Middle2),
            MiddleTip => Some(Middle3),
            Ring2 => Some(Ring1),
            Ring3 => Some(Ring2),
            RingTip => Some(Ring3),
            Pinky2 => Some(Pinky1),
            Pinky3 => Some(Pinky2),
            PinkyTip => Some(Pinky3),
        }
    }

    /// The next joint down the finger chain. `None` for the wrist (which has
    /// five children) and for the tips.
    pub fn successor(self) -> Option<HandJoint> {
        use HandJoint::*;
        match self {
            Thumb1 => Some(Thumb2),
            Thumb2 => Some(Thumb3),
            Thumb3 => Some(ThumbTip),
            Index1 => Some(Index2),
            Index2 => Some(Index3),
            Index3 => Some(IndexTip),
            Middle1 => Some(Middle2),
            Middle2 => Some(Middle3),
            Middle3 => Some(MiddleTip),
            Ring1 => Some(Ring2),
            Ring2 => Some(Ring3),
            Ring3 => Some(RingTip),
            Pinky1 => Some(Pinky2),
            Pinky2 => Some(Pinky3),
            Pinky3 => Some(PinkyTip),
            Wrist | ThumbTip | IndexTip | MiddleTip | RingTip | PinkyTip => None,
        }
    }

    pub fn is_tip(self) -> bool {
        TIP_JOINTS.contains(&self)
    }

    /// Row index of this joint in a recording frame's position table.
    pub fn index(self) -> usize {
        self.into_usize()
    }
}
