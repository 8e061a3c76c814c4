use crate::common::hand_joint::HandJoint;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Mapping from captured joint names to target-skeleton bone names, built
/// from the user's bone selection. Joints without an entry are simply not
/// imported; the binding does not have to cover the whole clip.
#[derive(Clone, Debug, Default)]
pub struct BoneBinding {
    bindings: BTreeMap<String, String>,
}

impl BoneBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: impl Into<String>, bone: impl Into<String>) {
        self.bindings.insert(joint.into(), bone.into());
    }

    /// Binding for a generated hand armature whose bones are named
    /// `"<hand>_<joint>"`, restricted to the bones actually selected.
    pub fn for_hand<S: AsRef<str>>(hand_name: &str, selected_bones: &[S]) -> Self {
        let mut binding = Self::new();
        for joint in HandJoint::iter() {
            let bone = format!("{hand_name}_{joint}");
            if selected_bones.iter().any(|b| b.as_ref() == bone) {
                binding.insert(joint.to_string(), bone);
            }
        }
        binding
    }

    pub fn bone_for(&self, joint: &str) -> Option<&str> {
        self.bindings.get(joint).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(j, b)| (j.as_str(), b.as_str()))
    }
}
