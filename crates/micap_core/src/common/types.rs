use strum_macros::Display;

/// Which hand a capture recording belongs to. Chirality flips the palm
/// direction when deriving the wrist frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum HandType {
    Left,
    Right,
}

impl HandType {
    /// Case-insensitive parse of the `handType` field of a recording.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}
