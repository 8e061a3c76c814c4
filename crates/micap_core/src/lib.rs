//! Geometric core behind the musical-instrument capture pipeline.
//!
//! Two externally captured motion sources come together in a 3D scene:
//! per-frame rigid-body poses of tracked props (violin, bow) derived from
//! optical marker clusters, and per-frame hand-joint recordings from a
//! separate capture tool. This crate holds the pure math for both:
//!
//! - [`align`] solves a static local offset from a single point
//!   correspondence and attaches it through a host collaborator so the prop
//!   follows its tracked rigid body on every frame.
//! - [`hand`] turns raw world-space joint positions into per-joint local
//!   transforms, and [`retarget`] maps those onto a target skeleton's bones
//!   and bakes them as keyframes.
//!
//! Scene access (object lookup, constraint storage, keyframe tracks) stays
//! behind traits; the crate never talks to a host environment directly.

pub mod align;
pub mod codec;
pub mod common;
pub mod hand;
pub mod retarget;

/// Result type alias for the capture core.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for alignment and import operations.
///
/// Every operation checks its preconditions before touching any scene state,
/// so a returned error means nothing was committed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A precondition on the user's setup is violated (non-unit scale,
    /// non-positive palm size, missing selection).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The supplied point correspondence is degenerate (missing marker,
    /// marker dropped out at the reference frame, no pose sample).
    #[error("Correspondence error: {0}")]
    Correspondence(String),

    /// No joint in the capture clip matches any selected bone.
    #[error("Binding error: {0}")]
    Binding(String),

    /// The capture source does not have the expected shape.
    #[error("Invalid capture data: {0}")]
    DataFormat(String),

    /// JSON syntax error from the parsing collaborator, passed through.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading a capture file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
