pub mod applicator;
pub mod correspondence;

pub use applicator::{align_object, AlignmentHost, AlignmentRequest, PoseProvider, VecPoseProvider};
pub use correspondence::{solve_offset, Correspondence};
