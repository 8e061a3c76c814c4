pub mod hand_joint;
pub mod marker;
pub mod transform;
pub mod types;
