pub mod clip_json;
pub mod hand_json;
