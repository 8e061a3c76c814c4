pub mod preprocess;
pub mod solve;

pub use preprocess::{preprocess_recording, PreprocessedHand};
pub use solve::solve_hand;
