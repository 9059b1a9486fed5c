pub mod keypoint;
pub mod source;

pub use keypoint::{Frame, Landmark, Point};
pub use source::{parse_sequence, read_sequence};
