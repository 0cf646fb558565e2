pub mod segment;

pub use segment::{Segment, SegmentHandle};
