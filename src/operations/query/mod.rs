mod is_valid;
mod length;
mod measurement;

pub use is_valid::IsValid;
pub use length::{LinesLength, TraceLength};
pub use measurement::Measurement;
