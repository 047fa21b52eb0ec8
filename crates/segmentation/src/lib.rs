#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod distance;
mod options;
mod segment;

pub use distance::haversine_km;
pub use options::{OptionsError, SegmentOptions};
pub use segment::segment_events;
