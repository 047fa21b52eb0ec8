#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod client;
mod coerce;
mod inference;

pub use client::{VisionClient, VisionError, VisionResult};
pub use inference::{StoryContext, infer_event_story, infer_photo_insight};
