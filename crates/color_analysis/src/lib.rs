#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod kmeans;
mod palette_extraction;
mod sampling;

pub use palette_extraction::{dominant_palette, rgb_to_hex};
