#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod exif_capture;
mod scan;

pub use exif_capture::{ExifCapture, read_exif_capture};
pub use scan::scan_photos;
