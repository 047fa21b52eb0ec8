#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod event;
mod insight;
mod photo;

pub use event::*;
pub use insight::*;
pub use photo::*;
