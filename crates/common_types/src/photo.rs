use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A GPS fix in WGS84 degrees. A photo either has a full fix or none at all,
/// so latitude and longitude travel together.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// One scanned photo, immutable after the scanner produces it.
///
/// `taken_at` is naive: EXIF capture times carry no zone, and the mtime
/// fallback is converted to local time before it lands here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PhotoRecord {
    /// Unique within one scan; basename of the file, suffixed on collisions.
    pub id: String,
    pub path: PathBuf,
    pub taken_at: Option<NaiveDateTime>,
    pub gps: Option<GpsPosition>,
}
