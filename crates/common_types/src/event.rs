use crate::{GpsPosition, PhotoRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A maximal run of temporally and spatially contiguous photos, finalized by
/// the segmentation engine. Never mutated after construction.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Event {
    /// `E0001`-style id, 1-indexed over emitted events within one segmentation call.
    pub event_id: String,
    /// Member photo ids in input order.
    pub photo_ids: Vec<String>,
    /// Earliest capture time among members with one, `None` if no member has one.
    pub start_time: Option<NaiveDateTime>,
    /// Latest capture time among members with one.
    pub end_time: Option<NaiveDateTime>,
    /// Unweighted mean position over members with a GPS fix.
    pub center: Option<GpsPosition>,
    /// The member records themselves, in input order.
    pub photos: Vec<PhotoRecord>,
}

impl Event {
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
