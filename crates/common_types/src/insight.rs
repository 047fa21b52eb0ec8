use crate::Event;
use serde::{Deserialize, Serialize};

/// Per-photo output of the vision model. All fields default so that a
/// partially filled-in model response still deserializes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PhotoInsight {
    #[serde(default)]
    pub photo_id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub scene_tags: Vec<String>,
    #[serde(default)]
    pub people_present: bool,
    #[serde(default)]
    pub num_people: i32,
    #[serde(default)]
    pub vibe_words: Vec<String>,
    #[serde(default)]
    pub possible_event: Option<String>,
}

/// An event together with its insights and the rollups derived from them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventAggregate {
    pub event: Event,
    pub insights: Vec<PhotoInsight>,
    /// Formatted centroid, `None` when no member carried a GPS fix.
    pub location_text: Option<String>,
    pub objects: Vec<String>,
    pub scene_tags: Vec<String>,
    pub vibe_words: Vec<String>,
    pub has_people: bool,
}

/// Narrative output of the vision model for one event.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct EventStory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}
