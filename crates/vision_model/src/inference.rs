use crate::client::{VisionClient, VisionResult};
use crate::coerce::extract_json;
use bon::builder;
use common_types::{EventStory, PhotoInsight};
use std::path::Path;
use tracing::warn;

const PHOTO_INSIGHT_SYSTEM: &str = "You are a vision-language assistant. Given one image, produce a STRICT JSON object with keys: \
photo_id, caption, objects, scene_tags, people_present, num_people, vibe_words, possible_event. \
Return ONLY JSON. No comments, no markdown. Keep caption to 1-2 sentences.";

const EVENT_STORY_SYSTEM: &str = "You are a narrative assistant. Given a set of photo summaries and event metadata, return a STRICT JSON object \
with keys: title (string), story (300-500 words), highlights (3-5 bullet strings). Return ONLY JSON.";

/// One photo through the vision model, coerced into a `PhotoInsight`.
/// Missing keys fall back to defaults; the photo id is always filled in.
pub async fn infer_photo_insight(
    client: &VisionClient,
    image: &Path,
    photo_id: &str,
) -> VisionResult<PhotoInsight> {
    let prompt = format!(
        "Analyze this photo. Identify salient objects and scene tags. \
         Infer whether people are present and how many. Provide 3-6 vibe words \
         and an optional possible event. Use the exact JSON schema specified. \
         The photo_id is {photo_id}."
    );
    let text = client
        .chat(&prompt)
        .system(PHOTO_INSIGHT_SYSTEM)
        .images(&[image])
        .call()
        .await?;

    let value = extract_json(&text)?;
    let mut insight: PhotoInsight = serde_json::from_value(value)?;
    if insight.photo_id.is_empty() {
        insight.photo_id = photo_id.to_string();
    }
    Ok(insight)
}

/// Everything the story prompt needs about one event.
#[derive(Debug, Clone)]
pub struct StoryContext<'a> {
    pub date_range: &'a str,
    pub location_text: &'a str,
    pub objects: &'a [String],
    pub scene_tags: &'a [String],
    pub vibe_words: &'a [String],
    pub insights: &'a [PhotoInsight],
}

/// One event's metadata and photo summaries through the model, coerced into
/// an `EventStory`. A non-JSON response degrades to a title-less story
/// carrying the raw text rather than an error.
/// Keeps the items payload from blowing up the context window.
const MAX_ITEMS_JSON_CHARS: usize = 12_000;

fn clip_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[builder]
pub async fn infer_event_story(
    #[builder(start_fn)] client: &VisionClient,
    #[builder(start_fn)] context: &StoryContext<'_>,
    max_items: Option<usize>,
    temperature: Option<f32>,
) -> VisionResult<EventStory> {
    let items = &context.insights[..context.insights.len().min(max_items.unwrap_or(40))];
    let items_json = clip_chars(serde_json::to_string(items)?, MAX_ITEMS_JSON_CHARS);
    let prompt = format!(
        "Write a cohesive, reflective event story. Avoid repetition. Use a friendly tone.\n\n\
         Date range: {}. Location: {}.\n\n\
         Unique objects: {}.\n\
         Scene tags: {}.\n\
         Vibe words: {}.\n\n\
         Here are up to {} photo JSON items: {}.",
        context.date_range,
        context.location_text,
        context.objects.join(", "),
        context.scene_tags.join(", "),
        context.vibe_words.join(", "),
        items.len(),
        items_json,
    );
    let text = client
        .chat(&prompt)
        .system(EVENT_STORY_SYSTEM)
        .maybe_temperature(temperature)
        .call()
        .await?;

    match extract_json(&text).and_then(serde_json::from_value::<EventStory>) {
        Ok(story) => Ok(story),
        Err(e) => {
            warn!("story response was not valid JSON, keeping raw text: {e}");
            Ok(EventStory {
                title: String::new(),
                story: text,
                highlights: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_deserializes_with_missing_keys() {
        let value = extract_json(r#"{"caption": "a beach", "objects": ["sand"]}"#)
            .expect("valid JSON");
        let insight: PhotoInsight = serde_json::from_value(value).expect("lenient decode");
        assert_eq!(insight.caption, "a beach");
        assert_eq!(insight.objects, vec!["sand"]);
        assert!(insight.photo_id.is_empty());
        assert!(!insight.people_present);
    }

    #[test]
    fn clip_chars_truncates_on_char_boundaries() {
        assert_eq!(clip_chars("short".into(), 12), "short");
        assert_eq!(clip_chars("abcdef".into(), 3), "abc");
        // Multi-byte chars count as one and never get split.
        assert_eq!(clip_chars("ééééé".into(), 2), "éé");
    }

    #[test]
    fn story_deserializes_from_full_payload() {
        let value = extract_json(
            r#"{"title": "Harbour walk", "story": "We walked.", "highlights": ["the light"]}"#,
        )
        .expect("valid JSON");
        let story: EventStory = serde_json::from_value(value).expect("decode");
        assert_eq!(story.title, "Harbour walk");
        assert_eq!(story.highlights.len(), 1);
    }
}
