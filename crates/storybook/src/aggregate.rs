use common_types::{Event, EventAggregate, PhotoInsight};
use std::collections::HashSet;

/// Rolls one event's insights up into the fields the story prompt and the
/// rendered page share.
pub fn build_event_aggregate(event: Event, insights: Vec<PhotoInsight>) -> EventAggregate {
    let objects = unique_keep_order(insights.iter().flat_map(|i| i.objects.iter()));
    let scene_tags = unique_keep_order(insights.iter().flat_map(|i| i.scene_tags.iter()));
    let vibe_words = unique_keep_order(insights.iter().flat_map(|i| i.vibe_words.iter()));
    let has_people = insights.iter().any(|i| i.people_present);

    let location_text = event
        .center
        .map(|c| format!("{:.4}, {:.4}", c.latitude, c.longitude));

    EventAggregate {
        event,
        insights,
        location_text,
        objects,
        scene_tags,
        vibe_words,
        has_people,
    }
}

fn unique_keep_order<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.as_str()) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_types::GpsPosition;

    fn empty_event(center: Option<GpsPosition>) -> Event {
        Event {
            event_id: "E0001".into(),
            photo_ids: vec![],
            start_time: None,
            end_time: None,
            center,
            photos: vec![],
        }
    }

    fn insight(objects: &[&str], people: bool) -> PhotoInsight {
        PhotoInsight {
            objects: objects.iter().map(ToString::to_string).collect(),
            people_present: people,
            ..PhotoInsight::default()
        }
    }

    #[test]
    fn rollup_deduplicates_preserving_first_occurrence_order() {
        let aggregate = build_event_aggregate(
            empty_event(None),
            vec![
                insight(&["dog", "beach"], false),
                insight(&["beach", "ball", "dog"], false),
            ],
        );
        assert_eq!(aggregate.objects, vec!["dog", "beach", "ball"]);
    }

    #[test]
    fn has_people_is_any_over_insights() {
        let aggregate = build_event_aggregate(
            empty_event(None),
            vec![insight(&[], false), insight(&[], true)],
        );
        assert!(aggregate.has_people);
    }

    #[test]
    fn location_text_formats_centroid_to_four_decimals() {
        let center = GpsPosition {
            latitude: 52.370216,
            longitude: 4.895168,
        };
        let aggregate = build_event_aggregate(empty_event(Some(center)), vec![]);
        assert_eq!(aggregate.location_text.as_deref(), Some("52.3702, 4.8952"));
    }

    #[test]
    fn location_text_is_none_without_centroid() {
        let aggregate = build_event_aggregate(empty_event(None), vec![]);
        assert_eq!(aggregate.location_text, None);
    }
}
