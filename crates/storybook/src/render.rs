use chrono::NaiveDateTime;
use color_eyre::Result;
use common_types::{EventAggregate, EventStory};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Writes one self-contained HTML page for an event and returns its path.
pub fn write_event_page(
    out_dir: &Path,
    aggregate: &EventAggregate,
    story: &EventStory,
    palette_hex: &[String],
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let html = event_page_html(aggregate, story, palette_hex)?;
    let out_path = out_dir.join(format!("event_{}.html", aggregate.event.event_id));
    std::fs::write(&out_path, html)?;
    Ok(out_path)
}

fn event_page_html(
    aggregate: &EventAggregate,
    story: &EventStory,
    palette_hex: &[String],
) -> Result<String> {
    let event = &aggregate.event;
    let title = if story.title.is_empty() {
        event.event_id.clone()
    } else {
        story.title.clone()
    };
    let date_range = date_range_text(event.start_time, event.end_time);

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{}</title>", escape_html(&title))?;
    writeln!(
        html,
        "<style>\
         body{{font-family:sans-serif;max-width:56rem;margin:2rem auto;padding:0 1rem;color:#222}}\
         .meta{{color:#666}}\
         .swatches{{display:flex;gap:.5rem;margin:1rem 0}}\
         .swatch{{width:3rem;height:3rem;border-radius:.5rem}}\
         .grid{{display:grid;grid-template-columns:repeat(auto-fill,minmax(14rem,1fr));gap:1rem}}\
         .grid img{{width:100%;border-radius:.5rem}}\
         figcaption{{font-size:.85rem;color:#444}}\
         </style></head><body>"
    )?;

    writeln!(html, "<h1>{}</h1>", escape_html(&title))?;
    writeln!(html, "<p class=\"meta\">{}", escape_html(&date_range))?;
    if let Some(location) = &aggregate.location_text {
        writeln!(html, " · {}", escape_html(location))?;
    }
    writeln!(html, "</p>")?;

    writeln!(html, "<div class=\"swatches\">")?;
    for hex in palette_hex {
        writeln!(
            html,
            "<div class=\"swatch\" style=\"background:{}\"></div>",
            escape_html(hex)
        )?;
    }
    writeln!(html, "</div>")?;

    for paragraph in story.story.split("\n\n").filter(|p| !p.trim().is_empty()) {
        writeln!(html, "<p>{}</p>", escape_html(paragraph.trim()))?;
    }

    if !story.highlights.is_empty() {
        writeln!(html, "<h2>Highlights</h2><ul>")?;
        for highlight in &story.highlights {
            writeln!(html, "<li>{}</li>", escape_html(highlight))?;
        }
        writeln!(html, "</ul>")?;
    }

    if !aggregate.vibe_words.is_empty() {
        writeln!(
            html,
            "<p class=\"meta\">{}</p>",
            escape_html(&aggregate.vibe_words.join(" · "))
        )?;
    }

    writeln!(html, "<div class=\"grid\">")?;
    for photo in &event.photos {
        let caption = aggregate
            .insights
            .iter()
            .find(|i| i.photo_id == photo.id)
            .map(|i| i.caption.as_str())
            .unwrap_or_default();
        writeln!(
            html,
            "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\"><figcaption>{}</figcaption></figure>",
            escape_html(&file_uri(&photo.path)),
            escape_html(&photo.id),
            escape_html(caption)
        )?;
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</body></html>")?;
    Ok(html)
}

pub fn date_range_text(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> String {
    let fmt = |d: NaiveDateTime| d.format("%Y-%m-%d").to_string();
    let s = start.map(fmt).unwrap_or_default();
    let e = end.map(fmt).unwrap_or_default();
    if !s.is_empty() && !e.is_empty() && s != e {
        format!("{s} — {e}")
    } else if s.is_empty() {
        e
    } else {
        s
    }
}

fn file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common_types::{Event, PhotoInsight};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b class="x">&'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;&amp;&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn date_range_spans_distinct_days() {
        assert_eq!(date_range_text(Some(day(1)), Some(day(3))), "2024-06-01 — 2024-06-03");
    }

    #[test]
    fn date_range_collapses_same_day() {
        assert_eq!(date_range_text(Some(day(1)), Some(day(1))), "2024-06-01");
    }

    #[test]
    fn date_range_handles_missing_bounds() {
        assert_eq!(date_range_text(None, None), "");
        assert_eq!(date_range_text(Some(day(2)), None), "2024-06-02");
        assert_eq!(date_range_text(None, Some(day(2))), "2024-06-02");
    }

    #[test]
    fn page_contains_escaped_captions_and_swatches() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let event = Event {
            event_id: "E0001".into(),
            photo_ids: vec!["a.jpg".into()],
            start_time: Some(day(1)),
            end_time: Some(day(2)),
            center: None,
            photos: vec![common_types::PhotoRecord {
                id: "a.jpg".into(),
                path: "/photos/a.jpg".into(),
                taken_at: Some(day(1)),
                gps: None,
            }],
        };
        let insights = vec![PhotoInsight {
            photo_id: "a.jpg".into(),
            caption: "cats & <dogs>".into(),
            ..PhotoInsight::default()
        }];
        let aggregate = crate::aggregate::build_event_aggregate(event, insights);
        let story = EventStory {
            title: "A weekend".into(),
            story: "First day.\n\nSecond day.".into(),
            highlights: vec!["the harbour".into()],
        };
        let palette = vec!["#112233".to_string()];

        let path = write_event_page(dir.path(), &aggregate, &story, &palette)?;
        let html = std::fs::read_to_string(path)?;
        assert!(html.contains("cats &amp; &lt;dogs&gt;"));
        assert!(html.contains("background:#112233"));
        assert!(html.contains("<h1>A weekend</h1>"));
        assert!(html.contains("2024-06-01 — 2024-06-02"));
        Ok(())
    }
}
