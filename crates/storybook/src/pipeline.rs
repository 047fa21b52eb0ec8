use crate::aggregate::build_event_aggregate;
use crate::cache::InsightCache;
use crate::render::{date_range_text, write_event_page};
use color_eyre::Result;
use common_types::{Event, PhotoInsight};
use scanner::scan_photos;
use segmentation::{SegmentOptions, segment_events};
use std::path::PathBuf;
use tracing::{info, warn};
use vision_model::{StoryContext, VisionClient, infer_event_story, infer_photo_insight};

pub struct PipelineConfig {
    pub photo_dir: PathBuf,
    pub out_dir: PathBuf,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_photos_per_event: usize,
    pub recompute: bool,
    pub options: SegmentOptions,
}

pub async fn run(config: &PipelineConfig) -> Result<()> {
    let photos = scan_photos(&config.photo_dir)?;
    if photos.is_empty() {
        warn!("no photos found under {}", config.photo_dir.display());
        return Ok(());
    }

    let events = segment_events(&photos, &config.options);
    if events.is_empty() {
        warn!("no events found with current thresholds");
        return Ok(());
    }
    info!("segmented {} photos into {} events", photos.len(), events.len());

    let client = VisionClient::with_base_url(&config.base_url)
        .model(config.model.clone())
        .temperature(config.temperature)
        .build();
    let cache = InsightCache::open(&config.out_dir)?;

    for event in events {
        process_event(config, &client, &cache, event).await?;
    }
    Ok(())
}

async fn process_event(
    config: &PipelineConfig,
    client: &VisionClient,
    cache: &InsightCache,
    event: Event,
) -> Result<()> {
    info!("processing event {} with {} photos", event.event_id, event.len());
    let selected = &event.photos[..event.len().min(config.max_photos_per_event)];

    let mut insights: Vec<PhotoInsight> = Vec::with_capacity(selected.len());
    for photo in selected {
        if !config.recompute {
            if let Some(cached) = cache.load(&photo.id) {
                insights.push(cached);
                continue;
            }
        }
        match infer_photo_insight(client, &photo.path, &photo.id).await {
            Ok(insight) => {
                if let Err(e) = cache.store(&insight) {
                    warn!("could not cache insight for {}: {e}", photo.id);
                }
                insights.push(insight);
            }
            Err(e) => warn!("insight failed for {}: {e}", photo.path.display()),
        }
    }

    let selected_paths: Vec<PathBuf> = selected.iter().map(|p| p.path.clone()).collect();
    let aggregate = build_event_aggregate(event, insights);

    let date_range = date_range_text(aggregate.event.start_time, aggregate.event.end_time);
    let context = StoryContext {
        date_range: &date_range,
        location_text: aggregate.location_text.as_deref().unwrap_or_default(),
        objects: &aggregate.objects,
        scene_tags: &aggregate.scene_tags,
        vibe_words: &aggregate.vibe_words,
        insights: &aggregate.insights,
    };
    // Stories get a slightly warmer temperature than per-photo insights.
    let story_temperature = (config.temperature + 0.05).clamp(0.2, 0.6);
    let story = infer_event_story(client, &context)
        .max_items(config.max_photos_per_event)
        .temperature(story_temperature)
        .call()
        .await?;

    let palette = color_analysis::dominant_palette(&selected_paths, 5);

    let out_path = write_event_page(&config.out_dir, &aggregate, &story, &palette)?;
    info!("wrote {}", out_path.display());
    Ok(())
}
