use crate::distance::haversine_km;
use crate::options::SegmentOptions;
use common_types::{Event, GpsPosition, PhotoRecord};

/// Partitions an ordered photo sequence into events.
///
/// A single forward pass keeps one open run. Each photo is compared against
/// the photo immediately before it in the run; it extends the run only when
/// both the time gap and the distance gap are within the thresholds. Either
/// test passes outright when one side lacks the data for it, so incomplete
/// metadata under-splits rather than over-splits. Runs shorter than
/// `min_event_size` are dropped and do not consume an event id.
///
/// The input must already be ordered by capture time (timestamp-less records
/// first); the scanner guarantees this and the engine does not re-check it.
/// Pure and deterministic: same input and options, same output.
#[must_use]
pub fn segment_events(photos: &[PhotoRecord], options: &SegmentOptions) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    let mut current: Vec<PhotoRecord> = Vec::new();
    let threshold_seconds = options.time_gap_hours * 3600.0;

    for photo in photos {
        if let Some(prev) = current.last() {
            let same_run = time_gap_ok(prev, photo, threshold_seconds)
                && distance_gap_ok(prev, photo, options.distance_gap_km);
            if !same_run {
                close_run(&mut current, &mut events, options.min_event_size);
            }
        }
        current.push(photo.clone());
    }
    close_run(&mut current, &mut events, options.min_event_size);

    events
}

/// Passes when either photo lacks a timestamp, or the elapsed time is within
/// the threshold (inclusive).
fn time_gap_ok(prev: &PhotoRecord, next: &PhotoRecord, threshold_seconds: f64) -> bool {
    match (prev.taken_at, next.taken_at) {
        (Some(a), Some(b)) => {
            // Millisecond precision: mtime-fallback timestamps carry
            // sub-second parts, and truncating to whole seconds would let a
            // pair just over the threshold slip through.
            let elapsed = (b - a).num_milliseconds() as f64 / 1000.0;
            elapsed <= threshold_seconds
        }
        _ => true,
    }
}

/// Passes when either photo lacks a GPS fix, or the great-circle distance is
/// within the threshold (inclusive).
fn distance_gap_ok(prev: &PhotoRecord, next: &PhotoRecord, distance_gap_km: f64) -> bool {
    match (prev.gps, next.gps) {
        (Some(a), Some(b)) => haversine_km(a, b) <= distance_gap_km,
        _ => true,
    }
}

/// Drains the open run; emits it as an event when it is large enough.
/// Shared by the mid-pass split and the end-of-input flush.
fn close_run(current: &mut Vec<PhotoRecord>, events: &mut Vec<Event>, min_event_size: usize) {
    let run = std::mem::take(current);
    if run.len() >= min_event_size {
        events.push(finalize_event(run, events.len()));
    }
}

fn finalize_event(photos: Vec<PhotoRecord>, emitted_so_far: usize) -> Event {
    let start_time = photos.iter().filter_map(|p| p.taken_at).min();
    let end_time = photos.iter().filter_map(|p| p.taken_at).max();
    Event {
        event_id: format!("E{:04}", emitted_so_far + 1),
        photo_ids: photos.iter().map(|p| p.id.clone()).collect(),
        start_time,
        end_time,
        center: centroid(&photos),
        photos,
    }
}

/// Unweighted mean over members with a fix; every coordinate-bearing member
/// contributes equally regardless of its position in the run.
fn centroid(photos: &[PhotoRecord]) -> Option<GpsPosition> {
    let fixes: Vec<GpsPosition> = photos.iter().filter_map(|p| p.gps).collect();
    if fixes.is_empty() {
        return None;
    }
    let count = fixes.len() as f64;
    Some(GpsPosition {
        latitude: fixes.iter().map(|g| g.latitude).sum::<f64>() / count,
        longitude: fixes.iter().map(|g| g.longitude).sum::<f64>() / count,
    })
}
