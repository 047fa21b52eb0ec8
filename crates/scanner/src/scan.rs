use crate::exif_capture::read_exif_capture;
use chrono::{DateTime, Local, NaiveDateTime};
use color_eyre::Result;
use common_types::PhotoRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Walks `photo_dir` and builds the ordered record sequence the segmentation
/// engine expects: ids unique, records sorted ascending by capture time with
/// timestamp-less records first.
pub fn scan_photos(photo_dir: &Path) -> Result<Vec<PhotoRecord>> {
    let mut paths = photo_files(photo_dir);
    paths.sort();
    info!("found {} photo files under {}", paths.len(), photo_dir.display());

    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut records: Vec<PhotoRecord> = paths
        .into_iter()
        .map(|path| {
            let id = disambiguated_id(&path, &mut seen);
            let capture = read_exif_capture(&path);
            let taken_at = capture.taken_at.or_else(|| modified_time(&path));
            if taken_at.is_none() {
                debug!("no time source for {}", path.display());
            }
            PhotoRecord {
                id,
                path,
                taken_at,
                gps: capture.gps,
            }
        })
        .collect();

    // Stable, so walk order is preserved among equal keys.
    records.sort_by_key(|r| r.taken_at.unwrap_or(NaiveDateTime::MIN));
    Ok(records)
}

fn photo_files(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_photo_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn is_photo_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PHOTO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Basename as id, with an `_N` suffix from the second duplicate onward.
fn disambiguated_id(path: &Path, seen: &mut HashMap<String, u32>) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let count = seen.entry(base.clone()).or_insert(0);
    if *count == 0 {
        *count += 1;
        return base;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let id = format!("{stem}_{count}{suffix}");
    *count += 1;
    id
}

fn modified_time(path: &Path) -> Option<NaiveDateTime> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).naive_local())
}
