use crate::kmeans::kmeans;
use crate::sampling::{lab_to_rgb, sample_pixels};
use palette::Lab;
use std::path::PathBuf;
use tracing::debug;

const SAMPLES_PER_IMAGE: usize = 5000;
const MAX_CLUSTERS: usize = 8;
const FALLBACK_PALETTE: &[&str] = &["#777777", "#aaaaaa", "#333333"];

/// Dominant colors across a set of images as `#rrggbb` strings, most
/// prominent first. Undecodable images are skipped; if nothing decodes a
/// neutral fallback palette is returned.
#[must_use]
pub fn dominant_palette(image_paths: &[PathBuf], k: usize) -> Vec<String> {
    let mut pixels: Vec<Lab> = Vec::new();
    for (i, path) in image_paths.iter().enumerate() {
        if let Some(mut sampled) = sample_pixels(path, SAMPLES_PER_IMAGE, i as u64) {
            pixels.append(&mut sampled);
        }
    }
    if pixels.is_empty() {
        debug!("no decodable images, using fallback palette");
        return FALLBACK_PALETTE.iter().map(ToString::to_string).collect();
    }

    let k = k.clamp(1, MAX_CLUSTERS);
    kmeans(&pixels, k, 0)
        .into_iter()
        .map(|(center, _count)| {
            let (r, g, b) = lab_to_rgb(center);
            rgb_to_hex(r, g, b)
        })
        .collect()
}

#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
