use image::Rgb;
use image::imageops::FilterType;
use palette::{FromColor, Lab, Srgb};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::path::Path;
use tracing::debug;

const MAX_EDGE: u32 = 512;

/// Decodes an image, downscales it so the long edge is at most 512 px, and
/// returns up to `max_samples` pixels as Lab points. `None` when the file
/// cannot be decoded.
pub(crate) fn sample_pixels(path: &Path, max_samples: usize, seed: u64) -> Option<Vec<Lab>> {
    let image = match image::open(path) {
        Ok(image) => image,
        Err(e) => {
            debug!("skipping undecodable image {}: {e}", path.display());
            return None;
        }
    };
    let (w, h) = (image.width(), image.height());
    let image = if w.max(h) > MAX_EDGE {
        image.resize(MAX_EDGE, MAX_EDGE, FilterType::Triangle)
    } else {
        image
    };
    let rgb_image = image.to_rgb8();

    let mut pixels: Vec<Lab> = rgb_image.pixels().map(pixel_to_lab).collect();
    if pixels.len() > max_samples {
        let mut rng = StdRng::seed_from_u64(seed);
        let chosen = index::sample(&mut rng, pixels.len(), max_samples);
        pixels = chosen.iter().map(|i| pixels[i]).collect();
    }
    Some(pixels)
}

fn pixel_to_lab(&Rgb([r, g, b]): &Rgb<u8>) -> Lab {
    let srgb = Srgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
    Lab::from_color(srgb.into_linear())
}

pub(crate) fn lab_to_rgb(lab: Lab) -> (u8, u8, u8) {
    let srgb: Srgb<f32> = Srgb::from_linear(palette::LinSrgb::from_color(lab));
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    (to_byte(srgb.red), to_byte(srgb.green), to_byte(srgb.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_round_trip_preserves_primaries() {
        for (r, g, b) in [(255u8, 0u8, 0u8), (0, 255, 0), (0, 0, 255), (128, 128, 128)] {
            let lab = pixel_to_lab(&Rgb([r, g, b]));
            let (r2, g2, b2) = lab_to_rgb(lab);
            assert!(i16::from(r).abs_diff(i16::from(r2)) <= 2);
            assert!(i16::from(g).abs_diff(i16::from(g2)) <= 2);
            assert!(i16::from(b).abs_diff(i16::from(b2)) <= 2);
        }
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(sample_pixels(Path::new("/nonexistent.jpg"), 100, 0).is_none());
    }
}
