use chrono::NaiveDateTime;
use common_types::GpsPosition;
use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Capture metadata pulled out of a photo's EXIF block. Anything that fails
/// to parse simply stays `None`; EXIF problems never fail a scan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExifCapture {
    pub taken_at: Option<NaiveDateTime>,
    pub gps: Option<GpsPosition>,
}

const DATETIME_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[must_use]
pub fn read_exif_capture(path: &Path) -> ExifCapture {
    let Ok(file) = File::open(path) else {
        return ExifCapture::default();
    };
    let mut reader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("no EXIF in {}: {e}", path.display());
            return ExifCapture::default();
        }
    };

    ExifCapture {
        taken_at: capture_time(&exif),
        gps: gps_position(&exif),
    }
}

fn capture_time(exif: &Exif) -> Option<NaiveDateTime> {
    DATETIME_TAGS
        .iter()
        .filter_map(|&tag| ascii_field(exif, tag))
        .find_map(|s| NaiveDateTime::parse_from_str(&s, EXIF_DATETIME_FORMAT).ok())
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(chunks) => chunks
            .first()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .map(|s| s.trim().to_string()),
        _ => None,
    }
}

/// A fix needs all four tags: both coordinates and both hemisphere
/// references. Rationals without a reference are ambiguous and dropped.
fn gps_position(exif: &Exif) -> Option<GpsPosition> {
    let latitude = rational_degrees(exif, Tag::GPSLatitude)?;
    let longitude = rational_degrees(exif, Tag::GPSLongitude)?;
    let lat_ref = ascii_field(exif, Tag::GPSLatitudeRef)?;
    let lon_ref = ascii_field(exif, Tag::GPSLongitudeRef)?;
    Some(GpsPosition {
        latitude: apply_hemisphere(latitude, &lat_ref),
        longitude: apply_hemisphere(longitude, &lon_ref),
    })
}

fn rational_degrees(exif: &Exif, tag: Tag) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Rational(parts) = &field.value else {
        return None;
    };
    dms_to_degrees(parts)
}

/// Degrees/minutes/seconds rationals collapsed to decimal degrees.
fn dms_to_degrees(parts: &[exif::Rational]) -> Option<f64> {
    if parts.len() < 3 || parts.iter().take(3).any(|r| r.denom == 0) {
        return None;
    }
    Some(parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0)
}

/// Southern and western hemispheres negate; anything else leaves the sign.
fn apply_hemisphere(degrees: f64, reference: &str) -> f64 {
    match reference {
        "S" | "W" => -degrees,
        _ => degrees,
    }
}
