use color_eyre::Result;
use common_types::PhotoInsight;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File cache for per-photo insights under `<out>/.cache/photo_insight/`,
/// one pretty-printed JSON file per photo id. A missing or unreadable entry
/// is a miss, never an error.
pub struct InsightCache {
    dir: PathBuf,
}

impl InsightCache {
    pub fn open(out_dir: &Path) -> Result<Self> {
        let dir = out_dir.join(".cache").join("photo_insight");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn load(&self, photo_id: &str) -> Option<PhotoInsight> {
        let path = self.entry_path(photo_id);
        let text = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(insight) => Some(insight),
            Err(e) => {
                debug!("discarding unreadable cache entry {}: {e}", path.display());
                None
            }
        }
    }

    pub fn store(&self, insight: &PhotoInsight) -> Result<()> {
        let path = self.entry_path(&insight.photo_id);
        let text = serde_json::to_string_pretty(insight)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn entry_path(&self, photo_id: &str) -> PathBuf {
        self.dir.join(format!("{photo_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(id: &str) -> PhotoInsight {
        PhotoInsight {
            photo_id: id.to_string(),
            caption: "a quiet street".to_string(),
            objects: vec!["bicycle".to_string()],
            ..PhotoInsight::default()
        }
    }

    #[test]
    fn store_then_load_round_trips() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cache = InsightCache::open(dir.path())?;
        let original = insight("img.jpg");
        cache.store(&original)?;
        assert_eq!(cache.load("img.jpg"), Some(original));
        Ok(())
    }

    #[test]
    fn missing_entry_is_a_miss() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cache = InsightCache::open(dir.path())?;
        assert_eq!(cache.load("never_stored.jpg"), None);
        Ok(())
    }

    #[test]
    fn corrupt_entry_is_a_miss() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let cache = InsightCache::open(dir.path())?;
        let entry = dir
            .path()
            .join(".cache")
            .join("photo_insight")
            .join("bad.jpg.json");
        std::fs::write(entry, "{ not json")?;
        assert_eq!(cache.load("bad.jpg"), None);
        Ok(())
    }
}
