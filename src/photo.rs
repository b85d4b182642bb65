//! Per-photo feed metadata.
//!
//! The feed client flattens each photo entry into a [`PhotoRecord`]: one
//! optional string per metadata field plus the natural size. Every field
//! may be missing, since feeds frequently omit EXIF data, credits and
//! licenses. A batch of selected photos is stored as a JSON array:
//!
//! ```json
//! [
//!   {
//!     "id": "5867293148712",
//!     "title": "Harbor at dusk",
//!     "width": "1200",
//!     "height": 800,
//!     "thumbnail_url": "https://lh3.example.com/a/b/s72/harbor.jpg",
//!     "published": "2015-06-21T18:04:11.000Z"
//!   }
//! ]
//! ```
//!
//! Dimensions are accepted as numbers or numeric strings; anything else is
//! treated as unknown rather than rejected.

use crate::sizing::NaturalSize;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat metadata record for one photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoRecord {
    /// Feed identifier, used only for reporting.
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub credit: Option<String>,
    pub license: Option<String>,

    // EXIF
    pub exposure: Option<String>,
    pub flash: Option<String>,
    pub focal_length: Option<String>,
    pub fstop: Option<String>,
    pub unique_id: Option<String>,
    pub iso: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub time: Option<String>,

    /// File size in bytes, as reported by the host.
    pub bytes: Option<String>,
    pub timestamp: Option<String>,
    pub version: Option<String>,

    #[serde(deserialize_with = "lenient_dimension")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "lenient_dimension")]
    pub height: Option<u32>,

    /// Full-size download URL.
    pub download_url: Option<String>,
    /// Thumbnail URL carrying the host size segment.
    pub thumbnail_url: Option<String>,

    /// ISO-8601 publish time.
    pub published: Option<String>,
    /// ISO-8601 last update time.
    pub updated: Option<String>,
}

impl PhotoRecord {
    /// Natural size, with missing sides reported as zero.
    pub fn natural_size(&self) -> NaturalSize {
        NaturalSize::new(self.width.unwrap_or(0), self.height.unwrap_or(0))
    }

    /// A short label for logs and reports: id, then title, then `#index`.
    pub fn label(&self, index: usize) -> String {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(String::from)
        };
        present(&self.id)
            .or_else(|| present(&self.title))
            .unwrap_or_else(|| format!("#{}", index + 1))
    }
}

fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
        Other(serde_json::Value),
    }

    let parsed = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => u32::try_from(n).ok(),
        Some(Raw::Text(s)) => s.trim().parse::<u32>().ok(),
        Some(Raw::Other(_)) | None => None,
    };
    Ok(parsed.filter(|&n| n > 0))
}

/// Parse a JSON array of photo records.
pub fn parse_photos(json: &str) -> Result<Vec<PhotoRecord>, PhotoError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON array of photo records from disk.
pub fn load_photos(path: &Path) -> Result<Vec<PhotoRecord>, PhotoError> {
    let content = std::fs::read_to_string(path)?;
    parse_photos(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_full_record() {
        let json = r#"[{
            "id": "42",
            "title": "Harbor",
            "description": "Boats",
            "make": "FUJIFILM",
            "width": 1200,
            "height": 800,
            "thumbnail_url": "https://host.example/a/s72/harbor.jpg",
            "published": "2015-06-21T18:04:11.000Z"
        }]"#;
        let photos = parse_photos(json).unwrap();
        assert_eq!(photos.len(), 1);
        let photo = &photos[0];
        assert_eq!(photo.title.as_deref(), Some("Harbor"));
        assert_eq!(photo.make.as_deref(), Some("FUJIFILM"));
        assert_eq!(photo.natural_size(), NaturalSize::new(1200, 800));
        assert_eq!(photo.credit, None);
    }

    #[test]
    fn parse_empty_record_defaults_everything() {
        let photos = parse_photos("[{}]").unwrap();
        assert_eq!(photos[0], PhotoRecord::default());
        assert_eq!(photos[0].natural_size(), NaturalSize::default());
    }

    #[test]
    fn dimensions_accept_numeric_strings() {
        let photos = parse_photos(r#"[{"width": "1600", "height": " 900 "}]"#).unwrap();
        assert_eq!(photos[0].natural_size(), NaturalSize::new(1600, 900));
    }

    #[test]
    fn malformed_dimensions_become_unknown() {
        let photos = parse_photos(
            r#"[
                {"width": "wide", "height": -5},
                {"width": null, "height": 0},
                {"width": 1.5, "height": [1]}
            ]"#,
        )
        .unwrap();
        for photo in &photos {
            assert_eq!(photo.width, None);
            assert_eq!(photo.height, None);
        }
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(matches!(parse_photos(r#"{"title": "x"}"#), Err(PhotoError::Json(_))));
    }

    #[test]
    fn label_prefers_id_then_title_then_index() {
        let with_id = PhotoRecord {
            id: Some("42".into()),
            title: Some("Harbor".into()),
            ..PhotoRecord::default()
        };
        let with_title = PhotoRecord {
            title: Some("Harbor".into()),
            ..PhotoRecord::default()
        };
        assert_eq!(with_id.label(0), "42");
        assert_eq!(with_title.label(0), "Harbor");
        assert_eq!(PhotoRecord::default().label(2), "#3");
    }

    #[test]
    fn label_skips_blank_id() {
        let blank_id = PhotoRecord {
            id: Some(String::new()),
            title: Some("Harbor".into()),
            ..PhotoRecord::default()
        };
        assert_eq!(blank_id.label(0), "Harbor");

        let blank_both = PhotoRecord {
            id: Some("  ".into()),
            title: Some(String::new()),
            ..PhotoRecord::default()
        };
        assert_eq!(blank_both.label(0), "#1");
    }

    #[test]
    fn load_photos_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photos.json");
        fs::write(&path, r#"[{"title": "a"}, {"title": "b"}]"#).unwrap();
        let photos = load_photos(&path).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[1].title.as_deref(), Some("b"));
    }

    #[test]
    fn load_photos_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_photos(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(PhotoError::Io(_))));
    }
}
