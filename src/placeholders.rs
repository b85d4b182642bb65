//! The closed set of template placeholders and the per-photo value map.
//!
//! Templates refer to photo data through `$`-prefixed tokens such as
//! `$TITLE` or `$SMALL_URL`. The vocabulary is fixed: [`Placeholder::ALL`]
//! lists every token the expander recognizes, and a [`PlaceholderMap`]
//! always carries a value for each of them. Metadata the feed did not
//! provide maps to the empty string, never to a missing key.
//!
//! ## Value sources
//!
//! | Placeholders | Source |
//! |---|---|
//! | `$TITLE`, `$DESCRIPTION`, `$CREDIT`, `$LICENSE`, … | feed metadata, verbatim |
//! | `$SAFE_TITLE`, `$SAFE_DESCRIPTION`, `$SAFE_CREDIT` | HTML-escaped copies |
//! | `$PUBLISHED_YYYY-MM-DD`, `$UPDATED_YYYY-MM-DD` | date part of the timestamps |
//! | `$SMALL_*`, `$LARGE_*` | [`sizing::plan`] + [`asset_url`] splice of `$THUMB` |

use crate::asset_url;
use crate::photo::PhotoRecord;
use crate::sizing::{self, DimensionResult, SizeProfile, SizingError};
use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// A template token from the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Exposure,
    Flash,
    FocalLength,
    FStop,
    UniqueId,
    Iso,
    Make,
    Model,
    Time,
    License,
    Bytes,
    Timestamp,
    Version,
    Credit,
    Height,
    Width,
    Title,
    Description,
    Download,
    Thumb,
    PublishedIso8601,
    PublishedDate,
    UpdatedIso8601,
    UpdatedDate,
    SafeCredit,
    SafeTitle,
    SafeDescription,
    SmallUrl,
    SmallWidth,
    SmallHeight,
    LargeUrl,
    LargeWidth,
    LargeHeight,
}

impl Placeholder {
    /// Every placeholder, in documentation order.
    pub const ALL: [Placeholder; 33] = [
        Placeholder::Exposure,
        Placeholder::Flash,
        Placeholder::FocalLength,
        Placeholder::FStop,
        Placeholder::UniqueId,
        Placeholder::Iso,
        Placeholder::Make,
        Placeholder::Model,
        Placeholder::Time,
        Placeholder::License,
        Placeholder::Bytes,
        Placeholder::Timestamp,
        Placeholder::Version,
        Placeholder::Credit,
        Placeholder::Height,
        Placeholder::Width,
        Placeholder::Title,
        Placeholder::Description,
        Placeholder::Download,
        Placeholder::Thumb,
        Placeholder::PublishedIso8601,
        Placeholder::PublishedDate,
        Placeholder::UpdatedIso8601,
        Placeholder::UpdatedDate,
        Placeholder::SafeCredit,
        Placeholder::SafeTitle,
        Placeholder::SafeDescription,
        Placeholder::SmallUrl,
        Placeholder::SmallWidth,
        Placeholder::SmallHeight,
        Placeholder::LargeUrl,
        Placeholder::LargeWidth,
        Placeholder::LargeHeight,
    ];

    /// The literal token as written in templates.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Exposure => "$EXPOSURE",
            Placeholder::Flash => "$FLASH",
            Placeholder::FocalLength => "$FOCALLENGTH",
            Placeholder::FStop => "$FSTOP",
            Placeholder::UniqueId => "$UNIQUEID",
            Placeholder::Iso => "$ISO",
            Placeholder::Make => "$MAKE",
            Placeholder::Model => "$MODEL",
            Placeholder::Time => "$TIME",
            Placeholder::License => "$LICENSE",
            Placeholder::Bytes => "$BYTES",
            Placeholder::Timestamp => "$TIMESTAMP",
            Placeholder::Version => "$VERSION",
            Placeholder::Credit => "$CREDIT",
            Placeholder::Height => "$HEIGHT",
            Placeholder::Width => "$WIDTH",
            Placeholder::Title => "$TITLE",
            Placeholder::Description => "$DESCRIPTION",
            Placeholder::Download => "$DOWNLOAD",
            Placeholder::Thumb => "$THUMB",
            Placeholder::PublishedIso8601 => "$PUBLISHED_ISO8601",
            Placeholder::PublishedDate => "$PUBLISHED_YYYY-MM-DD",
            Placeholder::UpdatedIso8601 => "$UPDATED_ISO8601",
            Placeholder::UpdatedDate => "$UPDATED_YYYY-MM-DD",
            Placeholder::SafeCredit => "$SAFE_CREDIT",
            Placeholder::SafeTitle => "$SAFE_TITLE",
            Placeholder::SafeDescription => "$SAFE_DESCRIPTION",
            Placeholder::SmallUrl => "$SMALL_URL",
            Placeholder::SmallWidth => "$SMALL_WIDTH",
            Placeholder::SmallHeight => "$SMALL_HEIGHT",
            Placeholder::LargeUrl => "$LARGE_URL",
            Placeholder::LargeWidth => "$LARGE_WIDTH",
            Placeholder::LargeHeight => "$LARGE_HEIGHT",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Values for every placeholder, for one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    values: BTreeMap<Placeholder, String>,
}

impl Default for PlaceholderMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderMap {
    /// A map with every placeholder set to the empty string.
    pub fn new() -> Self {
        Self {
            values: Placeholder::ALL
                .into_iter()
                .map(|p| (p, String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, key: Placeholder, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: Placeholder) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Build the full map for one photo and the two size profiles.
    ///
    /// Missing metadata becomes the empty string. The only failure is a
    /// bounded profile applied to a photo without a usable natural size.
    pub fn from_photo(
        photo: &PhotoRecord,
        small: &SizeProfile,
        large: &SizeProfile,
    ) -> Result<Self, SizingError> {
        let mut map = Self::new();

        let text_fields = [
            (Placeholder::Exposure, &photo.exposure),
            (Placeholder::Flash, &photo.flash),
            (Placeholder::FocalLength, &photo.focal_length),
            (Placeholder::FStop, &photo.fstop),
            (Placeholder::UniqueId, &photo.unique_id),
            (Placeholder::Iso, &photo.iso),
            (Placeholder::Make, &photo.make),
            (Placeholder::Model, &photo.model),
            (Placeholder::Time, &photo.time),
            (Placeholder::License, &photo.license),
            (Placeholder::Bytes, &photo.bytes),
            (Placeholder::Timestamp, &photo.timestamp),
            (Placeholder::Version, &photo.version),
            (Placeholder::Credit, &photo.credit),
            (Placeholder::Title, &photo.title),
            (Placeholder::Description, &photo.description),
            (Placeholder::Download, &photo.download_url),
            (Placeholder::Thumb, &photo.thumbnail_url),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                map.set(key, value.as_str());
            }
        }

        if let Some(width) = photo.width {
            map.set(Placeholder::Width, width.to_string());
        }
        if let Some(height) = photo.height {
            map.set(Placeholder::Height, height.to_string());
        }

        if let Some(published) = &photo.published {
            map.set(Placeholder::PublishedIso8601, published.as_str());
            map.set(Placeholder::PublishedDate, date_part(published));
        }
        if let Some(updated) = &photo.updated {
            map.set(Placeholder::UpdatedIso8601, updated.as_str());
            map.set(Placeholder::UpdatedDate, date_part(updated));
        }

        for (safe, raw) in [
            (Placeholder::SafeCredit, Placeholder::Credit),
            (Placeholder::SafeTitle, Placeholder::Title),
            (Placeholder::SafeDescription, Placeholder::Description),
        ] {
            let escaped = escape_html(map.get(raw));
            map.set(safe, escaped);
        }

        let natural = photo.natural_size();
        let thumb = map.get(Placeholder::Thumb).to_string();

        let small_plan = sizing::plan(small, natural)?;
        map.set_size(
            &thumb,
            &small_plan,
            [
                Placeholder::SmallUrl,
                Placeholder::SmallWidth,
                Placeholder::SmallHeight,
            ],
        );

        let large_plan = sizing::plan(large, natural)?;
        map.set_size(
            &thumb,
            &large_plan,
            [
                Placeholder::LargeUrl,
                Placeholder::LargeWidth,
                Placeholder::LargeHeight,
            ],
        );

        Ok(map)
    }

    fn set_size(&mut self, thumb: &str, plan: &DimensionResult, [url, width, height]: [Placeholder; 3]) {
        let code = plan.resize_code.to_string();
        self.set(url, asset_url::resized_or_original(thumb, &code));
        self.set(width, plan.target_width.to_string());
        self.set(height, plan.target_height.to_string());
    }
}

/// Escape `& " ' < >` for use in attributes and text, writing `'` as `&#39;`.
fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).replace("&#x27;", "&#39;")
}

/// `YYYY-MM-DD` for an ISO-8601 timestamp.
///
/// Falls back to the text before `T` when the timestamp does not parse.
fn date_part(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.date_naive().format("%Y-%m-%d").to_string();
    }
    let prefix = timestamp.split('T').next().unwrap_or_default();
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => prefix.to_string(),
    }
}
