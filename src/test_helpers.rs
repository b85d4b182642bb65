//! Shared test utilities for the embedder test suite.
//!
//! Provides photo record builders and the stock size profiles, so tests
//! across modules agree on the same fixture photo:
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let photo = sample_photo();           // 1200x800, thumb ends in /s72/harbor.jpg
//! let map = PlaceholderMap::from_photo(&photo, &small_profile(), &large_profile())?;
//! assert_eq!(map.get(Placeholder::SmallUrl), thumb_url("w620"));
//! ```

use crate::photo::PhotoRecord;
use crate::sizing::SizeProfile;

const THUMB_BASE: &str = "https://lh3.googleusercontent.com/-aBcD/VxYz/AAAAAAAAAAI/q1w2e3";

// =========================================================================
// URLs
// =========================================================================

/// Fixture thumbnail URL with the given size segment (without slashes).
pub fn thumb_url(segment: &str) -> String {
    format!("{THUMB_BASE}/{segment}/harbor.jpg")
}

// =========================================================================
// Photo records
// =========================================================================

/// A fully populated 1200x800 photo.
pub fn sample_photo() -> PhotoRecord {
    PhotoRecord {
        id: Some("5867293148712".to_string()),
        title: Some("Harbor at dusk".to_string()),
        description: Some("Boats & gulls".to_string()),
        credit: Some("A. Photographer".to_string()),
        license: Some("CC BY 4.0".to_string()),
        exposure: Some("0.004".to_string()),
        flash: Some("false".to_string()),
        focal_length: Some("23.0".to_string()),
        fstop: Some("5.6".to_string()),
        unique_id: Some("a1b2c3".to_string()),
        iso: Some("400".to_string()),
        make: Some("FUJIFILM".to_string()),
        model: Some("X100T".to_string()),
        time: Some("1434909851000".to_string()),
        bytes: Some("482113".to_string()),
        timestamp: Some("1434909851000".to_string()),
        version: Some("7".to_string()),
        width: Some(1200),
        height: Some(800),
        download_url: Some(format!("{THUMB_BASE}/harbor.jpg")),
        thumbnail_url: Some(thumb_url("s72")),
        published: Some("2015-06-21T18:04:11.000Z".to_string()),
        updated: Some("2016-01-02T09:00:00.000Z".to_string()),
    }
}

/// [`sample_photo`] with a different title and no id.
pub fn titled_photo(title: &str) -> PhotoRecord {
    PhotoRecord {
        id: None,
        title: Some(title.to_string()),
        ..sample_photo()
    }
}

// =========================================================================
// Size profiles
// =========================================================================

/// Stock small profile: 620 wide.
pub fn small_profile() -> SizeProfile {
    SizeProfile::max_width(620)
}

/// Stock large profile: 1200 wide.
pub fn large_profile() -> SizeProfile {
    SizeProfile::max_width(1200)
}
