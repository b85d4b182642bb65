//! Rewriting hosted asset URLs to request a specific size variant.
//!
//! Thumbnail URLs from the photo feed end in a size segment followed by the
//! filename:
//!
//! ```text
//! https://lh3.example.com/-aBc/XyZ/AAAA/s160-c/photo.jpg
//!                                       ^^^^^^ size segment
//! ```
//!
//! The segment starts with one of `s`, `w`, `h` and digits, optionally
//! followed by dash-separated parts (`-h480`, `-c`). Replacing it with a
//! [`ResizeCode`](crate::sizing::ResizeCode) yields a URL the host will serve
//! at the planned size. The filename is preserved.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Asset URL has no size segment to replace: {0}")]
    MalformedAssetUrl(String),
}

static SIZE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/[swh]\d+(?:-[a-z]?\d*)*(/[^/]+)$").expect("size segment pattern is valid")
});

/// Replace the size segment of `url` with `code`.
///
/// `code` is a full path segment including its leading slash, e.g. `/w640`.
///
/// # Examples
/// ```
/// # use embedder::asset_url::splice_resize_code;
/// let url = "https://lh3.example.com/a/b/s160-c/photo.jpg";
/// assert_eq!(
///     splice_resize_code(url, "/w640-h480").unwrap(),
///     "https://lh3.example.com/a/b/w640-h480/photo.jpg"
/// );
/// ```
pub fn splice_resize_code(url: &str, code: &str) -> Result<String, SpliceError> {
    let caps = SIZE_SEGMENT
        .captures(url)
        .ok_or_else(|| SpliceError::MalformedAssetUrl(url.to_string()))?;
    let (Some(segment), Some(filename)) = (caps.get(0), caps.get(1)) else {
        return Err(SpliceError::MalformedAssetUrl(url.to_string()));
    };

    let mut spliced = String::with_capacity(url.len() + code.len());
    spliced.push_str(&url[..segment.start()]);
    spliced.push_str(code);
    spliced.push_str(filename.as_str());
    Ok(spliced)
}

/// Splice `code` into `url`, keeping `url` unchanged when it has no size segment.
///
/// An empty URL stays empty without a warning: photos with no thumbnail
/// simply have nothing to resize.
pub fn resized_or_original(url: &str, code: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match splice_resize_code(url, code) {
        Ok(spliced) => spliced,
        Err(err) => {
            tracing::warn!("{err}; using the unmodified URL");
            url.to_string()
        }
    }
}
