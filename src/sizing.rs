//! Display sizing and resize-code planning for hosted photos.
//!
//! The image host serves any size variant of a photo when the asset URL
//! carries a resize directive such as `/w640-h480-c` or `/s320`. Embedding a
//! photo therefore needs two things from the configured [`SizeProfile`]:
//!
//! - **Fit dimensions**: the width/height written into the `<img>` tag. The
//!   natural size is shrunk (never enlarged) to satisfy the configured bounds
//!   while preserving aspect ratio.
//! - **Resize code**: the URL segment asking the host for pixels. This one is
//!   multiplied by the profile's `scale` so high-density screens get a sharper
//!   image at the same display size.
//!
//! ## Host limits
//!
//! The host refuses dimension requests above [`WIDTH_ONLY_CAP`] pixels and
//! caps the height at [`HEIGHT_ONLY_CAP`] when no width is given. Both caps
//! only apply to the single-bound branches.
//!
//! ## Resize codes
//!
//! ```text
//! no bounds          → /d               (original size, scale ignored)
//! max_width only     → /w{fetch_w}
//! max_height only    → /h{fetch_h}
//! both, square       → /s{fetch}[-c]
//! both, rectangular  → /w{fetch_w}-h{fetch_h}[-c]
//! ```
//!
//! All functions here are pure and testable without any I/O.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest width the host will produce when only a width is requested.
pub const WIDTH_ONLY_CAP: u32 = 2560;

/// Largest height the host will produce when only a height is requested.
pub const HEIGHT_ONLY_CAP: u32 = 1060;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("Invalid natural dimensions {width}x{height}: aspect-preserving resize needs both sides > 0")]
    InvalidDimension { width: u32, height: u32 },
}

/// Crop/scale/bounds configuration for one embed size ("small" or "large").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeProfile {
    /// Ask the host to crop to the exact box (only meaningful with both bounds).
    pub crop: bool,
    /// Pixel density multiplier for the fetched image. Display size is unaffected.
    pub scale: f64,
    /// Maximum display width. Unset (or `0` in config) means unconstrained.
    #[serde(
        deserialize_with = "unset_if_zero",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_width: Option<u32>,
    /// Maximum display height. Unset (or `0` in config) means unconstrained.
    #[serde(
        deserialize_with = "unset_if_zero",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_height: Option<u32>,
}

/// TOML has no null, so `0` is how a config layer clears an inherited bound.
fn unset_if_zero<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.filter(|&n| n > 0))
}

impl Default for SizeProfile {
    fn default() -> Self {
        Self {
            crop: false,
            scale: 1.0,
            max_width: None,
            max_height: None,
        }
    }
}

impl SizeProfile {
    /// Profile bounded by width only.
    pub fn max_width(width: u32) -> Self {
        Self {
            max_width: Some(width),
            ..Self::default()
        }
    }

    /// Profile bounded by height only.
    pub fn max_height(height: u32) -> Self {
        Self {
            max_height: Some(height),
            ..Self::default()
        }
    }

    /// Profile bounded by both sides.
    pub fn bounded(width: u32, height: u32) -> Self {
        Self {
            max_width: Some(width),
            max_height: Some(height),
            ..Self::default()
        }
    }
}

/// True pixel dimensions of the source photo. Zero means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn invalid(&self) -> SizingError {
        SizingError::InvalidDimension {
            width: self.width,
            height: self.height,
        }
    }
}

/// URL path segment instructing the host which variant to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeCode {
    /// `/d`: the original upload.
    Original,
    /// `/w{n}`: scale to a width.
    Width(u32),
    /// `/h{n}`: scale to a height.
    Height(u32),
    /// `/s{n}`: square box.
    Square { size: u32, crop: bool },
    /// `/w{w}-h{h}`: rectangular box.
    Box { width: u32, height: u32, crop: bool },
}

impl fmt::Display for ResizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ResizeCode::Original => write!(f, "/d"),
            ResizeCode::Width(w) => write!(f, "/w{w}"),
            ResizeCode::Height(h) => write!(f, "/h{h}"),
            ResizeCode::Square { size, crop } => {
                write!(f, "/s{size}")?;
                if crop {
                    write!(f, "-c")?;
                }
                Ok(())
            }
            ResizeCode::Box {
                width,
                height,
                crop,
            } => {
                write!(f, "/w{width}-h{height}")?;
                if crop {
                    write!(f, "-c")?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of planning one size profile against one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionResult {
    /// Display width (unscaled), for the `width` attribute.
    pub target_width: u32,
    /// Display height (unscaled), for the `height` attribute.
    pub target_height: u32,
    /// Scaled pixel request for the asset URL.
    pub resize_code: ResizeCode,
}

fn round_u32(value: f64) -> u32 {
    value.round() as u32
}

/// Calculate display dimensions from optional bounds and the natural size.
///
/// Only shrinks, never enlarges, and keeps the aspect ratio:
///
/// - no bounds: natural size unchanged (zero passes through)
/// - width only: `min(natural_w, max_w, WIDTH_ONLY_CAP)`, height follows
/// - height only: `min(natural_h, max_h, HEIGHT_ONLY_CAP)`, width follows
/// - both: a single ratio that fits both bounds (1 if already inside)
///
/// Any bounded branch needs a known natural size to derive the ratio and
/// fails with [`SizingError::InvalidDimension`] otherwise.
///
/// # Examples
/// ```
/// # use embedder::sizing::{fit_dimensions, NaturalSize};
/// // 1200x800 bounded to 620 wide → 620x413
/// assert_eq!(fit_dimensions(Some(620), None, NaturalSize::new(1200, 800)).unwrap(), (620, 413));
///
/// // 1200x800 already fits 1200x1200 → unchanged
/// assert_eq!(fit_dimensions(Some(1200), Some(1200), NaturalSize::new(1200, 800)).unwrap(), (1200, 800));
/// ```
pub fn fit_dimensions(
    max_width: Option<u32>,
    max_height: Option<u32>,
    natural: NaturalSize,
) -> Result<(u32, u32), SizingError> {
    let (nw, nh) = (natural.width, natural.height);

    match (max_width, max_height) {
        (None, None) => Ok((nw, nh)),
        (Some(mw), None) => {
            if !natural.is_known() {
                return Err(natural.invalid());
            }
            let w = nw.min(mw).min(WIDTH_ONLY_CAP);
            let h = round_u32(nh as f64 * w as f64 / nw as f64);
            Ok((w, h))
        }
        (None, Some(mh)) => {
            if !natural.is_known() {
                return Err(natural.invalid());
            }
            let h = nh.min(mh).min(HEIGHT_ONLY_CAP);
            let w = round_u32(nw as f64 * h as f64 / nh as f64);
            Ok((w, h))
        }
        (Some(mw), Some(mh)) => {
            if !natural.is_known() {
                return Err(natural.invalid());
            }
            let ratio = if nw <= mw && nh <= mh {
                1.0
            } else {
                let rw = mw as f64 / nw as f64;
                let rh = mh as f64 / nh as f64;
                rw.min(rh)
            };
            Ok((round_u32(nw as f64 * ratio), round_u32(nh as f64 * ratio)))
        }
    }
}

/// Plan display dimensions and the host resize code for one profile.
///
/// A bound of zero counts as unset. With no bounds at all the result is
/// the original asset (`/d`) and `scale` is not applied.
///
/// # Examples
/// ```
/// # use embedder::sizing::{plan, NaturalSize, SizeProfile};
/// let profile = SizeProfile { crop: true, ..SizeProfile::bounded(1200, 1200) };
/// let result = plan(&profile, NaturalSize::new(1200, 800)).unwrap();
/// assert_eq!((result.target_width, result.target_height), (1200, 800));
/// assert_eq!(result.resize_code.to_string(), "/w1200-h800-c");
/// ```
pub fn plan(profile: &SizeProfile, natural: NaturalSize) -> Result<DimensionResult, SizingError> {
    let max_width = profile.max_width.filter(|&w| w > 0);
    let max_height = profile.max_height.filter(|&h| h > 0);

    let (fit_w, fit_h) = fit_dimensions(max_width, max_height, natural)?;
    let fetch_w = round_u32(profile.scale * fit_w as f64);
    let fetch_h = round_u32(profile.scale * fit_h as f64);

    let resize_code = match (max_width, max_height) {
        (None, None) => ResizeCode::Original,
        (Some(_), None) => ResizeCode::Width(fetch_w),
        (None, Some(_)) => ResizeCode::Height(fetch_h),
        (Some(_), Some(_)) if fetch_w == fetch_h => ResizeCode::Square {
            size: fetch_w,
            crop: profile.crop,
        },
        (Some(_), Some(_)) => ResizeCode::Box {
            width: fetch_w,
            height: fetch_h,
            crop: profile.crop,
        },
    };

    tracing::debug!(
        natural_width = natural.width,
        natural_height = natural.height,
        fit_width = fit_w,
        fit_height = fit_h,
        code = %resize_code,
        "planned size"
    );

    Ok(DimensionResult {
        target_width: fit_w,
        target_height: fit_h,
        resize_code,
    })
}
