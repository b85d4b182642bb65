//! # Embedder
//!
//! Generates HTML embed code for photos hosted on a resize-on-demand image
//! service. The user picks photos, and each one is turned into a snippet by
//! a template they control:
//!
//! ```text
//! <a href="$LARGE_URL"><img src="$SMALL_URL" width="$SMALL_WIDTH" height="$SMALL_HEIGHT" alt="$SAFE_TITLE"></a>
//! ```
//!
//! # Architecture: Plan, Map, Expand
//!
//! ```text
//! 1. Plan     size profile + natural size  →  display size + resize code
//! 2. Map      feed metadata + both plans   →  PlaceholderMap (every key set)
//! 3. Expand   template + PlaceholderMap    →  HTML fragment
//! ```
//!
//! Each step is a pure function of its inputs, so the whole core is
//! testable without network access and safe to run per photo in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizing`] | Fit dimensions and host resize codes for a [`sizing::SizeProfile`] |
//! | [`asset_url`] | Splices a resize code into a hosted asset URL |
//! | [`placeholders`] | The closed placeholder vocabulary and per-photo values |
//! | [`template`] | Longest-match, case-insensitive template expansion |
//! | [`photo`] | Flat per-photo feed records and their JSON loading |
//! | [`export`] | Batch export with per-photo failure isolation |
//! | [`config`] | `embedder.toml` loading, defaults, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Error Paths
//!
//! Partial metadata is normal, so anything missing expands to the empty
//! string. Arithmetic that cannot be done (an aspect-preserving resize of a
//! photo with no known size) fails with
//! [`sizing::SizingError::InvalidDimension`] instead of producing zero or
//! garbage, and the export drops just that photo. A thumbnail URL without a
//! size segment is logged and used unmodified.
//!
//! ## A Closed Vocabulary
//!
//! Placeholders are a fixed enum rather than arbitrary map keys. The matcher
//! is compiled once, every map carries every key, and overlapping tokens
//! (`$TIME` / `$TIMESTAMP`) resolve to the longest match.
//!
//! ## Host Limits as Constants
//!
//! The host caps single-bound requests at [`sizing::WIDTH_ONLY_CAP`] wide or
//! [`sizing::HEIGHT_ONLY_CAP`] tall. These are named so the policy is
//! visible and tested on its own.

pub mod asset_url;
pub mod config;
pub mod export;
pub mod output;
pub mod photo;
pub mod placeholders;
pub mod sizing;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
