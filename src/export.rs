//! Batch export: selected photos → concatenated embed code.
//!
//! For each selected photo the export builds a [`PlaceholderMap`] (planning
//! both size profiles along the way) and expands the configured template
//! with it. Fragments are concatenated in selection order.
//!
//! ## Failure isolation
//!
//! A photo that cannot be planned (a bounded profile but no natural size)
//! is reported in [`ExportReport::failures`] and left out of the HTML. The
//! rest of the batch is unaffected. Missing metadata is never a failure; it
//! expands to the empty string.
//!
//! ## Parallel Processing
//!
//! Photos are rendered in parallel with [rayon](https://docs.rs/rayon). The
//! collected output keeps selection order regardless of completion order.

use crate::config::EmbedConfig;
use crate::photo::PhotoRecord;
use crate::placeholders::PlaceholderMap;
use crate::sizing::SizingError;
use crate::template::Expander;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Sizing failed: {0}")]
    Sizing(#[from] SizingError),
}

/// A photo left out of the export, with its position in the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    /// Zero-based index in the selection.
    pub index: usize,
    /// Id, title, or `#n` for display.
    pub label: String,
    pub error: ExportError,
}

/// Result of exporting a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Concatenated fragments for every photo that rendered.
    pub html: String,
    /// Number of photos in the selection.
    pub selected: usize,
    /// Number of photos that made it into `html`.
    pub exported: usize,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render a single photo through the configured template.
pub fn render_photo(photo: &PhotoRecord, config: &EmbedConfig) -> Result<String, ExportError> {
    let values = PlaceholderMap::from_photo(photo, &config.small, &config.large)?;
    Ok(Expander::shared().expand(&config.template, &values))
}

/// Export every photo in `photos`, in order.
pub fn export(photos: &[PhotoRecord], config: &EmbedConfig) -> ExportReport {
    let rendered: Vec<Result<String, ExportError>> = photos
        .par_iter()
        .map(|photo| render_photo(photo, config))
        .collect();

    let mut report = ExportReport {
        selected: photos.len(),
        ..ExportReport::default()
    };

    for (index, (photo, result)) in photos.iter().zip(rendered).enumerate() {
        match result {
            Ok(fragment) => {
                report.html.push_str(&fragment);
                report.exported += 1;
            }
            Err(error) => {
                let label = photo.label(index);
                tracing::warn!("skipping photo {label}: {error}");
                report.failures.push(ExportFailure {
                    index,
                    label,
                    error,
                });
            }
        }
    }

    tracing::info!(
        "exported {} out of {} selected",
        report.exported,
        report.selected
    );
    report
}
