//! CLI output formatting.
//!
//! The generated HTML is the only thing written to stdout by `export`, so
//! it can be piped straight into a file or the clipboard. Everything else
//! (summaries, skipped photos, plan details) is formatted here.
//!
//! # Output Format
//!
//! ## Export summary (stderr)
//!
//! ```text
//! Exported 2 of 3 photos, 1 skipped
//!     Skipped 002 no-size: Sizing failed: Invalid natural dimensions 0x0: ...
//! ```
//!
//! ## Plan
//!
//! ```text
//! Natural: 1200x800
//! Display: 620x413
//! Resize code: /w620
//! URL: https://host.example/a/w620/photo.jpg
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     small: max 620 x any, scale 1, no crop
//!     large: max 1200 x any, scale 1, no crop
//! Template (143 chars)
//!     <a href="$LARGE_URL"><img src="$SMALL_URL" width="$SMALL_WIDTH" ...
//!     Placeholders: $LARGE_URL $SMALL_URL $SMALL_WIDTH ...
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that does the writing. Format functions are pure.

use crate::config::EmbedConfig;
use crate::export::ExportReport;
use crate::placeholders::Placeholder;
use crate::sizing::{DimensionResult, NaturalSize, SizeProfile};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn bound(value: Option<u32>) -> String {
    value.map_or_else(|| "any".to_string(), |v| v.to_string())
}

fn profile_line(name: &str, profile: &SizeProfile) -> String {
    format!(
        "{}{}: max {} x {}, scale {}, {}",
        indent(1),
        name,
        bound(profile.max_width),
        bound(profile.max_height),
        profile.scale,
        if profile.crop { "crop" } else { "no crop" }
    )
}

// ============================================================================
// Export
// ============================================================================

/// Summary lines for an export: counts, then one line per skipped photo.
pub fn format_export_summary(report: &ExportReport) -> Vec<String> {
    let mut headline = format!("Exported {} of {} photos", report.exported, report.selected);
    if !report.is_complete() {
        headline.push_str(&format!(", {} skipped", report.failures.len()));
    }
    let mut lines = vec![headline];
    for failure in &report.failures {
        lines.push(format!(
            "{}Skipped {} {}: {}",
            indent(1),
            format_index(failure.index + 1),
            failure.label,
            failure.error
        ));
    }
    lines
}

pub fn print_export_summary(report: &ExportReport) {
    for line in format_export_summary(report) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Plan
// ============================================================================

pub fn format_plan(natural: NaturalSize, result: &DimensionResult, url: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        format!("Natural: {}x{}", natural.width, natural.height),
        format!("Display: {}x{}", result.target_width, result.target_height),
        format!("Resize code: {}", result.resize_code),
    ];
    if let Some(url) = url {
        lines.push(format!("URL: {}", url));
    }
    lines
}

pub fn print_plan(natural: NaturalSize, result: &DimensionResult, url: Option<&str>) {
    for line in format_plan(natural, result, url) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check(config: &EmbedConfig, used: &[Placeholder]) -> Vec<String> {
    let mut lines = vec![
        "Config".to_string(),
        profile_line("small", &config.small),
        profile_line("large", &config.large),
        format!("Template ({} chars)", config.template.chars().count()),
    ];

    let first_line = config.template.lines().next().unwrap_or_default();
    lines.push(format!("{}{}", indent(1), truncate(first_line, 60)));

    if used.is_empty() {
        lines.push(format!("{}Placeholders: none", indent(1)));
    } else {
        let tokens: Vec<&str> = used.iter().map(|p| p.token()).collect();
        lines.push(format!("{}Placeholders: {}", indent(1), tokens.join(" ")));
    }
    lines
}

pub fn print_check(config: &EmbedConfig, used: &[Placeholder]) {
    for line in format_check(config, used) {
        println!("{}", line);
    }
}
