use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::dedupe::deduplicate_tabs;
use crate::domain::group_by_domain;
use crate::model::{ConversionSummary, DateRange, DateZone};
use crate::report::{ReportRenderer, DEFAULT_FAVICON_SERVICE};
use crate::tree::extract_tabs;
use crate::utils::format_number;

const TREE_EXTENSION: &str = ".tree";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Explicit report path; derived from the input and date range when unset.
    pub output: Option<PathBuf>,
    pub zone: DateZone,
    pub favicon_service: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            output: None,
            zone: DateZone::default(),
            favicon_service: DEFAULT_FAVICON_SERVICE.to_string(),
        }
    }
}

pub fn load_tree(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    parse_tree(&content).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

/// Parses a tab tree without serde_json's 128-level nesting limit; exported
/// window/tab hierarchies can run deeper than that.
pub fn parse_tree(content: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let tree = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(tree)
}

/// Runs the full conversion: read, walk, dedupe, group, render, write.
pub fn convert_tree(input: &Path, options: &ConvertOptions) -> Result<ConversionSummary> {
    let start_time = Instant::now();
    info!(action = "start", component = "pipeline", input = ?input, "Starting tab tree conversion");

    let tree = load_tree(input)?;

    let extraction = extract_tabs(&tree);
    let tabs_extracted = extraction.tabs.len();
    info!(
        action = "extract",
        component = "tree_walker",
        tab_count = tabs_extracted,
        date_count = extraction.dates.len(),
        "Extracted tabs from tree"
    );

    let tabs = deduplicate_tabs(extraction.tabs);
    let tabs_unique = tabs.len();
    info!(
        action = "dedupe",
        component = "deduplicator",
        unique_count = tabs_unique,
        removed = tabs_extracted - tabs_unique,
        "Removed duplicate URLs"
    );

    let grouping = group_by_domain(tabs);
    let date_range = DateRange::from_dates(&extraction.dates, options.zone);

    let html = ReportRenderer::new(&options.favicon_service).render(&grouping, date_range.as_ref());

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(input, date_range.as_ref()));
    fs::write(&output_path, html)
        .with_context(|| format!("Failed to write report to {:?}", output_path))?;

    info!(
        action = "complete",
        component = "pipeline",
        output = ?output_path,
        domain_count = grouping.groups.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Conversion completed"
    );

    Ok(ConversionSummary {
        output_path,
        date_range,
        tabs_extracted,
        tabs_unique,
        domain_count: grouping.groups.len(),
    })
}

/// `session.tree` -> `session-grouped-20231114-20231120.html`, next to the input.
/// Without dates the stamp is left blank: `session-grouped-.html`.
pub fn derive_output_path(input: &Path, date_range: Option<&DateRange>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(TREE_EXTENSION).unwrap_or(&file_name);
    let stamp = date_range.map(DateRange::file_stamp).unwrap_or_default();

    input.with_file_name(format!("{stem}-grouped-{stamp}.html"))
}

pub fn print_conversion_summary(summary: &ConversionSummary) {
    println!("HTML saved to {}", summary.output_path.display());
    if let Some(range) = &summary.date_range {
        println!("Date range: {}", range.label());
    }
    println!(
        "Tabs: {} unique ({} duplicates removed) across {} domains",
        format_number(summary.tabs_unique),
        format_number(summary.duplicates_removed()),
        format_number(summary.domain_count)
    );
}
