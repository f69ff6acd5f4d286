use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisBundle;

/// Parse an analysis bundle JSON file
pub fn parse_bundle_file(path: &Path) -> Result<AnalysisBundle> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_bundle_json(&content)
}

/// Parse an analysis bundle JSON string
pub fn parse_bundle_json(json: &str) -> Result<AnalysisBundle> {
    serde_json::from_str(json).context("Failed to parse analysis bundle JSON")
}
