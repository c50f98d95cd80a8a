use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisResponse;

/// Render a response as JSON
pub fn render_response(response: &AnalysisResponse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    json.context("Failed to serialize analysis response")
}

/// Write a response to a JSON file
pub fn write_response(response: &AnalysisResponse, path: &Path, pretty: bool) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    let json = render_response(response, pretty)?;
    writeln!(file, "{}", json).with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(())
}
