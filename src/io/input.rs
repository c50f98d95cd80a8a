use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Where the text to analyze comes from
#[derive(Debug, Clone)]
pub enum TextSource<'a> {
    Inline(&'a str),
    File(&'a Path),
    Stdin,
}

/// Read the text to analyze
pub fn read_input_text(source: TextSource<'_>) -> Result<String> {
    match source {
        TextSource::Inline(text) => Ok(text.to_string()),
        TextSource::File(path) => read_text_file(path),
        TextSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}

/// Read a UTF-8 text file
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}
