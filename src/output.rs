// src/output.rs
use crate::types::{ExportFormat, OsintError, SearchResult};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 50;
const REPORT_TITLE: &str = "OSINTAAM Search Results";

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Renders the current result. With nothing stored, an empty mapping is rendered.
pub fn render(results: Option<&SearchResult>, format: ExportFormat, generated: &str) -> Result<String, OsintError> {
    let value = match results {
        Some(result) => serde_json::to_value(result)?,
        None => Value::Object(Map::new()),
    };

    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        ExportFormat::Txt => render_text(&value, generated),
    }
}

fn render_text(value: &Value, generated: &str) -> Result<String, OsintError> {
    let mut output = String::new();
    output.push_str(&rule());
    output.push('\n');
    output.push_str(REPORT_TITLE);
    output.push('\n');
    output.push_str(&format!("Generated: {}\n", generated));
    output.push_str(&rule());
    output.push('\n');

    if let Some(fields) = value.as_object() {
        for (key, field) in fields {
            output.push_str(&format!(
                "\n{}:\n{}\n",
                key.to_uppercase(),
                serde_json::to_string_pretty(field)?
            ));
        }
    }

    Ok(output)
}

pub fn write_to_file(file_path: &Path, content: &str) -> Result<(), OsintError> {
    // Create directory if it doesn't exist
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| OsintError::OutputError(format!("Failed to create directory: {}", e)))?;
    }

    let mut file = File::create(file_path)
        .map_err(|e| OsintError::OutputError(format!("Failed to create file: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| OsintError::OutputError(e.to_string()))?;

    Ok(())
}
