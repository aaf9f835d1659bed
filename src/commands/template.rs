//! Template files

use crate::error::{ConveyorError, Result};
use serde_json::Value;
use std::path::Path;

/// Read a YAML or JSON template. The document must be a mapping.
pub fn load_template(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_template(&content).map_err(|e| match e {
        ConveyorError::Yaml(e) => ConveyorError::command(format!(
            "Error parsing template {}: {}",
            path.display(),
            e
        )),
        other => other,
    })
}

/// YAML is a superset of JSON, so one parser covers both
pub fn parse_template(content: &str) -> Result<Value> {
    let template: Value = serde_yaml::from_str(content)?;
    if !template.is_object() {
        return Err(ConveyorError::command(
            "The template is not a JSON object or YAML mapping.",
        ));
    }
    Ok(template)
}
