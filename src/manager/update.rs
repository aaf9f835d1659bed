//! Plan resource update directives
//!
//! A plan's resource set is edited by posting a list of directives, each a
//! flat map carrying an `action` key. The shape of every directive is checked
//! here before anything goes over the wire.

use crate::error::{ConveyorError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

pub const ALLOWED_ACTIONS: &[&str] = &["add", "edit", "delete"];

/// What a directive does to the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Put a new resource in the plan
    Add,
    /// Change fields of a resource already in the plan
    Edit,
    /// Remove a resource from the plan
    Delete,
}

impl UpdateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// One validated entry of an `update_plan_resources` request.
///
/// The directive keeps every key it was built from, with the values the
/// caller gave.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUpdate {
    action: UpdateAction,
    attrs: Map<String, Value>,
}

impl ResourceUpdate {
    pub fn action(&self) -> UpdateAction {
        self.action
    }

    pub fn attrs(&self) -> &Map<String, Value> {
        &self.attrs
    }

    /// Wire form of the directive. `user_data` is sent base64-encoded.
    pub fn into_value(self) -> Value {
        let mut attrs = self.attrs;
        if let Some(Value::String(user_data)) = attrs.get_mut("user_data") {
            if !user_data.is_empty() {
                *user_data = STANDARD.encode(user_data.as_bytes());
            }
        }
        Value::Object(attrs)
    }
}

impl TryFrom<Map<String, Value>> for ResourceUpdate {
    type Error = ConveyorError;

    fn try_from(attrs: Map<String, Value>) -> Result<Self> {
        let action = match attrs.get("action").and_then(|a| a.as_str()) {
            Some("add") => UpdateAction::Add,
            Some("edit") => UpdateAction::Edit,
            Some("delete") => UpdateAction::Delete,
            _ => {
                return Err(ConveyorError::bad_request(format!(
                    "'action' not found or not supported. 'action' must be one of [{}]",
                    ALLOWED_ACTIONS.join(", ")
                )))
            }
        };

        match action {
            UpdateAction::Add => {
                if !attrs.contains_key("id") || !attrs.contains_key("resource_type") {
                    return Err(ConveyorError::bad_request(
                        "'id' and 'resource_type' of new resource must be provided \
                         when adding a new resource.",
                    ));
                }
            }
            UpdateAction::Edit => {
                // action and resource_id plus at least one field to change
                if !attrs.contains_key("resource_id") || attrs.len() < 3 {
                    return Err(ConveyorError::bad_request(
                        "'resource_id' and the fields to be edited must be provided \
                         when editing resources.",
                    ));
                }
            }
            UpdateAction::Delete => {
                if !attrs.contains_key("resource_id") {
                    return Err(ConveyorError::bad_request(
                        "'resource_id' must be provided when deleting resources.",
                    ));
                }
            }
        }

        Ok(Self { action, attrs })
    }
}

/// Validate raw directives and produce the request payload.
///
/// Fails on the first malformed entry; nothing is returned for partial input.
pub fn process_update_resources(resources: Vec<Map<String, Value>>) -> Result<Vec<Value>> {
    if resources.is_empty() {
        return Err(ConveyorError::bad_request("'resources' must be a list."));
    }

    resources
        .into_iter()
        .map(|attrs| ResourceUpdate::try_from(attrs).map(ResourceUpdate::into_value))
        .collect()
}
