//! Resource managers
//!
//! One manager per server collection. Each manager borrows the
//! [`ConveyorClient`](crate::api::ConveyorClient), validates the shape of its
//! arguments, builds the JSON body and issues a single HTTP verb.
//!
//! - [`plans`] - Plan CRUD and plan actions
//! - [`resources`] - Cloud resources that can be put in a plan
//! - [`clones`] / [`migrates`] - Clone and migrate actions on a plan
//! - [`configurations`] - Service configuration updates
//! - [`services`] - The `/services` collection
//! - [`update`] - Validation of plan resource update directives

pub mod clones;
pub mod configurations;
pub mod constants;
pub mod migrates;
pub mod plans;
pub mod resources;
pub mod services;
pub mod update;

pub use clones::{CloneManager, CloneOptions};
pub use configurations::ConfigurationManager;
pub use migrates::MigrateManager;
pub use plans::{Plan, PlanListOptions, PlanManager, PlanType};
pub use resources::{Resource, ResourceManager, ResourceRef, ResourceType};
pub use services::{Service, ServiceManager};
pub use update::{process_update_resources, ResourceUpdate, UpdateAction};

use crate::error::{ConveyorError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form list filters, sent as query parameters
pub type SearchOpts = BTreeMap<String, String>;

/// Availability zone mapping, source zone to destination zone
pub type AzMap = BTreeMap<String, String>;

/// Drop filters with empty values
pub(crate) fn active_filters(search_opts: &SearchOpts) -> BTreeMap<String, String> {
    search_opts
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Take the value stored under an envelope key, e.g. `{"plan": {...}}`
pub(crate) fn take_field(mut response: Value, key: &str) -> Result<Value> {
    response
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ConveyorError::MissingField(key.to_string()))
}

/// Deserialize the record stored under an envelope key
pub(crate) fn take_record<T: DeserializeOwned>(response: Value, key: &str) -> Result<T> {
    let value = take_field(response, key)?;
    Ok(serde_json::from_value(value)?)
}
