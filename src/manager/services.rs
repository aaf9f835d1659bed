//! The `/services` collection

use super::{active_filters, take_record, SearchOpts};
use crate::api::client::{path_segment, query_string};
use crate::api::ConveyorClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Service record as returned by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Service {
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").and_then(|v| v.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Service: {}>", self.id().unwrap_or("-"))
    }
}

pub struct ServiceManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> ServiceManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Service> {
        let response = self
            .client
            .get(&format!("/services/{}", path_segment(id)))
            .await?;
        take_record(response, "resource")
    }

    pub async fn list(&self, detailed: bool, search_opts: &SearchOpts) -> Result<Vec<Service>> {
        let detail = if detailed { "/detail" } else { "" };
        let query = query_string(&active_filters(search_opts));
        let response = self
            .client
            .get(&format!("/services{}{}", detail, query))
            .await?;
        take_record(response, "resources")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting service {}", id);
        self.client
            .delete(&format!("/services/{}", path_segment(id)))
            .await?;
        Ok(())
    }

    /// Update attributes. Nothing is sent when `values` is empty.
    pub async fn update(&self, id: &str, values: Map<String, Value>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let body = json!({ "volume": values });
        self.client
            .put(&format!("/services/{}", path_segment(id)), Some(&body))
            .await?;
        Ok(())
    }
}
