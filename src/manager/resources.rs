//! Resources
//!
//! Cloud objects (servers, volumes, networks, ...) that can be put in a plan,
//! plus the resource-level actions used to plan a clone.

use super::{active_filters, take_field, take_record, AzMap, SearchOpts};
use crate::api::client::query_string;
use crate::api::ConveyorClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Type-tagged reference to a cloud object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl ResourceRef {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            name: None,
            zone: None,
        }
    }
}

/// Resource as returned by the server.
///
/// The attribute set depends on the resource type, so everything is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Resource {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    fn str_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.str_attr("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attr("name")
    }

    pub fn zone_name(&self) -> Option<&str> {
        self.str_attr("zoneName")
    }

    /// Name, else id, else zone name
    pub fn label(&self) -> Option<&str> {
        self.name().or_else(|| self.id()).or_else(|| self.zone_name())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "<Resource: {}>", label),
            None => f.write_str("<Resource>"),
        }
    }
}

/// A resource type that can be cloned or migrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Manage resources
pub struct ResourceManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> ResourceManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    /// Details of a single resource of the given type
    pub async fn get_resource_detail(&self, resource_type: &str, resource_id: &str) -> Result<Value> {
        let response = self
            .action(
                resource_id,
                "get_resource_detail",
                json!({ "type": resource_type }),
            )
            .await?;
        take_field(response, "resource")
    }

    /// List resources. `search_opts` must carry a `type`.
    pub async fn list(&self, search_opts: &SearchOpts) -> Result<Vec<Resource>> {
        let query = query_string(&active_filters(search_opts));
        let response = self
            .client
            .get(&format!("/resources/detail{}", query))
            .await?;
        take_record(response, "resources")
    }

    /// Types of resources which can be cloned or migrated
    pub async fn resource_type_list(&self) -> Result<Vec<ResourceType>> {
        let response = self.client.get("/resources/types").await?;
        take_record(response, "types")
    }

    /// Build the dependency topology of a plan's resources
    pub async fn build_resources_topo(
        &self,
        plan_id: &str,
        az_map: &AzMap,
        search_opt: Option<&Value>,
    ) -> Result<Value> {
        let response = self
            .action(
                plan_id,
                "build-resources_topo",
                json!({
                    "plan_id": plan_id,
                    "availability_zone_map": az_map,
                    "search_opt": search_opt,
                }),
            )
            .await?;
        take_field(response, "topo")
    }

    /// Values of one attribute across the resources of a plan
    pub async fn list_clone_resources_attribute(
        &self,
        plan_id: &str,
        attribute_name: &str,
    ) -> Result<Value> {
        let response = self
            .action(
                plan_id,
                "list-clone_resources_attribute",
                json!({ "plan_id": plan_id, "attribute_name": attribute_name }),
            )
            .await?;
        take_field(response, "attribute_list")
    }

    pub async fn list_all_availability_zones(&self) -> Result<Value> {
        // The action is not tied to a resource; any id routes it.
        let id = uuid::Uuid::new_v4().to_string();
        let response = self
            .action(&id, "list-all_availability_zones", json!({}))
            .await?;
        take_field(response, "availability_zone_list")
    }

    /// Remove the resources a finished clone created
    pub async fn delete_cloned_resources(&self, plan_id: &str) -> Result<()> {
        tracing::info!("Deleting cloned resources of plan {}", plan_id);
        self.action(
            plan_id,
            "delete-cloned_resources",
            json!({ "plan_id": plan_id }),
        )
        .await?;
        Ok(())
    }

    async fn action(&self, id: &str, action: &str, info: Value) -> Result<Value> {
        self.client.action("resources", id, action, info).await
    }
}
