//! Clone actions on a plan

use super::resources::ResourceRef;
use super::AzMap;
use crate::api::ConveyorClient;
use crate::error::Result;
use serde_json::{json, Value};

/// What to copy besides the resources themselves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Clone the system volume as well
    pub sys_clone: bool,
    /// Copy volume data as well
    pub copy_data: bool,
}

/// Manage clone actions
pub struct CloneManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> CloneManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    /// Export the template of a clone plan
    pub async fn export_clone_template(&self, plan_id: &str, options: CloneOptions) -> Result<Value> {
        self.action(
            plan_id,
            "export_clone_template",
            json!({ "sys_clone": options.sys_clone, "copy_data": options.copy_data }),
        )
        .await
    }

    /// Clone a plan into the destination zones
    pub async fn clone(
        &self,
        plan_id: &str,
        destination: &AzMap,
        clone_resources: &[ResourceRef],
        options: CloneOptions,
    ) -> Result<Value> {
        tracing::info!("Cloning plan {} to {:?}", plan_id, destination);
        self.action(
            plan_id,
            "clone",
            json!({
                "destination": destination,
                "clone_resources": clone_resources,
                "sys_clone": options.sys_clone,
                "copy_data": options.copy_data,
            }),
        )
        .await
    }

    /// Start a clone from an element template
    pub async fn start_clone_template(
        &self,
        plan_id: &str,
        disable_rollback: bool,
        template: &Value,
    ) -> Result<Value> {
        tracing::info!("Starting clone template for plan {}", plan_id);
        self.action(
            plan_id,
            "clone_element_template",
            json!({
                "disable_rollback": disable_rollback,
                "plan_id": plan_id,
                "template": template,
            }),
        )
        .await
    }

    /// Export the template and clone in a single call
    pub async fn export_template_and_clone(
        &self,
        plan_id: &str,
        destination: &AzMap,
        resources: &Value,
        sys_clone: bool,
    ) -> Result<Value> {
        tracing::info!("Exporting template and cloning plan {}", plan_id);
        self.action(
            plan_id,
            "export_template_and_clone",
            json!({
                "destination": destination,
                "resources": resources,
                "sys_clone": sys_clone,
            }),
        )
        .await
    }

    async fn action(&self, plan_id: &str, action: &str, info: Value) -> Result<Value> {
        self.client.action("clones", plan_id, action, info).await
    }
}
