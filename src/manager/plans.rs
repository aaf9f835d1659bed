//! Plans
//!
//! A plan records which resources are cloned or migrated and tracks the
//! server-side progress of that operation.

use super::constants::{PLAN_SORT_KEY_VALUES, SORT_DIR_VALUES};
use super::resources::ResourceRef;
use super::update::process_update_resources;
use super::{active_filters, take_field, take_record, SearchOpts};
use crate::api::client::{path_segment, query_string};
use crate::api::ConveyorClient;
use crate::error::{ConveyorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Kind of operation a plan describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Clone,
    Migrate,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Migrate => "migrate",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plan as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: String,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub plan_status: Option<String>,
    #[serde(default)]
    pub task_status: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub expired_at: Option<String>,
    #[serde(default)]
    pub clone_resources: Option<Value>,
    /// Every other attribute the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plan {
    /// Look up any attribute by its server-side name
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "plan_id" => Some(Value::from(self.plan_id.as_str())),
            "plan_name" => self.plan_name.clone().map(Value::from),
            "plan_type" => self.plan_type.clone().map(Value::from),
            "plan_status" => self.plan_status.clone().map(Value::from),
            "task_status" => self.task_status.clone().map(Value::from),
            "project_id" => self.project_id.clone().map(Value::from),
            "user_id" => self.user_id.clone().map(Value::from),
            "stack_id" => self.stack_id.clone().map(Value::from),
            "created_at" => self.created_at.clone().map(Value::from),
            "updated_at" => self.updated_at.clone().map(Value::from),
            "expired_at" => self.expired_at.clone().map(Value::from),
            "clone_resources" => self.clone_resources.clone(),
            other => self.extra.get(other).cloned(),
        }
    }

    pub fn status(&self) -> &str {
        self.plan_status.as_deref().unwrap_or("")
    }

    /// Reset this plan's state through its manager
    pub async fn reset_plan_state(&self, plans: &PlanManager<'_>, state: &str) -> Result<()> {
        plans.reset_plan_state(&self.plan_id, state).await
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Plan: {}>", self.plan_id)
    }
}

/// Resource entry of a new plan as the service expects it
#[derive(Debug, Serialize)]
struct PlanResource<'a> {
    obj_type: &'a str,
    obj_id: &'a str,
}

impl<'a> From<&'a ResourceRef> for PlanResource<'a> {
    fn from(r: &'a ResourceRef) -> Self {
        Self {
            obj_type: &r.resource_type,
            obj_id: &r.id,
        }
    }
}

/// Paging, sorting and filtering for [`PlanManager::list`]
#[derive(Debug, Clone, Default)]
pub struct PlanListOptions {
    pub search_opts: SearchOpts,
    /// Last plan id of the previous page
    pub marker: Option<String>,
    /// -1 means no limit
    pub limit: Option<i64>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
}

impl PlanListOptions {
    /// Build the query string, rejecting sort values outside the fixed sets
    pub fn query(&self) -> Result<String> {
        let mut params = active_filters(&self.search_opts);

        if let Some(marker) = self.marker.as_deref().filter(|m| !m.is_empty()) {
            params.insert("marker".to_string(), marker.to_string());
        }

        if let Some(limit) = self.limit.filter(|l| *l != 0 && *l != -1) {
            params.insert("limit".to_string(), limit.to_string());
        }

        if let Some(sort_key) = &self.sort_key {
            if !PLAN_SORT_KEY_VALUES.contains(&sort_key.as_str()) {
                return Err(ConveyorError::InvalidValue(format!(
                    "sort_key must be one of the following: {}.",
                    PLAN_SORT_KEY_VALUES.join(", ")
                )));
            }
            params.insert("sort_key".to_string(), sort_key.clone());
        }

        if let Some(sort_dir) = &self.sort_dir {
            if !SORT_DIR_VALUES.contains(&sort_dir.as_str()) {
                return Err(ConveyorError::InvalidValue(format!(
                    "sort_dir must be one of the following: {}.",
                    SORT_DIR_VALUES.join(", ")
                )));
            }
            params.insert("sort_dir".to_string(), sort_dir.clone());
        }

        Ok(query_string(&params))
    }
}

/// Manage plans
pub struct PlanManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> PlanManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    /// Get a plan by id
    pub async fn get(&self, plan_id: &str) -> Result<Plan> {
        let response = self
            .client
            .get(&format!("/plans/{}", path_segment(plan_id)))
            .await?;
        take_record(response, "plan")
    }

    /// Resolve a plan by id, falling back to an exact name match
    pub async fn find(&self, name_or_id: &str) -> Result<Plan> {
        match self.get(name_or_id).await {
            Ok(plan) => return Ok(plan),
            Err(e) if e.status() == Some(404) => {}
            Err(e) => return Err(e),
        }

        let mut options = PlanListOptions::default();
        options
            .search_opts
            .insert("plan_name".to_string(), name_or_id.to_string());
        let mut matches: Vec<Plan> = self
            .list(&options)
            .await?
            .into_iter()
            .filter(|p| p.plan_name.as_deref() == Some(name_or_id))
            .collect();

        match matches.len() {
            0 => Err(ConveyorError::command(format!(
                "No plan with a name or ID of '{}' exists.",
                name_or_id
            ))),
            1 => Ok(matches.remove(0)),
            _ => Err(ConveyorError::command(format!(
                "Multiple plan matches found for '{}', use an ID to be more specific.",
                name_or_id
            ))),
        }
    }

    /// Delete a plan
    pub async fn delete(&self, plan_id: &str) -> Result<()> {
        tracing::info!("Deleting plan {}", plan_id);
        self.client
            .delete(&format!("/plans/{}", path_segment(plan_id)))
            .await?;
        Ok(())
    }

    /// Update plan attributes. Nothing is sent when `values` is empty.
    pub async fn update(&self, plan_id: &str, values: Map<String, Value>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let body = json!({ "plan": values });
        self.client
            .put(&format!("/plans/{}", path_segment(plan_id)), Some(&body))
            .await?;
        Ok(())
    }

    /// Add, edit or delete resources of a plan
    pub async fn update_plan_resource(
        &self,
        plan_id: &str,
        resources: Vec<Map<String, Value>>,
    ) -> Result<Value> {
        let resources = process_update_resources(resources)?;
        self.action(
            plan_id,
            "update_plan_resources",
            json!({ "resources": resources }),
        )
        .await
    }

    /// List plans with details
    pub async fn list(&self, options: &PlanListOptions) -> Result<Vec<Plan>> {
        let query = options.query()?;
        let response = self.client.get(&format!("/plans/detail{}", query)).await?;
        take_record(response, "plans")
    }

    /// Create a clone or migrate plan from a resource list
    pub async fn create(
        &self,
        plan_type: PlanType,
        resources: &[ResourceRef],
        plan_name: Option<&str>,
    ) -> Result<Plan> {
        if resources.is_empty() {
            return Err(ConveyorError::bad_request("'resources' must be a list."));
        }

        let entries: Vec<PlanResource<'_>> = resources.iter().map(PlanResource::from).collect();
        let body = json!({
            "plan": {
                "type": plan_type,
                "resources": entries,
                "plan_name": plan_name,
            }
        });

        tracing::info!("Creating {} plan with {} resources", plan_type, resources.len());
        let response = self.client.post("/plans", Some(&body)).await?;
        take_record(response, "plan")
    }

    /// Create a plan from a template document
    pub async fn create_plan_by_template(
        &self,
        template: &Value,
        plan_name: Option<&str>,
    ) -> Result<Plan> {
        let mut plan = Map::new();
        plan.insert("template".to_string(), template.clone());
        if let Some(name) = plan_name {
            plan.insert("plan_name".to_string(), Value::from(name));
        }

        let body = json!({ "plan": plan });
        let response = self
            .client
            .post("/plans/create_plan_by_template", Some(&body))
            .await?;
        take_record(response, "plan")
    }

    /// Download the template generated for a plan
    pub async fn download_template(&self, plan_id: &str) -> Result<Value> {
        self.action(plan_id, "download_template", Value::Null).await
    }

    pub async fn reset_plan_state(&self, plan_id: &str, state: &str) -> Result<()> {
        tracing::info!("Resetting plan {} to {}", plan_id, state);
        self.action(plan_id, "os-reset_state", json!({ "plan_status": state }))
            .await?;
        Ok(())
    }

    pub async fn force_delete_plan(&self, plan_id: &str) -> Result<()> {
        tracing::info!("Force deleting plan {}", plan_id);
        self.action(plan_id, "force_delete-plan", json!({ "plan_id": plan_id }))
            .await?;
        Ok(())
    }

    /// Details of one resource inside a plan, original or updated view
    pub async fn get_resource_detail_from_plan(
        &self,
        resource_id: &str,
        plan_id: &str,
        is_original: bool,
    ) -> Result<Value> {
        let response = self
            .action(
                resource_id,
                "get_resource_detail_from_plan",
                json!({ "plan_id": plan_id, "is_original": is_original }),
            )
            .await?;
        take_field(response, "resource")
    }

    async fn action(&self, id: &str, action: &str, info: Value) -> Result<Value> {
        self.client.action("plans", id, action, info).await
    }
}
