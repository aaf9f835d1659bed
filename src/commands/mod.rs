//! CLI command handlers
//!
//! Each subcommand parses its arguments (failing before any request on bad
//! input), calls one or more managers and prints the result in the selected
//! output format.

pub mod batch;
mod clone;
mod configs;
mod migrate;
pub mod parse;
mod plan;
mod resource;
mod service;
pub mod template;

use crate::api::ConveyorClient;
use crate::cli::Command;
use crate::error::ConveyorError;
use crate::output::OutputFormat;
use crate::poll::{self, PollOutcome, StatusSnapshot};
use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Everything a handler needs besides its own arguments
pub struct Context {
    pub client: ConveyorClient,
    pub format: OutputFormat,
    pub poll_interval: Duration,
}

/// Run a parsed subcommand
pub async fn run(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::PlanCreate {
            resources,
            plan_type,
            plan_name,
            template_file,
        } => {
            plan::create(
                ctx,
                &resources,
                plan_type,
                plan_name.as_deref(),
                template_file.as_deref(),
            )
            .await
        }
        Command::PlanList {
            plan_name,
            plan_status,
            plan_type,
            all_tenants,
            sort_key,
            sort_dir,
            marker,
            limit,
        } => {
            let filters = plan::ListFilters {
                plan_name,
                plan_status,
                plan_type,
                all_tenants,
            };
            let paging = crate::manager::PlanListOptions {
                marker,
                limit,
                sort_key,
                sort_dir,
                ..Default::default()
            };
            plan::list(ctx, filters, paging).await
        }
        Command::PlanShow { plan } => plan::show(ctx, &plan).await,
        Command::PlanDelete { plans } => plan::delete(ctx, &plans).await,
        Command::PlanForceDelete { plans } => plan::force_delete(ctx, &plans).await,
        Command::PlanUpdate { plan, attributes } => plan::update(ctx, &plan, &attributes).await,
        Command::PlanResourceUpdate { plan, resources } => {
            plan::resource_update(ctx, &plan, &resources).await
        }
        Command::PlanResourceShow {
            plan,
            resource_id,
            original,
        } => plan::resource_show(ctx, &plan, &resource_id, original).await,
        Command::PlanDownloadTemplate { plan } => plan::download_template(ctx, &plan).await,
        Command::ResetPlanState { plans, state } => plan::reset_state(ctx, &plans, &state).await,
        Command::ExportCloneTemplate {
            plan,
            sys_clone,
            copy_data,
        } => clone::export_template(ctx, &plan, sys_clone, copy_data).await,
        Command::Clone {
            plan,
            destination,
            clone_resources,
            sys_clone,
            copy_data,
            wait,
        } => {
            let options = crate::manager::CloneOptions {
                sys_clone,
                copy_data,
            };
            clone::clone(ctx, &plan, &destination, &clone_resources, options, wait).await
        }
        Command::CloneTemplate {
            plan,
            template_file,
            disable_rollback,
        } => clone::clone_template(ctx, &plan, &template_file, disable_rollback).await,
        Command::ExportMigrateTemplate { plan } => migrate::export_template(ctx, &plan).await,
        Command::Migrate {
            plan,
            destination,
            wait,
        } => migrate::migrate(ctx, &plan, &destination, wait).await,
        Command::ResourceTypeList => resource::type_list(ctx).await,
        Command::ResourceList {
            resource_type,
            name,
            all_tenants,
        } => resource::list(ctx, &resource_type, name.as_deref(), all_tenants).await,
        Command::ResourceShow { resource_type, id } => {
            resource::show(ctx, &resource_type, &id).await
        }
        Command::ShowResourceTopo { plan_id, az_map } => {
            resource::show_topo(ctx, &plan_id, &az_map).await
        }
        Command::ListPlanZone { plan_id } => resource::list_plan_zone(ctx, &plan_id).await,
        Command::DeleteClonedResources { plan_id } => {
            resource::delete_cloned(ctx, &plan_id).await
        }
        Command::AvailabilityZoneList => resource::availability_zones(ctx).await,
        Command::UpdateConfigs { properties } => configs::update(ctx, &properties).await,
        Command::ServiceList { no_detail, filters } => {
            service::list(ctx, !no_detail, &filters).await
        }
        Command::ServiceShow { id } => service::show(ctx, &id).await,
        Command::ServiceDelete { id } => service::delete(ctx, &id).await,
        Command::ServiceUpdate { id, attributes } => {
            service::update(ctx, &id, &attributes).await
        }
    }
}

/// Status line for commands that return no data, table output only
fn notify(ctx: &Context, message: &str) {
    if ctx.format == OutputFormat::Table {
        crate::output::print_success(message);
    }
}

/// Serialize a record into a table row
fn to_row<T: Serialize>(item: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

/// `["k=v"]` into a map of string values
fn string_attributes(items: &[String]) -> Result<Map<String, Value>> {
    Ok(parse::args_array_to_dict(items)?
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect())
}

/// Block until the plan finishes `action`, printing progress
async fn wait_for_plan(ctx: &Context, plan_id: &str, action: &str) -> Result<()> {
    let plans = ctx.client.plans();
    let outcome = poll::poll_for_status(
        |id| {
            let plans = &plans;
            async move {
                let plan = plans.get(&id).await?;
                Ok::<_, ConveyorError>(StatusSnapshot {
                    status: plan.status().to_string(),
                    progress: plan.get("progress").and_then(|v| v.as_u64()),
                })
            }
        },
        plan_id,
        action,
        &["finished"],
        ctx.poll_interval,
        true,
        &mut std::io::stdout(),
    )
    .await?;

    match outcome {
        PollOutcome::Finished => Ok(()),
        PollOutcome::Errored => {
            Err(ConveyorError::command(format!("Plan {} ended in error", plan_id)).into())
        }
    }
}
