//! Plan subcommands

use super::batch::run_batch;
use super::parse::{
    effective_all_tenants, extract_plan_resource_update_args, extract_resource_argument,
    require_uuid,
};
use super::{notify, resource, string_attributes, template, to_row, Context};
use crate::error::ConveyorError;
use crate::manager::constants::PLAN_STATUS_VALUES;
use crate::manager::{Plan, PlanListOptions, PlanType, SearchOpts};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use serde_json::json;
use std::path::Path;

const LIST_COLUMNS: &[&str] = &[
    "plan_id",
    "plan_name",
    "plan_type",
    "plan_status",
    "task_status",
    "created_at",
];

/// Filters of `plan-list`
pub struct ListFilters {
    pub plan_name: Option<String>,
    pub plan_status: Option<String>,
    pub plan_type: Option<PlanType>,
    pub all_tenants: u8,
}

fn print_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    let summary = json!({
        "plan_id": plan.plan_id,
        "plan_name": plan.plan_name,
        "plan_type": plan.plan_type,
        "plan_status": plan.plan_status,
        "task_status": plan.task_status,
        "created_at": plan.created_at,
        "updated_at": plan.updated_at,
        "project_id": plan.project_id,
        "user_id": plan.user_id,
        "stack_id": plan.stack_id,
        "clone_obj": plan.clone_resources,
    });

    if format == OutputFormat::Table {
        println!("{}:", plan.plan_id);
    }
    output::print_document(&summary, format)
}

pub async fn create(
    ctx: &Context,
    resources: &[String],
    plan_type: Option<PlanType>,
    plan_name: Option<&str>,
    template_file: Option<&Path>,
) -> Result<()> {
    let plans = ctx.client.plans();

    let plan = match (plan_type, template_file) {
        (Some(plan_type), _) if !resources.is_empty() => {
            let known = resource::known_types(&ctx.client).await?;
            let resources = extract_resource_argument(resources, &known)?;
            plans.create(plan_type, &resources, plan_name).await?
        }
        (_, Some(path)) => {
            let template = template::load_template(path)?;
            let created = plans.create_plan_by_template(&template, plan_name).await?;
            plans.get(&created.plan_id).await?
        }
        _ => {
            return Err(ConveyorError::command(
                "template file or (type, resources) argument is required!",
            )
            .into())
        }
    };

    print_plan(&plan, ctx.format)
}

pub async fn list(ctx: &Context, filters: ListFilters, mut paging: PlanListOptions) -> Result<()> {
    let all_tenants = effective_all_tenants(filters.all_tenants)?;

    let mut search_opts = SearchOpts::new();
    if all_tenants != 0 {
        search_opts.insert("all_tenants".to_string(), all_tenants.to_string());
    }
    if let Some(name) = filters.plan_name {
        search_opts.insert("plan_name".to_string(), name);
    }
    if let Some(plan_type) = filters.plan_type {
        search_opts.insert("plan_type".to_string(), plan_type.to_string());
    }
    if let Some(status) = filters.plan_status {
        search_opts.insert("plan_status".to_string(), status);
    }
    paging.search_opts = search_opts;

    let plans = ctx.client.plans().list(&paging).await?;
    let rows = plans.iter().map(to_row).collect::<Result<Vec<_>>>()?;

    let mut columns = LIST_COLUMNS.to_vec();
    if all_tenants != 0 {
        columns.push("project_id");
    }
    output::print_list(&rows, &columns, ctx.format)
}

pub async fn show(ctx: &Context, plan_id: &str) -> Result<()> {
    require_uuid(plan_id, "plan")?;
    let plan = ctx.client.plans().get(plan_id).await?;
    print_plan(&plan, ctx.format)
}

pub async fn delete(ctx: &Context, ids: &[String]) -> Result<()> {
    let plans = ctx.client.plans();
    let report = run_batch(ids, "Delete", |id| {
        let plans = &plans;
        async move {
            require_uuid(id, "plan")?;
            plans.delete(id).await
        }
    })
    .await;
    report.ensure_any_succeeded("Unable to delete any of specified plans.")?;
    notify(ctx, &format!("Deleted {} of {} plan(s)", report.succeeded(), report.total));
    Ok(())
}

pub async fn force_delete(ctx: &Context, ids: &[String]) -> Result<()> {
    let plans = ctx.client.plans();
    let report = run_batch(ids, "Force delete", |id| {
        let plans = &plans;
        async move {
            require_uuid(id, "plan")?;
            plans.force_delete_plan(id).await
        }
    })
    .await;
    report.ensure_any_succeeded("Unable to force delete any of specified plans.")?;
    notify(
        ctx,
        &format!("Force deleted {} of {} plan(s)", report.succeeded(), report.total),
    );
    Ok(())
}

pub async fn update(ctx: &Context, plan_id: &str, attributes: &[String]) -> Result<()> {
    let values = string_attributes(attributes)?;
    ctx.client.plans().update(plan_id, values).await?;
    notify(ctx, &format!("Updated plan {}", plan_id));
    Ok(())
}

pub async fn resource_update(ctx: &Context, plan_id: &str, args: &[String]) -> Result<()> {
    let resources = extract_plan_resource_update_args(args)?;
    ctx.client
        .plans()
        .update_plan_resource(plan_id, resources)
        .await?;
    notify(ctx, &format!("Updated resources of plan {}", plan_id));
    Ok(())
}

pub async fn resource_show(
    ctx: &Context,
    plan_id: &str,
    resource_id: &str,
    original: bool,
) -> Result<()> {
    let resource = ctx
        .client
        .plans()
        .get_resource_detail_from_plan(resource_id, plan_id, original)
        .await?;
    output::print_document(&resource, ctx.format)
}

pub async fn download_template(ctx: &Context, plan_id: &str) -> Result<()> {
    let template = ctx.client.plans().download_template(plan_id).await?;
    output::print_document(&template, ctx.format)
}

pub async fn reset_state(ctx: &Context, ids: &[String], state: &str) -> Result<()> {
    if !PLAN_STATUS_VALUES.contains(&state) {
        tracing::warn!("Resetting plans to unknown state '{}'", state);
        output::print_warning(&format!(
            "'{}' is not one of {}",
            state,
            PLAN_STATUS_VALUES.join(", ")
        ));
    }

    let plans = ctx.client.plans();
    let report = run_batch(ids, "Reset state", |id| {
        let plans = &plans;
        async move {
            let plan = plans.find(id).await?;
            plan.reset_plan_state(plans, state).await
        }
    })
    .await;
    report.ensure_all_succeeded("Unable to reset the state for the specified plan(s).")?;
    notify(ctx, &format!("Reset {} plan(s) to {}", report.total, state));
    Ok(())
}
