//! Clone subcommands

use super::parse::{extract_resource_argument, parse_destination};
use super::{resource, template, wait_for_plan, Context};
use crate::manager::CloneOptions;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use std::path::Path;

pub async fn export_template(
    ctx: &Context,
    plan_id: &str,
    sys_clone: bool,
    copy_data: bool,
) -> Result<()> {
    let options = CloneOptions {
        sys_clone,
        copy_data,
    };
    let template = ctx
        .client
        .clones()
        .export_clone_template(plan_id, options)
        .await?;
    output::print_document(&template, ctx.format)
}

pub async fn clone(
    ctx: &Context,
    plan_id: &str,
    destination: &str,
    clone_resources: &[String],
    options: CloneOptions,
    wait: bool,
) -> Result<()> {
    let destination = parse_destination(destination)?;

    let clone_resources = if clone_resources.is_empty() {
        Vec::new()
    } else {
        let known = resource::known_types(&ctx.client).await?;
        extract_resource_argument(clone_resources, &known)?
    };

    ctx.client
        .clones()
        .clone(plan_id, &destination, &clone_resources, options)
        .await?;

    if wait {
        wait_for_plan(ctx, plan_id, "cloning").await?;
    } else if ctx.format == OutputFormat::Table {
        output::print_info(&format!(
            "Clone of plan {} started; follow it with `conveyor plan-show {}`",
            plan_id, plan_id
        ));
    }
    Ok(())
}

pub async fn clone_template(
    ctx: &Context,
    plan_id: &str,
    template_file: &Path,
    disable_rollback: bool,
) -> Result<()> {
    let template = template::load_template(template_file)?;
    let response = ctx
        .client
        .clones()
        .start_clone_template(plan_id, disable_rollback, &template)
        .await?;

    if !response.is_null() {
        output::print_document(&response, ctx.format)?;
    }
    Ok(())
}
