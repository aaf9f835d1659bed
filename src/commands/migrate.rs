//! Migrate subcommands

use super::parse::parse_destination;
use super::{wait_for_plan, Context};
use crate::output::{self, OutputFormat};
use anyhow::Result;

pub async fn export_template(ctx: &Context, plan_id: &str) -> Result<()> {
    let template = ctx
        .client
        .migrates()
        .export_migrate_template(plan_id)
        .await?;
    output::print_document(&template, ctx.format)
}

pub async fn migrate(ctx: &Context, plan_id: &str, destination: &str, wait: bool) -> Result<()> {
    let destination = parse_destination(destination)?;
    ctx.client.migrates().migrate(plan_id, &destination).await?;

    if wait {
        wait_for_plan(ctx, plan_id, "migrating").await?;
    } else if ctx.format == OutputFormat::Table {
        output::print_info(&format!(
            "Migration of plan {} started; follow it with `conveyor plan-show {}`",
            plan_id, plan_id
        ));
    }
    Ok(())
}
