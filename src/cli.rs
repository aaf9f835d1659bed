//! Command line definition

use crate::api::session::{PROJECT_ID_ENV, TOKEN_ENV};
use crate::manager::PlanType;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Command-line client for the conveyor clone and migrate service
#[derive(Parser, Debug)]
#[command(name = "conveyor", version, about, long_about = None)]
pub struct Cli {
    /// Conveyor API endpoint, e.g. http://controller:9999/v1
    #[arg(long, env = "CONVEYOR_URL", global = true)]
    pub os_url: Option<String>,

    /// Authentication token
    #[arg(long, env = TOKEN_ENV, global = true, hide_env_values = true)]
    pub os_token: Option<String>,

    /// Project (tenant) id
    #[arg(long, env = PROJECT_ID_ENV, global = true)]
    pub os_project_id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a plan
    PlanCreate {
        /// Resource to clone or migrate; repeat for several.
        /// Get the types with `conveyor resource-type-list`.
        #[arg(long = "resources", value_name = "obj_type=TYPE,obj_id=ID")]
        resources: Vec<String>,

        #[arg(long, value_enum)]
        plan_type: Option<PlanType>,

        #[arg(long)]
        plan_name: Option<String>,

        /// Path to a plan template (YAML or JSON)
        #[arg(short = 'f', long, value_name = "FILE")]
        template_file: Option<PathBuf>,
    },

    /// List plans
    PlanList {
        #[arg(long)]
        plan_name: Option<String>,

        #[arg(long)]
        plan_status: Option<String>,

        #[arg(long, value_enum)]
        plan_type: Option<PlanType>,

        /// Show plans of all tenants. Admin only.
        #[arg(
            long = "all-tenants",
            alias = "all_tenants",
            value_name = "0|1",
            num_args = 0..=1,
            default_value_t = 0,
            default_missing_value = "1"
        )]
        all_tenants: u8,

        /// One of plan_id, plan_name, plan_status, plan_type, user_id,
        /// project_id, created_at, expired_at, task_status
        #[arg(long)]
        sort_key: Option<String>,

        /// asc or desc
        #[arg(long)]
        sort_dir: Option<String>,

        /// Last plan id of the previous page
        #[arg(long)]
        marker: Option<String>,

        /// Maximum number of plans; -1 shows all
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Show plan details
    PlanShow {
        /// UUID of the plan
        plan: String,
    },

    /// Delete plans
    PlanDelete {
        #[arg(value_name = "PLAN", required = true)]
        plans: Vec<String>,
    },

    /// Delete plans regardless of their state
    PlanForceDelete {
        #[arg(value_name = "PLAN", required = true)]
        plans: Vec<String>,
    },

    /// Update plan attributes
    PlanUpdate {
        plan: String,

        #[arg(value_name = "KEY=VALUE", required = true)]
        attributes: Vec<String>,
    },

    /// Add, edit or delete resources of a plan
    PlanResourceUpdate {
        plan: String,

        /// e.g. action=edit,resource_id=server_0,name=web; repeat for several
        #[arg(long = "resource", value_name = "KEY=VALUE,...")]
        resources: Vec<String>,
    },

    /// Show a resource inside a plan
    PlanResourceShow {
        plan: String,

        resource_id: String,

        /// Show the resource as it was before any plan update
        #[arg(long)]
        original: bool,
    },

    /// Download the template generated for a plan
    PlanDownloadTemplate { plan: String },

    /// Explicitly set the state of plans
    ResetPlanState {
        /// Name or ID of each plan
        #[arg(value_name = "PLAN", required = true)]
        plans: Vec<String>,

        /// creating, available, cloning, migrating, finished, deleting,
        /// error_deleting, expired or error
        #[arg(long, default_value = "available")]
        state: String,
    },

    /// Export the template of a clone plan
    ExportCloneTemplate {
        plan: String,

        /// Clone the system volume as well
        #[arg(long)]
        sys_clone: bool,

        /// Copy the volume data as well
        #[arg(long)]
        copy_data: bool,
    },

    /// Clone the resources of a plan
    Clone {
        plan: String,

        /// <src_az>:<dst_az>[,<src_az>:<dst_az>]
        destination: String,

        /// Resource to clone; repeat for several
        #[arg(long, alias = "clone_resources", value_name = "type=TYPE,id=ID")]
        clone_resources: Vec<String>,

        #[arg(long)]
        sys_clone: bool,

        #[arg(long)]
        copy_data: bool,

        /// Poll the plan until the clone finishes
        #[arg(long)]
        wait: bool,
    },

    /// Start a clone from an element template file
    CloneTemplate {
        plan: String,

        #[arg(short = 'f', long, value_name = "FILE")]
        template_file: PathBuf,

        #[arg(long)]
        disable_rollback: bool,
    },

    /// Export the template of a migrate plan
    ExportMigrateTemplate { plan: String },

    /// Migrate the resources of a plan
    Migrate {
        plan: String,

        /// <src_az>:<dst_az>[,<src_az>:<dst_az>]
        destination: String,

        /// Poll the plan until the migration finishes
        #[arg(long)]
        wait: bool,
    },

    /// Types of resources which can be cloned or migrated
    ResourceTypeList,

    /// List resources of a type
    ResourceList {
        /// e.g. OS::Nova::Server
        #[arg(value_name = "TYPE")]
        resource_type: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(
            long = "all-tenants",
            alias = "all_tenants",
            value_name = "0|1",
            num_args = 0..=1,
            default_value_t = 0,
            default_missing_value = "1"
        )]
        all_tenants: u8,
    },

    /// Show a resource
    ResourceShow {
        #[arg(value_name = "TYPE")]
        resource_type: String,

        id: String,
    },

    /// Show the dependency topology of a plan's resources
    ShowResourceTopo {
        plan_id: String,

        /// <src_az>=<dst_az>
        az_map: String,
    },

    /// List the availability zones of a plan's resources
    ListPlanZone { plan_id: String },

    /// Delete the resources created by a clone
    DeleteClonedResources { plan_id: String },

    /// List all availability zones
    AvailabilityZoneList,

    /// Update the configuration of the conveyor service
    UpdateConfigs {
        /// e.g. DEFAULT=debug:true; config-file=<path> picks the file
        #[arg(short = 'p', long = "properties", value_name = "KEY=VALUE")]
        properties: Vec<String>,
    },

    /// List services
    ServiceList {
        /// Skip the detailed view
        #[arg(long)]
        no_detail: bool,

        /// Filter, repeat for several
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },

    /// Show a service
    ServiceShow { id: String },

    /// Delete a service
    ServiceDelete { id: String },

    /// Update service attributes
    ServiceUpdate {
        id: String,

        #[arg(value_name = "KEY=VALUE", required = true)]
        attributes: Vec<String>,
    },
}
