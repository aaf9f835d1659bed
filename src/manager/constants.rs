//! Fixed enumerations accepted by the plan list endpoint

pub const SORT_DIR_VALUES: &[&str] = &["asc", "desc"];

pub const PLAN_SORT_KEY_VALUES: &[&str] = &[
    "plan_id",
    "plan_name",
    "plan_status",
    "plan_type",
    "user_id",
    "project_id",
    "created_at",
    "expired_at",
    "task_status",
];

/// Plan states the service may report or accept on reset
pub const PLAN_STATUS_VALUES: &[&str] = &[
    "creating",
    "available",
    "cloning",
    "migrating",
    "finished",
    "deleting",
    "error_deleting",
    "expired",
    "error",
];
