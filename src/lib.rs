//! Client library and CLI for the conveyor clone and migrate service
//!
//! - [`api`] - Session headers, HTTP transport and the [`ConveyorClient`](api::ConveyorClient)
//! - [`manager`] - One manager per server collection (plans, resources, ...)
//! - [`poll`] - Blocking status polling for long-running plan actions
//! - [`commands`] / [`cli`] - The `conveyor` command line
//! - [`output`] - Table, JSON and YAML rendering

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod manager;
pub mod output;
pub mod poll;

pub use error::{ConveyorError, Result};
