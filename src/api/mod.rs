//! Conveyor API interaction module
//!
//! This module provides the transport side of the client: the session headers,
//! the HTTP wrapper and the client that managers issue requests through.
//!
//! # Module Structure
//!
//! - [`session`] - Pre-issued token and project forwarded on every request
//! - [`client`] - Main conveyor client and manager accessors
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use conveyor_client::api::{ConveyorClient, Session};
//!
//! async fn example() -> conveyor_client::Result<()> {
//!     let client = ConveyorClient::new("http://conveyor:9999/v1/my-project", Session::default())?;
//!     let plans = client.plans().list(&Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod session;

pub use client::ConveyorClient;
pub use http::format_api_error;
pub use session::Session;
