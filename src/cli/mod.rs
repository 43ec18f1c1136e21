//! Command-line interface module.
//!
//! This module provides the CLI surface for:
//! - Deploying packaged model artifacts to the serving store
//! - Updating, deleting and inspecting existing deployments
//! - Listing every deployed key

pub mod commands;
pub mod handlers;

pub use commands::Commands;
pub use handlers::handle_command;
