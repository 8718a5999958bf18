//! HTTP interface module.
//!
//! Provides REST endpoints for:
//! - Health check and login
//! - App management (prompt, model, variables, opening, knowledge, tools, workflow)
//! - Dataset management
//! - Public chat via app key

pub mod apps;
pub mod datasets;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod routes;
