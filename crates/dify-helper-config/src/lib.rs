//! # dify-helper Config
//!
//! Configuration management for the dify-helper client and server.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_BASE_URL, ENV_PORT};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
