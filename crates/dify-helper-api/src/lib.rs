//! # dify-helper API
//!
//! HTTP front end for the Dify console API.
//!
//! ```text
//!   caller ──HTTP──▶ router ──▶ session gate ──▶ handler ──▶ DifyClient ──HTTP──▶ remote
//!                       │
//!                       └── /health, /login, /chat (no session needed)
//! ```
//!
//! A single session slot lives in [`AppState`]. `POST /login` fills it,
//! every other console route is rejected with 401 until it is filled.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
