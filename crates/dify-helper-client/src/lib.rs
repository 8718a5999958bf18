//! Client for the Dify console API.
//!
//! [`Session`] owns the bearer token: it logs in once and attaches the
//! token to every later call. [`DifyClient`] layers one method per remote
//! operation on top of it.

mod apps;
mod client;
mod datasets;
mod error;
mod models;
mod public;
mod session;

pub use client::DifyClient;
pub use error::ClientError;
pub use models::{
    AgentMode, AgentTool, AppMode, AppParameters, ChatRequest, CompletionParams, CreateApp,
    CreateDataset, DatasetLink, Entry, InputVariable, LinkDatasets, ModelConfig, ModelSettings,
    Nullable, PromptParams, RenameApp, RetrievalMode, VariableType,
};
pub use session::Session;
