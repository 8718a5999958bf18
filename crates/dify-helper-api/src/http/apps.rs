//! App handlers.
//!
//! - GET    /apps                            - List apps
//! - POST   /apps                            - Create app
//! - GET    /apps/{app_id}                   - App detail
//! - PUT    /apps/{app_id}                   - Rename app
//! - DELETE /apps/{app_id}                   - Delete app
//! - PUT    /apps/{app_id}/prompt            - Replace prompt
//! - PUT    /apps/{app_id}/model             - Replace model settings
//! - GET    /apps/{app_id}/model-config      - Model configuration
//! - GET    /apps/{app_id}/parameters        - App parameters
//! - POST   /apps/{app_id}/variables         - Add input variable
//! - PUT    /apps/{app_id}/opening           - Opening statement
//! - POST   /apps/{app_id}/knowledge         - Link dataset
//! - POST   /apps/{app_id}/tools             - Add agent tool
//! - GET    /apps/{app_id}/workflow          - Draft workflow
//! - PUT    /apps/{app_id}/workflow          - Replace draft workflow
//! - POST   /apps/{app_id}/workflow/publish  - Publish workflow

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use dify_helper_client::{
    AgentTool, AppMode, CreateApp, DifyClient, InputVariable, ModelSettings, RenameApp,
    RetrievalMode, VariableType,
};

use crate::error::ApiError;
use crate::http::extract::{required, JsonBody};

type SessionClient = Extension<Arc<DifyClient>>;
type ApiResult<T = Json<Value>> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CreateAppBody {
    pub name: Option<String>,
    pub mode: Option<AppMode>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameAppBody {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptBody {
    pub prompt: Option<String>,
    pub mode: Option<AppMode>,
}

#[derive(Debug, Deserialize)]
pub struct ModelBody {
    pub model_name: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct VariableBody {
    pub variable_name: Option<String>,
    pub variable_type: Option<VariableType>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub max_length: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OpeningBody {
    pub opening_statement: Option<String>,
    pub suggested_questions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct KnowledgeBody {
    pub dataset_id: Option<String>,
    pub retrieval_model: Option<RetrievalMode>,
}

#[derive(Debug, Deserialize)]
pub struct ToolBody {
    pub tool_name: Option<String>,
    pub tool_config: Option<Value>,
}

pub async fn list_apps(Extension(client): SessionClient) -> ApiResult {
    Ok(Json(client.get_apps().await?))
}

pub async fn get_app(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.get_app_detail(&app_id).await?))
}

pub async fn create_app(
    Extension(client): SessionClient,
    JsonBody(body): JsonBody<CreateAppBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut app = CreateApp::new(required(body.name, "name")?)
        .with_mode(body.mode.unwrap_or_default());
    if let Some(icon) = body.icon {
        app = app.with_icon(icon);
    }
    if let Some(description) = body.description {
        app = app.with_description(description);
    }

    let created = client.create_app(&app).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn rename_app(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<RenameAppBody>,
) -> ApiResult {
    let rename = RenameApp::new(required(body.name, "name")?)
        .with_icon(body.icon)
        .with_description(body.description);
    Ok(Json(client.rename_app(&app_id, &rename).await?))
}

pub async fn delete_app(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.delete_app(&app_id).await?))
}

pub async fn update_prompt(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<PromptBody>,
) -> ApiResult {
    let prompt = required(body.prompt, "prompt")?;
    let mode = body.mode.unwrap_or_default();
    Ok(Json(client.update_prompt(&app_id, &prompt, mode).await?))
}

pub async fn update_model(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<ModelBody>,
) -> ApiResult {
    let mut settings = ModelSettings::new(required(body.model_name, "model_name")?);
    if let Some(temperature) = body.temperature {
        settings = settings.with_temperature(temperature);
    }
    if let Some(max_tokens) = body.max_tokens {
        settings = settings.with_max_tokens(max_tokens);
    }
    if let Some(top_p) = body.top_p {
        settings = settings.with_top_p(top_p);
    }
    Ok(Json(client.update_model_settings(&app_id, settings).await?))
}

pub async fn get_model_config(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.get_prompt_config(&app_id).await?))
}

pub async fn get_parameters(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.get_app_parameters(&app_id).await?))
}

pub async fn add_variable(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<VariableBody>,
) -> ApiResult {
    let mut variable = InputVariable::new(required(body.variable_name, "variable_name")?)
        .with_kind(body.variable_type.unwrap_or_default())
        .with_required(body.required.unwrap_or(false));
    if let Some(label) = body.label {
        variable = variable.with_label(label);
    }
    if let Some(max_length) = body.max_length {
        variable = variable.with_max_length(max_length);
    }
    Ok(Json(client.add_variable(&app_id, variable).await?))
}

pub async fn update_opening(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<OpeningBody>,
) -> ApiResult {
    let opening = required(body.opening_statement, "opening_statement")?;
    Ok(Json(
        client
            .update_opening_statement(&app_id, &opening, body.suggested_questions)
            .await?,
    ))
}

pub async fn link_knowledge(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<KnowledgeBody>,
) -> ApiResult {
    let dataset_id = required(body.dataset_id, "dataset_id")?;
    let retrieval = body.retrieval_model.unwrap_or_default();
    Ok(Json(
        client
            .link_knowledge_base(&app_id, &dataset_id, retrieval)
            .await?,
    ))
}

pub async fn add_tool(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(body): JsonBody<ToolBody>,
) -> ApiResult {
    let tool_name = required(body.tool_name, "tool_name")?;
    let config = body.tool_config.unwrap_or_else(|| serde_json::json!({}));
    Ok(Json(
        client
            .add_tool_to_app(&app_id, AgentTool::new(tool_name, config))
            .await?,
    ))
}

pub async fn get_workflow(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.get_workflow(&app_id).await?))
}

pub async fn update_workflow(
    Extension(client): SessionClient,
    Path(app_id): Path<String>,
    JsonBody(workflow): JsonBody<Value>,
) -> ApiResult {
    Ok(Json(client.update_workflow(&app_id, &workflow).await?))
}

pub async fn publish_workflow(Extension(client): SessionClient, Path(app_id): Path<String>) -> ApiResult {
    Ok(Json(client.publish_workflow(&app_id).await?))
}
