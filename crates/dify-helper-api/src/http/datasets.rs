//! Dataset handlers.

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use dify_helper_client::{CreateDataset, DifyClient};

use crate::error::ApiError;
use crate::http::extract::{required, JsonBody};

#[derive(Debug, Deserialize)]
pub struct CreateDatasetBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// GET /datasets
pub async fn list_datasets(
    Extension(client): Extension<Arc<DifyClient>>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(client.get_datasets().await?))
}

/// POST /datasets
pub async fn create_dataset(
    Extension(client): Extension<Arc<DifyClient>>,
    JsonBody(body): JsonBody<CreateDatasetBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let dataset = CreateDataset::new(required(body.name, "name")?)
        .with_description(body.description.unwrap_or_default());
    let created = client.create_dataset(&dataset).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
