//! Dataset (knowledge base) operations.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::info;

use crate::client::DifyClient;
use crate::error::ClientError;
use crate::models::CreateDataset;
use crate::session::send;

impl DifyClient {
    pub async fn get_datasets(&self) -> Result<Value, ClientError> {
        self.session.get("/datasets").await
    }

    pub async fn create_dataset(&self, dataset: &CreateDataset) -> Result<Value, ClientError> {
        info!("Creating dataset '{}'", dataset.name);
        self.session.post("/datasets", dataset).await
    }

    /// Upload a local file as a multipart `file` part.
    pub async fn upload_document(
        &self,
        dataset_id: &str,
        file_path: &Path,
    ) -> Result<Value, ClientError> {
        // Checked before touching the file system.
        let builder = self.session.authorized(
            self.session
                .http()
                .post(self.session.console_url(&format!("/datasets/{}/documents", dataset_id))),
        )?;

        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ClientError::Io(format!("{}: {}", file_path.display(), e)))?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        info!("Uploading {} ({} bytes) to dataset {}", file_name, bytes.len(), dataset_id);
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        send(builder.multipart(form)).await
    }
}
