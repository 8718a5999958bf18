//! App operations.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::DifyClient;
use crate::error::ClientError;
use crate::models::{
    AgentTool, AppMode, AppParameters, CreateApp, InputVariable, LinkDatasets, ModelConfig,
    ModelSettings, RenameApp, RetrievalMode,
};

fn app_path(app_id: &str) -> String {
    format!("/apps/{}", app_id)
}

#[derive(Serialize)]
struct ModelSection<'a> {
    model: &'a ModelSettings,
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))
}

impl DifyClient {
    pub async fn get_apps(&self) -> Result<Value, ClientError> {
        self.session.get("/apps").await
    }

    pub async fn get_app_detail(&self, app_id: &str) -> Result<Value, ClientError> {
        self.session.get(&app_path(app_id)).await
    }

    pub async fn create_app(&self, app: &CreateApp) -> Result<Value, ClientError> {
        info!("Creating app '{}' (mode: {})", app.name, app.mode);
        self.session.post("/apps", app).await
    }

    pub async fn rename_app(&self, app_id: &str, rename: &RenameApp) -> Result<Value, ClientError> {
        info!("Renaming app {} to '{}'", app_id, rename.name);
        self.session.put(&app_path(app_id), rename).await
    }

    pub async fn delete_app(&self, app_id: &str) -> Result<Value, ClientError> {
        info!("Deleting app {}", app_id);
        self.session.delete(&app_path(app_id)).await
    }

    /// Raw model configuration document.
    pub async fn get_prompt_config(&self, app_id: &str) -> Result<Value, ClientError> {
        self.session
            .get(&format!("{}/model-config", app_path(app_id)))
            .await
    }

    pub async fn get_model_config(&self, app_id: &str) -> Result<ModelConfig, ClientError> {
        decode(self.get_prompt_config(app_id).await?)
    }

    /// Write a whole model configuration back.
    pub async fn update_app_config(
        &self,
        app_id: &str,
        config: &ModelConfig,
    ) -> Result<Value, ClientError> {
        self.session
            .post(&format!("{}/model-config", app_path(app_id)), config)
            .await
    }

    /// Read the model configuration, replace the prompt, write it back.
    pub async fn update_prompt(
        &self,
        app_id: &str,
        prompt: &str,
        mode: AppMode,
    ) -> Result<Value, ClientError> {
        info!("Updating prompt of app {} (mode: {})", app_id, mode);
        let mut config = self.get_model_config(app_id).await?;
        config.set_prompt(mode, prompt);
        self.update_app_config(app_id, &config).await
    }

    /// Only the `model` section is sent.
    pub async fn update_model_settings(
        &self,
        app_id: &str,
        settings: ModelSettings,
    ) -> Result<Value, ClientError> {
        info!(
            "Updating model of app {} to {}",
            app_id,
            settings.name.as_deref().unwrap_or("<unnamed>")
        );
        self.session
            .post(
                &format!("{}/model-config", app_path(app_id)),
                &ModelSection { model: &settings },
            )
            .await
    }

    /// Append a tool to `agent_mode.tools`, enabling agent mode if needed.
    pub async fn add_tool_to_app(&self, app_id: &str, tool: AgentTool) -> Result<Value, ClientError> {
        info!("Adding tool '{}' to app {}", tool.tool_name, app_id);
        let mut config = self.get_model_config(app_id).await?;
        config.add_tool(tool);
        self.update_app_config(app_id, &config).await
    }

    /// Raw parameters document.
    pub async fn get_app_parameters(&self, app_id: &str) -> Result<Value, ClientError> {
        self.session
            .get(&format!("{}/parameters", app_path(app_id)))
            .await
    }

    pub async fn get_parameters(&self, app_id: &str) -> Result<AppParameters, ClientError> {
        decode(self.get_app_parameters(app_id).await?)
    }

    pub async fn update_app_parameters(
        &self,
        app_id: &str,
        parameters: &AppParameters,
    ) -> Result<Value, ClientError> {
        self.session
            .post(&format!("{}/parameters", app_path(app_id)), parameters)
            .await
    }

    /// Append a user input variable, keeping the existing ones.
    pub async fn add_variable(
        &self,
        app_id: &str,
        variable: InputVariable,
    ) -> Result<Value, ClientError> {
        info!("Adding variable '{}' to app {}", variable.variable, app_id);
        let mut parameters = self.get_parameters(app_id).await?;
        parameters.push_variable(variable);
        self.update_app_parameters(app_id, &parameters).await
    }

    pub async fn update_opening_statement(
        &self,
        app_id: &str,
        opening_statement: &str,
        suggested_questions: Option<Vec<String>>,
    ) -> Result<Value, ClientError> {
        info!("Updating opening statement of app {}", app_id);
        let mut parameters = self.get_parameters(app_id).await?;
        parameters.set_opening(opening_statement, suggested_questions);
        self.update_app_parameters(app_id, &parameters).await
    }

    pub async fn link_knowledge_base(
        &self,
        app_id: &str,
        dataset_id: &str,
        retrieval_model: RetrievalMode,
    ) -> Result<Value, ClientError> {
        info!("Linking dataset {} to app {}", dataset_id, app_id);
        let body = LinkDatasets::single(dataset_id, retrieval_model);
        self.session
            .post(&format!("{}/datasets", app_path(app_id)), &body)
            .await
    }

    /// Draft workflow of a workflow app.
    pub async fn get_workflow(&self, app_id: &str) -> Result<Value, ClientError> {
        self.session
            .get(&format!("{}/workflows/draft", app_path(app_id)))
            .await
    }

    pub async fn update_workflow(&self, app_id: &str, workflow: &Value) -> Result<Value, ClientError> {
        info!("Updating draft workflow of app {}", app_id);
        self.session
            .post(&format!("{}/workflows/draft", app_path(app_id)), workflow)
            .await
    }

    pub async fn publish_workflow(&self, app_id: &str) -> Result<Value, ClientError> {
        info!("Publishing workflow of app {}", app_id);
        self.session
            .post(
                &format!("{}/workflows/publish", app_path(app_id)),
                &serde_json::json!({}),
            )
            .await
    }
}
