//! Typed request bodies and configuration documents.
//!
//! Configuration documents read back from the remote API keep every key
//! they do not name in a flattened `extra` map, and every named key they
//! do not touch keeps its absent/`null`/value state, so a read-modify-write
//! changes only the field it means to.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `None` when the key is absent, `Some(None)` when it is an explicit `null`.
///
/// Fields of this type must carry
/// `#[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]`.
pub type Nullable<T> = Option<Option<T>>;

fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Value of a nullable field, created with `T::default()` if absent or `null`.
fn present<T: Default>(slot: &mut Nullable<T>) -> &mut T {
    slot.get_or_insert(None).get_or_insert_with(T::default)
}

/// Application mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppMode {
    #[default]
    Chat,
    Completion,
    AgentChat,
    Workflow,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Chat => "chat",
            AppMode::Completion => "completion",
            AppMode::AgentChat => "agent-chat",
            AppMode::Workflow => "workflow",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of user input field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableType {
    #[default]
    TextInput,
    Select,
    Paragraph,
    Number,
}

/// How linked datasets are queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    Single,
    #[default]
    Multiple,
}

/// A list element that is either the shape we know or kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Known(T),
    Opaque(Value),
}

/// Body of `POST /apps`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApp {
    pub name: String,
    pub mode: AppMode,
    pub icon: String,
    pub description: String,
}

impl CreateApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: AppMode::Chat,
            icon: "🤖".to_string(),
            description: String::new(),
        }
    }

    pub fn with_mode(mut self, mode: AppMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Body of `PUT /apps/{id}`. Empty optional fields are not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameApp {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RenameApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            description: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon.filter(|s| !s.is_empty());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|s| !s.is_empty());
        self
    }
}

/// Generation parameters written by [`ModelSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// The `model` section sent by a model settings update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_params: Option<CompletionParams>,
}

impl ModelSettings {
    /// Model name with temperature 0.7, 2048 max tokens and top_p 1.0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            completion_params: Some(CompletionParams {
                temperature: Some(0.7),
                max_tokens: Some(2048),
                top_p: Some(1.0),
            }),
        }
    }

    fn params_mut(&mut self) -> &mut CompletionParams {
        self.completion_params.get_or_insert_with(Default::default)
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.params_mut().temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.params_mut().max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.params_mut().top_p = Some(top_p);
        self
    }
}

/// The top-level `completion_params` of a model configuration, where
/// non-chat apps keep their prompt. Generation numbers stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptParams {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub prompt: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tool attached to an agent-mode app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTool {
    pub tool_name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub tool_config: Nullable<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgentTool {
    pub fn new(tool_name: impl Into<String>, tool_config: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_config: Some(Some(tool_config)),
            extra: Map::new(),
        }
    }
}

/// The `agent_mode` section of a model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMode {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub enabled: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub tools: Nullable<Vec<Entry<AgentTool>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AgentMode {
    /// Enabled with no tools.
    fn default() -> Self {
        Self {
            enabled: Some(Some(true)),
            tools: Some(Some(Vec::new())),
            extra: Map::new(),
        }
    }
}

/// Document behind `/apps/{id}/model-config`.
///
/// Only the keys a read-modify-write touches are named. The `model`
/// section and everything else ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub prompt_template: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub completion_params: Nullable<PromptParams>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub agent_mode: Nullable<AgentMode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelConfig {
    /// Chat apps keep their prompt in `prompt_template`, every other mode
    /// in `completion_params.prompt`.
    pub fn set_prompt(&mut self, mode: AppMode, prompt: impl Into<String>) {
        let prompt = Some(Some(prompt.into()));
        match mode {
            AppMode::Chat => self.prompt_template = prompt,
            _ => present(&mut self.completion_params).prompt = prompt,
        }
    }

    /// Append to `agent_mode.tools`. A missing or `null` section or list
    /// is created; an existing `enabled` flag is left as it is.
    pub fn add_tool(&mut self, tool: AgentTool) {
        present(&mut present(&mut self.agent_mode).tools).push(Entry::Known(tool));
    }
}

/// A user input field declared on an app.
///
/// Form entries that do not match this shape exactly (missing `label` or
/// `required`, unknown `type`, non-integer `max_length`) decode as
/// [`Entry::Opaque`] and are written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputVariable {
    pub variable: String,
    #[serde(rename = "type")]
    pub kind: VariableType,
    pub label: String,
    pub required: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub max_length: Nullable<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputVariable {
    /// Optional text input labelled with its own name, 48 characters max.
    pub fn new(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        Self {
            label: variable.clone(),
            variable,
            kind: VariableType::TextInput,
            required: false,
            max_length: Some(Some(48)),
            extra: Map::new(),
        }
    }

    pub fn with_kind(mut self, kind: VariableType) -> Self {
        self.kind = kind;
        self
    }

    /// An empty label falls back to the variable name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.is_empty() {
            self.label = label;
        }
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(Some(max_length));
        self
    }
}

/// Document behind `/apps/{id}/parameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppParameters {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub user_input_form: Nullable<Vec<Entry<InputVariable>>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub opening_statement: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub suggested_questions: Nullable<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppParameters {
    pub fn push_variable(&mut self, variable: InputVariable) {
        present(&mut self.user_input_form).push(Entry::Known(variable));
    }

    /// Suggested questions are only replaced by a non-empty list.
    pub fn set_opening(
        &mut self,
        opening_statement: impl Into<String>,
        suggested_questions: Option<Vec<String>>,
    ) {
        self.opening_statement = Some(Some(opening_statement.into()));
        if let Some(questions) = suggested_questions.filter(|q| !q.is_empty()) {
            self.suggested_questions = Some(Some(questions));
        }
    }
}

/// Body of `POST /datasets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDataset {
    pub name: String,
    pub description: String,
}

impl CreateDataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetLink {
    pub dataset_id: String,
    pub retrieval_model: RetrievalMode,
}

/// Body of `POST /apps/{id}/datasets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkDatasets {
    pub datasets: Vec<DatasetLink>,
}

impl LinkDatasets {
    pub fn single(dataset_id: impl Into<String>, retrieval_model: RetrievalMode) -> Self {
        Self {
            datasets: vec![DatasetLink {
                dataset_id: dataset_id.into(),
                retrieval_model,
            }],
        }
    }
}

/// Body of the public `POST /chat-messages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub user: String,
    pub response_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            user: "user".to_string(),
            response_mode: "blocking",
            conversation_id: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Empty ids start a new conversation.
    pub fn with_conversation(mut self, conversation_id: Option<String>) -> Self {
        self.conversation_id = conversation_id.filter(|id| !id.is_empty());
        self
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
