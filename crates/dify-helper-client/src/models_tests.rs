
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_mode_wire_names() {
        assert_eq!(serde_json::to_value(AppMode::AgentChat).unwrap(), "agent-chat");
        assert_eq!(serde_json::to_value(AppMode::Workflow).unwrap(), "workflow");
        let mode: AppMode = serde_json::from_value(json!("completion")).unwrap();
        assert_eq!(mode, AppMode::Completion);
        assert!(serde_json::from_value::<AppMode>(json!("voice")).is_err());
    }

    #[test]
    fn test_app_mode_display() {
        assert_eq!(AppMode::Chat.to_string(), "chat");
        assert_eq!(AppMode::AgentChat.to_string(), "agent-chat");
    }

    #[test]
    fn test_create_app_defaults() {
        let body = serde_json::to_value(CreateApp::new("Foo")).unwrap();
        assert_eq!(
            body,
            json!({"name": "Foo", "mode": "chat", "icon": "🤖", "description": ""})
        );
    }

    #[test]
    fn test_rename_app_skips_empty_fields() {
        let body = serde_json::to_value(
            RenameApp::new("Bar")
                .with_icon(Some(String::new()))
                .with_description(None),
        )
        .unwrap();
        assert_eq!(body, json!({"name": "Bar"}));

        let body = serde_json::to_value(
            RenameApp::new("Bar").with_icon(Some("🦀".to_string())),
        )
        .unwrap();
        assert_eq!(body["icon"], "🦀");
    }

    #[test]
    fn test_model_settings_defaults() {
        let body = serde_json::to_value(ModelSettings::new("gpt-4")).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "gpt-4",
                "completion_params": {"temperature": 0.7, "max_tokens": 2048, "top_p": 1.0}
            })
        );
    }

    #[test]
    fn test_model_settings_overrides() {
        let settings = ModelSettings::new("claude-3-sonnet")
            .with_temperature(0.2)
            .with_max_tokens(512)
            .with_top_p(0.9);
        let params = settings.completion_params.unwrap();
        assert_eq!(params.temperature, Some(0.2));
        assert_eq!(params.max_tokens, Some(512));
        assert_eq!(params.top_p, Some(0.9));
    }

    #[test]
    fn test_model_config_preserves_unknown_keys() {
        let raw = json!({
            "prompt_template": "old",
            "model": {
                "provider": "openai",
                "name": "gpt-4",
                "completion_params": {"temperature": 0.5, "stop": ["\n"]}
            },
            "retriever_resource": {"enabled": true},
            "more_like_this": {"enabled": false}
        });
        let mut config: ModelConfig = serde_json::from_value(raw.clone()).unwrap();
        config.set_prompt(AppMode::Chat, "new");

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["prompt_template"], "new");
        assert_eq!(written["model"], raw["model"]);
        assert_eq!(written["retriever_resource"], raw["retriever_resource"]);
        assert_eq!(written["more_like_this"], raw["more_like_this"]);
    }

    #[test]
    fn test_set_prompt_completion_mode_creates_params() {
        let mut config = ModelConfig::default();
        config.set_prompt(AppMode::Completion, "Summarize {{text}}");

        assert!(config.prompt_template.is_none());
        assert_eq!(
            config.completion_params.unwrap().unwrap().prompt,
            Some(Some("Summarize {{text}}".to_string()))
        );
    }

    #[test]
    fn test_add_tool_creates_enabled_agent_mode() {
        let mut config = ModelConfig::default();
        config.add_tool(AgentTool::new("web_search", json!({"engine": "bing"})));

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["agent_mode"]["enabled"], true);
        assert_eq!(written["agent_mode"]["tools"][0]["tool_name"], "web_search");
        assert_eq!(written["agent_mode"]["tools"][0]["tool_config"]["engine"], "bing");
    }

    #[test]
    fn test_add_tool_keeps_existing_tools() {
        let raw = json!({
            "agent_mode": {
                "enabled": true,
                "strategy": "function_call",
                "tools": [
                    {"provider_id": "time", "tool_name": "current_time", "enabled": true},
                    {"legacy": true}
                ]
            }
        });
        let mut config: ModelConfig = serde_json::from_value(raw.clone()).unwrap();
        config.add_tool(AgentTool::new("calculator", json!({})));

        let written = serde_json::to_value(&config).unwrap();
        let tools = written["agent_mode"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0], raw["agent_mode"]["tools"][0]);
        assert_eq!(tools[1], raw["agent_mode"]["tools"][1]);
        assert_eq!(written["agent_mode"]["strategy"], "function_call");
    }

    #[test]
    fn test_input_variable_defaults() {
        let var = InputVariable::new("user_name");
        assert_eq!(var.label, "user_name");
        assert_eq!(var.kind, VariableType::TextInput);
        assert!(!var.required);
        assert_eq!(var.max_length, Some(Some(48)));

        let var = InputVariable::new("user_name").with_label("");
        assert_eq!(var.label, "user_name");
    }

    #[test]
    fn test_input_variable_wire_shape() {
        let var = InputVariable::new("question_details")
            .with_kind(VariableType::Paragraph)
            .with_label("Describe your question")
            .with_required(true)
            .with_max_length(500);
        assert_eq!(
            serde_json::to_value(&var).unwrap(),
            json!({
                "variable": "question_details",
                "type": "paragraph",
                "label": "Describe your question",
                "required": true,
                "max_length": 500
            })
        );
    }

    #[test]
    fn test_app_parameters_keeps_foreign_form_entries() {
        let raw = json!({
            "user_input_form": [
                {"variable": "topic", "type": "select", "label": "Topic", "required": true, "options": ["a", "b"]},
                {"text-input": {"variable": "legacy", "label": "Legacy"}}
            ],
            "speech_to_text": {"enabled": false}
        });
        let mut params: AppParameters = serde_json::from_value(raw.clone()).unwrap();
        let form = params.user_input_form.as_ref().unwrap().as_ref().unwrap();
        assert!(matches!(form[0], Entry::Known(_)));
        assert!(matches!(form[1], Entry::Opaque(_)));

        params.push_variable(InputVariable::new("city"));
        let written = serde_json::to_value(&params).unwrap();
        let form = written["user_input_form"].as_array().unwrap();
        assert_eq!(form.len(), 3);
        assert_eq!(form[0], raw["user_input_form"][0]);
        assert_eq!(form[1], raw["user_input_form"][1]);
        assert_eq!(form[2]["variable"], "city");
        assert_eq!(written["speech_to_text"], raw["speech_to_text"]);
    }

    #[test]
    fn test_push_variable_creates_form() {
        let mut params = AppParameters::default();
        params.push_variable(InputVariable::new("city"));
        assert_eq!(params.user_input_form.unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_set_opening_only_replaces_non_empty_questions() {
        let mut params = AppParameters {
            suggested_questions: Some(Some(vec!["keep me".to_string()])),
            ..Default::default()
        };
        params.set_opening("Hello!", Some(vec![]));
        assert_eq!(params.opening_statement, Some(Some("Hello!".to_string())));
        assert_eq!(
            params.suggested_questions,
            Some(Some(vec!["keep me".to_string()]))
        );

        params.set_opening("Hi", Some(vec!["What can you do?".to_string()]));
        assert_eq!(
            params.suggested_questions,
            Some(Some(vec!["What can you do?".to_string()]))
        );
    }

    #[test]
    fn test_app_parameters_keeps_explicit_nulls() {
        let raw = json!({
            "opening_statement": null,
            "suggested_questions": null,
            "user_input_form": [
                {"variable": "topic", "type": "text-input", "label": "Topic", "required": false, "max_length": null}
            ]
        });
        let mut params: AppParameters = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(params.opening_statement, Some(None));
        assert_eq!(params.suggested_questions, Some(None));

        params.push_variable(InputVariable::new("city"));
        let written = serde_json::to_value(&params).unwrap();
        assert_eq!(written["opening_statement"], Value::Null);
        assert_eq!(written["suggested_questions"], Value::Null);
        assert!(written.as_object().unwrap().contains_key("opening_statement"));
        assert_eq!(written["user_input_form"][0], raw["user_input_form"][0]);
        assert_eq!(written["user_input_form"][1]["max_length"], 48);
    }

    #[test]
    fn test_null_form_is_replaced_on_push() {
        let mut params: AppParameters =
            serde_json::from_value(json!({"user_input_form": null})).unwrap();
        params.push_variable(InputVariable::new("city"));
        assert_eq!(params.user_input_form.unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let params: AppParameters = serde_json::from_value(json!({"more": 1})).unwrap();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"more": 1}));

        let config: ModelConfig = serde_json::from_value(json!({"pre_prompt": ""})).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"pre_prompt": ""}));
    }

    #[test]
    fn test_form_entry_with_unexpected_shape_is_opaque() {
        let raw = json!({
            "user_input_form": [
                {"variable": "a", "type": "text-input", "label": "A", "required": false, "max_length": 48.0},
                {"variable": "b", "type": "text-input", "label": null, "required": false},
                {"variable": "c", "type": "text-input", "label": "C"}
            ]
        });
        let params: AppParameters = serde_json::from_value(raw.clone()).unwrap();
        let form = params.user_input_form.as_ref().unwrap().as_ref().unwrap();
        assert!(form.iter().all(|entry| matches!(entry, Entry::Opaque(_))));
        assert_eq!(serde_json::to_value(&params).unwrap(), raw);
    }

    #[test]
    fn test_set_prompt_keeps_float_generation_numbers() {
        let raw = json!({
            "completion_params": {"prompt": "old", "max_tokens": 4096.0, "temperature": 0.3},
            "model": {"name": "gpt-4", "completion_params": {"max_tokens": 4096.0}}
        });
        let mut config: ModelConfig = serde_json::from_value(raw.clone()).unwrap();
        config.set_prompt(AppMode::Completion, "new");

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["completion_params"]["prompt"], "new");
        assert_eq!(written["completion_params"]["max_tokens"], json!(4096.0));
        assert_eq!(written["completion_params"]["temperature"], json!(0.3));
        assert_eq!(written["model"], raw["model"]);
    }

    #[test]
    fn test_add_tool_tolerates_null_agent_fields() {
        let raw = json!({"agent_mode": {"enabled": null, "tools": null, "strategy": "react"}});
        let mut config: ModelConfig = serde_json::from_value(raw).unwrap();
        config.add_tool(AgentTool::new("calculator", json!({})));

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["agent_mode"]["enabled"], Value::Null);
        assert_eq!(written["agent_mode"]["strategy"], "react");
        let tools = written["agent_mode"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["tool_name"], "calculator");
    }

    #[test]
    fn test_add_tool_replaces_null_agent_mode() {
        let mut config: ModelConfig =
            serde_json::from_value(json!({"agent_mode": null})).unwrap();
        config.add_tool(AgentTool::new("calculator", json!({})));

        let written = serde_json::to_value(&config).unwrap();
        assert_eq!(written["agent_mode"]["enabled"], true);
        assert_eq!(written["agent_mode"]["tools"][0]["tool_name"], "calculator");
    }

    #[test]
    fn test_link_datasets_shape() {
        let body = serde_json::to_value(LinkDatasets::single("ds-1", RetrievalMode::default())).unwrap();
        assert_eq!(
            body,
            json!({"datasets": [{"dataset_id": "ds-1", "retrieval_model": "multiple"}]})
        );
    }

    #[test]
    fn test_create_dataset_shape() {
        let body = serde_json::to_value(CreateDataset::new("Docs").with_description("manuals")).unwrap();
        assert_eq!(body, json!({"name": "Docs", "description": "manuals"}));
    }

    #[test]
    fn test_chat_request_shape() {
        let body = serde_json::to_value(
            ChatRequest::new("Hello!")
                .with_user("test-user")
                .with_conversation(Some(String::new())),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"query": "Hello!", "user": "test-user", "response_mode": "blocking"})
        );

        let body = serde_json::to_value(
            ChatRequest::new("again").with_conversation(Some("conv-1".to_string())),
        )
        .unwrap();
        assert_eq!(body["conversation_id"], "conv-1");
        assert_eq!(body["user"], "user");
    }
