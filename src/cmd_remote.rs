//! One-shot commands against the remote API.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use dify_helper_client::{ChatRequest, DifyClient};
use dify_helper_config::Config;

/// One line of a listing: name, id, mode.
#[derive(Debug, PartialEq)]
pub(crate) struct Row {
    pub name: String,
    pub id: String,
    pub mode: String,
}

/// Pull the rows out of a paginated `{"data": [...]}` listing.
pub(crate) fn rows(listing: &Value) -> Vec<Row> {
    let field = |item: &Value, key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or("-")
            .to_string()
    };

    listing
        .get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| Row {
                    name: field(item, "name"),
                    id: field(item, "id"),
                    mode: field(item, "mode"),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn print_rows(title: &str, rows: &[Row]) {
    println!("{} ({})", title, rows.len());
    if rows.is_empty() {
        println!("  none");
        return;
    }
    println!("  {:<30} {:<38} {}", "NAME", "ID", "MODE");
    println!("  {}", "-".repeat(78));
    for row in rows {
        println!("  {:<30} {:<38} {}", row.name, row.id, row.mode);
    }
}

async fn logged_in(config: &Config, email: &str, password: &str) -> Result<DifyClient> {
    let mut client = DifyClient::new(config.remote.base_url.clone());
    client
        .login(email, password)
        .await
        .context("login failed")?;
    Ok(client)
}

/// Log in, then print apps and datasets.
pub(crate) async fn overview(config: &Config, email: &str, password: &str) -> Result<()> {
    let client = logged_in(config, email, password).await?;

    let apps = client.get_apps().await.context("listing apps")?;
    print_rows("Apps", &rows(&apps));
    println!();

    let datasets = client.get_datasets().await.context("listing datasets")?;
    print_rows("Datasets", &rows(&datasets));

    Ok(())
}

/// Send one blocking chat message and print the answer.
pub(crate) async fn chat(
    config: &Config,
    app_key: &str,
    query: &str,
    user: &str,
    conversation_id: Option<String>,
) -> Result<()> {
    let client = DifyClient::new(config.remote.base_url.clone());
    let request = ChatRequest::new(query)
        .with_user(user)
        .with_conversation(conversation_id);

    let response = client
        .chat_completion(app_key, &request)
        .await
        .context("chat request failed")?;

    match response.get("answer").and_then(Value::as_str) {
        Some(answer) => println!("{}", answer),
        None => println!("{}", serde_json::to_string_pretty(&response)?),
    }
    if let Some(conversation) = response.get("conversation_id").and_then(Value::as_str) {
        info!("Conversation: {}", conversation);
    }
    Ok(())
}

/// Log in and upload one file into a dataset.
pub(crate) async fn upload(
    config: &Config,
    email: &str,
    password: &str,
    dataset_id: &str,
    file: &Path,
) -> Result<()> {
    let client = logged_in(config, email, password).await?;
    let response = client
        .upload_document(dataset_id, file)
        .await
        .with_context(|| format!("uploading {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
