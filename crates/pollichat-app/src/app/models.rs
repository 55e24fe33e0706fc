use anyhow::{Context, Result};
use colored::Colorize;

use pollichat_llm_api::{ChatBackend, PollinationsClient};
use pollichat_models::{group_models, ModelGroup, ModelInfo, ModelOption};

use crate::app::AppConfig;

/// Render the grouped catalog, marking the selected model
pub fn render_model_groups(groups: &[(ModelGroup, Vec<ModelOption>)], current: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (group, options) in groups {
        lines.push(group.label().bright_cyan().bold().to_string());
        for option in options {
            let marker = if option.id == current { "*" } else { " " };
            lines.push(format!("  {} {}  {}", marker, option.label, option.provider_note.bright_black()));
        }
    }
    lines
}

pub fn print_models(models: &[ModelInfo], current: &str) {
    if models.is_empty() {
        println!("{}", "No models available.".yellow());
        return;
    }
    for line in render_model_groups(&group_models(models), current) {
        println!("{}", line);
    }
}

/// `pollichat models`
pub async fn run_models_mode(config: &AppConfig) -> Result<()> {
    let client = PollinationsClient::new(config.client_config.clone());
    let models = client
        .list_models()
        .await
        .context("Error loading models")?;

    print_models(&models, "");
    Ok(())
}
