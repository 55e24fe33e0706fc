use serde::{Deserialize, Serialize};
use std::fmt;

use pollichat_types::deserialize_string_or_null;

/// Models that are routed to the special-purpose group by name
pub const SPECIAL_MODELS: &[&str] = &["midijourney", "rtist", "hypnosis-tracy"];

/// One entry of the `/models` catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub provider: String,
    #[serde(default)]
    pub reasoning: bool,
    #[serde(default)]
    pub vision: bool,
    #[serde(default)]
    pub input_modalities: Vec<String>,
}

impl ModelInfo {
    fn accepts(&self, modality: &str) -> bool {
        self.input_modalities.iter().any(|m| m == modality)
    }
}

/// Capability group a model is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelGroup {
    General,
    Vision,
    Multimodal,
    Reasoning,
    Coding,
    Special,
}

impl ModelGroup {
    /// Display order of the groups
    pub const ALL: [ModelGroup; 6] = [
        ModelGroup::General,
        ModelGroup::Vision,
        ModelGroup::Multimodal,
        ModelGroup::Reasoning,
        ModelGroup::Coding,
        ModelGroup::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ModelGroup::General => "General Models 🤖",
            ModelGroup::Vision => "Vision Models 👁️",
            ModelGroup::Multimodal => "Multimodal Models 🎯",
            ModelGroup::Reasoning => "Reasoning Models 🧠",
            ModelGroup::Coding => "Coding Models 💻",
            ModelGroup::Special => "Special Purpose 🔧",
        }
    }
}

impl fmt::Display for ModelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selectable entry rendered for a catalog model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub id: String,
    pub label: String,
    pub provider_note: String,
}

impl From<&ModelInfo> for ModelOption {
    fn from(model: &ModelInfo) -> Self {
        Self {
            id: model.name.clone(),
            label: format!("{} - {}", model.name, model.description),
            provider_note: format!("Provider: {}", model.provider),
        }
    }
}

/// Classify a model into exactly one group.
///
/// Checks run in priority order: coding, reasoning, multimodal, vision,
/// special, and everything else is general.
pub fn classify_model(model: &ModelInfo) -> ModelGroup {
    if model.name.contains("coder") || model.description.to_lowercase().contains("code") {
        ModelGroup::Coding
    } else if model.reasoning {
        ModelGroup::Reasoning
    } else if model.accepts("image") && model.accepts("audio") {
        ModelGroup::Multimodal
    } else if model.vision || model.accepts("image") {
        ModelGroup::Vision
    } else if SPECIAL_MODELS.contains(&model.name.as_str()) {
        ModelGroup::Special
    } else {
        ModelGroup::General
    }
}

/// Group a catalog for display, keeping catalog order within each group
/// and omitting empty groups.
pub fn group_models(models: &[ModelInfo]) -> Vec<(ModelGroup, Vec<ModelOption>)> {
    ModelGroup::ALL
        .iter()
        .filter_map(|group| {
            let options: Vec<ModelOption> = models
                .iter()
                .filter(|model| classify_model(model) == *group)
                .map(ModelOption::from)
                .collect();
            if options.is_empty() {
                None
            } else {
                Some((*group, options))
            }
        })
        .collect()
}
