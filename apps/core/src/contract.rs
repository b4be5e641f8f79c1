use serde::{Deserialize, Serialize};

use crate::dispatcher::DispatchOutcome;
use crate::model::{Suggestion, SuggestionKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKindDto {
    PluginAction,
    BuiltinAction,
    WebSearch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: SuggestionKindDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub suggestions: Vec<SuggestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReloadPluginsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReloadPluginsResponse {
    pub loaded: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Query(QueryRequest),
    Confirm(ConfirmRequest),
    ReloadPlugins(ReloadPluginsRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Query(QueryResponse),
    Confirm(ConfirmResponse),
    ReloadPlugins(ReloadPluginsResponse),
}

impl From<Suggestion> for SuggestionDto {
    fn from(value: Suggestion) -> Self {
        let kind = match value.kind {
            SuggestionKind::PluginAction => SuggestionKindDto::PluginAction,
            SuggestionKind::BuiltinAction => SuggestionKindDto::BuiltinAction,
            SuggestionKind::WebSearch => SuggestionKindDto::WebSearch,
        };
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            kind,
        }
    }
}

impl From<DispatchOutcome> for ConfirmResponse {
    fn from(value: DispatchOutcome) -> Self {
        match value {
            DispatchOutcome::Success(message) => Self { ok: true, message },
            DispatchOutcome::Failure(reason) => Self {
                ok: false,
                message: reason,
            },
        }
    }
}
