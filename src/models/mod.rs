use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SearchResult {
    pub title: String,

    /// Highlighted excerpt; the backend may embed `<mark>` tags.
    #[serde(default)]
    pub snippet: String,

    /// Relative URL of the page.
    pub slug: String,
}

/// `/api/search` body. Only `results` is consumed.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct FormSubmissionResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FormSubmissionResult {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// `/api/forms/data/{source}` body: `message` on success, `detail` on failure.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct DataSaveResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// One table row keyed by field name, in column order. Cell text is kept
/// opaque.
pub(crate) type DataRecord = IndexMap<String, String>;
