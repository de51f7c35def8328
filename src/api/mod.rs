use crate::config::UiConfig;
use crate::models::{
    DataRecord, DataSaveResponse, FormSubmissionResult, SearchResponse, SearchResult,
};
use thiserror::Error;

pub(crate) const FORM_FALLBACK_ERROR: &str = "Failed to submit form";
pub(crate) const DATA_FALLBACK_ERROR: &str = "Failed to save data";

#[derive(Clone, Debug, Error)]
pub(crate) enum ApiError {
    /// The request never produced a response (fetch rejected).
    #[error("{0}")]
    Network(String),

    /// Non-2xx response; `message` is the body's own explanation when it had one.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Parse(String),

    /// 2xx response whose body reported a failure.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Accepts both `{results: [...]}` and a bare array.
/// Query string pairs for `/api/search`.
pub(crate) fn search_params(query: &str, limit: u32) -> [(&'static str, String); 2] {
    [("query", query.to_string()), ("limit", limit.to_string())]
}

pub(crate) fn parse_search_response(data: serde_json::Value) -> ApiResult<Vec<SearchResult>> {
    if data.is_array() {
        return serde_json::from_value(data).map_err(ApiError::parse);
    }
    let parsed: SearchResponse = serde_json::from_value(data).map_err(ApiError::parse)?;
    Ok(parsed.results)
}

pub(crate) fn form_submission_outcome(result: FormSubmissionResult) -> ApiResult<Option<String>> {
    if result.is_success() {
        Ok(result.message.filter(|m| !m.is_empty()))
    } else {
        Err(ApiError::Backend(
            result
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FORM_FALLBACK_ERROR.to_string()),
        ))
    }
}

pub(crate) fn data_save_outcome(status: u16, body: DataSaveResponse) -> ApiResult<Option<String>> {
    if (200..300).contains(&status) {
        Ok(body.message.filter(|m| !m.is_empty()))
    } else {
        Err(ApiError::Http {
            status,
            message: body
                .detail
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DATA_FALLBACK_ERROR.to_string()),
        })
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &UiConfig) -> Self {
        Self::new(cfg.api_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn search(&self, query: &str, limit: u32) -> ApiResult<Vec<SearchResult>> {
        let res = self
            .client
            .get(self.url("/api/search"))
            .query(&search_params(query, limit))
            .send()
            .await
            .map_err(ApiError::network)?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: format!("Search failed ({status}): {body}"),
            });
        }

        let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
        parse_search_response(data)
    }

    /// Posts text fields as `multipart/form-data`.
    ///
    /// The body is parsed whatever the HTTP status; only its `status` field
    /// decides success.
    pub async fn submit_form(&self, fields: Vec<(String, String)>) -> ApiResult<Option<String>> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let res = self
            .client
            .post(self.url("/api/forms/submit"))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::network)?;

        let result: FormSubmissionResult = res.json().await.map_err(ApiError::parse)?;
        form_submission_outcome(result)
    }

    pub async fn save_data(&self, source: &str, records: &[DataRecord]) -> ApiResult<Option<String>> {
        let path = format!("/api/forms/data/{}", urlencoding::encode(source));
        let res = self
            .client
            .post(self.url(&path))
            .json(records)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status().as_u16();
        let body: DataSaveResponse = res.json().await.map_err(ApiError::parse)?;
        data_save_outcome(status, body)
    }

    pub async fn set_theme(&self, theme: &str) -> ApiResult<()> {
        let res = self
            .client
            .post(self.url("/cms/theme"))
            .form(&[("theme", theme)])
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            Err(ApiError::Http {
                status: status.as_u16(),
                message: format!("Theme change failed ({status})"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_contract_deserialize() {
        let data = json!({
            "results": [
                {"title": "Intro", "snippet": "the <mark>intro</mark>", "slug": "/docs/intro"}
            ],
            "query": "intro",
            "total": 1
        });
        let results = parse_search_response(data).expect("should parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Intro");
        assert_eq!(results[0].slug, "/docs/intro");
    }

    #[test]
    fn test_search_response_accepts_bare_array_and_missing_snippet() {
        let data = json!([{"title": "A", "slug": "/a"}, {"title": "B", "slug": "/b", "snippet": "b"}]);
        let results = parse_search_response(data).expect("should parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].snippet, "");
    }

    #[test]
    fn test_search_response_rejects_garbage() {
        let err = parse_search_response(json!({"hits": []})).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_form_submission_success_keeps_message() {
        let r: FormSubmissionResult =
            serde_json::from_value(json!({"status": "success", "message": "Saved"})).unwrap();
        assert_eq!(form_submission_outcome(r).unwrap().as_deref(), Some("Saved"));
    }

    #[test]
    fn test_form_submission_other_status_is_backend_error() {
        let r: FormSubmissionResult =
            serde_json::from_value(json!({"status": "error", "message": "Bad email"})).unwrap();
        let err = form_submission_outcome(r).unwrap_err();
        assert!(matches!(err, ApiError::Backend(_)));
        assert_eq!(err.to_string(), "Bad email");
    }

    #[test]
    fn test_form_submission_missing_fields_uses_fallback() {
        // e.g. an HTTPException body: {"detail": "..."}
        let r: FormSubmissionResult = serde_json::from_value(json!({"detail": "boom"})).unwrap();
        assert_eq!(form_submission_outcome(r).unwrap_err().to_string(), FORM_FALLBACK_ERROR);
    }

    #[test]
    fn test_data_save_outcome_by_status() {
        let ok = DataSaveResponse {
            message: Some("Stored 3 rows".into()),
            detail: None,
        };
        assert_eq!(data_save_outcome(200, ok).unwrap().as_deref(), Some("Stored 3 rows"));

        let bad = DataSaveResponse {
            message: None,
            detail: Some("Unknown source".into()),
        };
        let err = data_save_outcome(404, bad).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(err.to_string(), "Unknown source");

        let err = data_save_outcome(500, DataSaveResponse::default()).unwrap_err();
        assert_eq!(err.to_string(), DATA_FALLBACK_ERROR);
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://localhost:8000".to_string());
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.url("/api/search"), "http://localhost:8000/api/search");
    }
}
