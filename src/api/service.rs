//! GitLingo endpoints: username search and the most-searched leaderboard.

use serde::Deserialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    ErrorCode, Pagination, SearchFailure, SearchOutcome, SearchSuccess, TopSearchItem,
};

const SEARCH_PATH: &str = "/api/v1/search";
const TOP_SEARCH_PATH: &str = "/api/v1/topsearch";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: SearchFailure,
}

#[derive(Deserialize)]
struct TopSearchResponse {
    ok: bool,
    #[serde(default)]
    data: Vec<TopSearchItem>,
    #[serde(default)]
    #[allow(dead_code)]
    pagination: Option<Pagination>,
}

#[derive(Clone)]
pub struct GitLingoApi {
    client: ApiClient,
}

impl GitLingoApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Look up the language breakdown for `username`.
    ///
    /// Transport failures come back as `SearchFailure`s too.
    pub async fn search(&self, username: &str) -> SearchOutcome {
        let body: Value = match self
            .client
            .get_json(SEARCH_PATH, &[("username", username)])
            .await
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(username, error = %e, "search request failed");
                return Err(e.into());
            }
        };

        let outcome = decode_search_response(body);
        match &outcome {
            Ok(success) => tracing::info!(
                username,
                languages = success.data.len(),
                "search succeeded"
            ),
            Err(failure) => tracing::info!(username, code = %failure.code, "search failed"),
        }
        outcome
    }

    /// Most searched GitHub accounts. Any failure yields `None`.
    pub async fn top_searches(&self, limit: usize) -> Option<Vec<TopSearchItem>> {
        let limit = limit.to_string();
        let query = [("provider", "github"), ("limit", limit.as_str()), ("offset", "0")];

        match self
            .client
            .get_json::<TopSearchResponse>(TOP_SEARCH_PATH, &query)
            .await
        {
            Ok(response) if response.ok => Some(response.data),
            Ok(_) => {
                tracing::debug!("leaderboard returned an error body");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "leaderboard unavailable");
                None
            }
        }
    }
}

/// Split the `ok`-tagged search body into its success or failure form.
fn decode_search_response(body: Value) -> SearchOutcome {
    let ok = body.get("ok").and_then(Value::as_bool);
    match ok {
        Some(true) => serde_json::from_value::<SearchSuccess>(body)
            .map_err(|e| ApiError::from(e).into()),
        Some(false) => match serde_json::from_value::<ErrorEnvelope>(body) {
            Ok(envelope) => Err(envelope.error),
            Err(e) => Err(ApiError::from(e).into()),
        },
        None => Err(SearchFailure::new(
            ErrorCode::ServerError,
            "Unexpected response from server",
        )),
    }
}
