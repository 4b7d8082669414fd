//! # Common Types
//!
//! This module contains the types shared across the application: the language
//! series returned by the backend, the searched account's profile, and the
//! search outcome in its success and failure forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the synthetic entry that carries the number of forked repositories.
pub const FORKS_KEY: &str = "__forks__";
/// Key of the synthetic entry produced by Top-N aggregation.
pub const OTHERS_KEY: &str = "__others__";
/// Key of the entry grouping repositories with no detected language.
pub const UNKNOWN_KEY: &str = "Unknown";
/// Color used for the "Others" bucket.
pub const OTHERS_COLOR: &str = "#94a3b8";

/// One bar/slice of a chart: how many repositories use a given language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageDatum {
    /// Stable identifier, e.g. "TypeScript" or one of the sentinel keys
    pub key: String,
    /// Display name
    pub label: String,
    /// Number of repositories
    pub value: u64,
    /// Hex color, e.g. "#3178c6"
    pub color: String,
}

impl LanguageDatum {
    pub fn new(key: &str, label: &str, value: u64, color: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
            color: color.to_string(),
        }
    }

    pub fn is_forks(&self) -> bool {
        self.key == FORKS_KEY
    }

    pub fn is_unknown(&self) -> bool {
        self.key == UNKNOWN_KEY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    User,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
}

/// Identity of the searched account. Passed through for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub statistics: Option<ProfileStats>,
}

impl Profile {
    /// Display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// When the backend produced the response and how long it stays cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub cached_until: Option<DateTime<Utc>>,
}

/// Successful search payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuccess {
    pub provider: String,
    pub profile: Profile,
    pub data: Vec<LanguageDatum>,
    pub metadata: Metadata,
}

/// Closed set of failure categories. Codes the client does not know map to
/// `Generic` so a new backend code never breaks the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UserNotFound,
    RateLimited,
    NetworkError,
    ServerError,
    ValidationError,
    Timeout,
    InvalidToken,
    InsufficientScopes,
    #[serde(other)]
    Generic,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "user_not_found",
            ErrorCode::RateLimited => "rate_limited",
            ErrorCode::NetworkError => "network_error",
            ErrorCode::ServerError => "server_error",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::InsufficientScopes => "insufficient_scopes",
            ErrorCode::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed search payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default)]
    pub retry_after_seconds: Option<u64>,
}

impl SearchFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retry_after_seconds: None,
        }
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Outcome of one username search.
pub type SearchOutcome = Result<SearchSuccess, SearchFailure>;

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSearchItem {
    pub username: String,
    pub hit: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub last_searched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    #[serde(default)]
    pub has_more: bool,
}

/// Chart kinds offered by the segmented control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
    PolarArea,
    Radar,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Bar,
        ChartType::Pie,
        ChartType::PolarArea,
        ChartType::Radar,
    ];

    /// Short identifier used in exported file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::PolarArea => "polar",
            ChartType::Radar => "radar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Pie => "Pie",
            ChartType::PolarArea => "Polar Area",
            ChartType::Radar => "Radar",
        }
    }
}

/// How many languages to show before collapsing the rest into "Others".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TopNMode {
    #[default]
    All,
    Top10,
    Top25,
}

impl TopNMode {
    pub const ALL: [TopNMode; 3] = [TopNMode::All, TopNMode::Top10, TopNMode::Top25];

    pub fn limit(&self) -> Option<usize> {
        match self {
            TopNMode::All => None,
            TopNMode::Top10 => Some(10),
            TopNMode::Top25 => Some(25),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TopNMode::All => "All languages",
            TopNMode::Top10 => "Top 10",
            TopNMode::Top25 => "Top 25",
        }
    }
}
