//! Copy and retry behaviour for the error panel.

use std::time::{Duration, Instant};

use crate::types::ErrorCode;

/// What the error panel shows for a given code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPresentation {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn present(code: ErrorCode) -> ErrorPresentation {
    let (icon, title, description) = match code {
        ErrorCode::UserNotFound => (
            "🔍",
            "User not found",
            "We couldn't find a GitHub account with that username. Check the spelling and try again.",
        ),
        ErrorCode::RateLimited => (
            "⏳",
            "Rate limit reached",
            "Too many requests were made recently. Please wait a moment before searching again.",
        ),
        ErrorCode::NetworkError => (
            "📡",
            "Connection problem",
            "We couldn't reach the GitLingo server. Check your internet connection.",
        ),
        ErrorCode::ServerError => (
            "🛠",
            "Server error",
            "Something went wrong on our side. Please try again shortly.",
        ),
        ErrorCode::ValidationError => (
            "⚠",
            "Invalid username",
            "That doesn't look like a valid GitHub username.",
        ),
        ErrorCode::Timeout => (
            "⌛",
            "Request timed out",
            "The server took too long to respond. The account may have many repositories; try again.",
        ),
        ErrorCode::InvalidToken => (
            "🔑",
            "Authentication failed",
            "The server's GitHub credentials were rejected. Please try again later.",
        ),
        ErrorCode::InsufficientScopes => (
            "🔒",
            "Missing permissions",
            "The server's GitHub token lacks the permissions needed for this lookup.",
        ),
        ErrorCode::Generic => (
            "❗",
            "Something went wrong",
            "An unexpected error occurred. Please try again.",
        ),
    };
    ErrorPresentation {
        icon,
        title,
        description,
    }
}

/// 1 Hz countdown gating the retry button after a rate limit.
#[derive(Debug, Clone, Default)]
pub struct RetryCountdown {
    retry_after: Option<u64>,
    remaining: u64,
    last_tick: Option<Instant>,
}

impl RetryCountdown {
    pub fn new(retry_after: Option<u64>, now: Instant) -> Self {
        Self {
            retry_after,
            remaining: retry_after.unwrap_or(0),
            last_tick: retry_after.map(|_| now),
        }
    }

    /// Restart the countdown if the retry-after value changed.
    pub fn sync(&mut self, retry_after: Option<u64>, now: Instant) {
        if retry_after != self.retry_after {
            *self = Self::new(retry_after, now);
        }
    }

    /// Consume every whole second elapsed since the last tick.
    pub fn tick(&mut self, now: Instant) {
        let Some(last) = self.last_tick else { return };
        if self.remaining == 0 {
            return;
        }
        let elapsed = now.saturating_duration_since(last).as_secs();
        if elapsed > 0 {
            self.remaining = self.remaining.saturating_sub(elapsed);
            self.last_tick = Some(last + Duration::from_secs(elapsed));
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn can_retry(&self) -> bool {
        self.remaining == 0
    }
}
