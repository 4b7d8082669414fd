//! Search input, filters and the lifecycle of the last request.
//!
//! `SearchState` never talks to the network. `submit` hands back a
//! `SearchRequest` for the caller to run, and `complete` takes the outcome.
//! Request ids let the newest search win: once a request is superseded by an
//! edit, a reset or a newer search, its outcome is ignored.

use super::location::{
    parse_user_path, user_path, user_title, Location, MemoryLocation, DEFAULT_TITLE, ROOT_PATH,
};
use crate::types::{LanguageDatum, SearchFailure, SearchOutcome, SearchSuccess};
use crate::utils::{apply_filters, validate_username};

/// A search that has been validated and should now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Pending(SearchRequest),
    Success(SearchSuccess),
    Error(SearchFailure),
}

#[derive(Debug, Clone)]
pub struct SearchState<L: Location = MemoryLocation> {
    username: String,
    include_forks: bool,
    include_unknown: bool,
    status: SearchStatus,
    validation_error: Option<String>,
    has_succeeded: bool,
    next_request_id: u64,
    location: L,
}

impl Default for SearchState<MemoryLocation> {
    fn default() -> Self {
        Self::new(MemoryLocation::default())
    }
}

impl<L: Location> SearchState<L> {
    pub fn new(location: L) -> Self {
        Self {
            username: String::new(),
            include_forks: false,
            include_unknown: true,
            status: SearchStatus::Idle,
            validation_error: None,
            has_succeeded: false,
            next_request_id: 0,
            location,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Edit the username field.
    ///
    /// Any previous result or error is dropped at once. Emptying the field
    /// also takes the route back to the root.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.status = SearchStatus::Idle;
        self.validation_error = None;

        if self.username.is_empty() && self.location.path() != ROOT_PATH {
            self.reset_location();
        }
    }

    pub fn include_forks(&self) -> bool {
        self.include_forks
    }

    pub fn set_include_forks(&mut self, include: bool) {
        self.include_forks = include;
    }

    pub fn include_unknown(&self) -> bool {
        self.include_unknown
    }

    pub fn set_include_unknown(&mut self, include: bool) {
        self.include_unknown = include;
    }

    /// Validate the current username and start a search for it.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let username = self.username.trim().to_string();
        if let Err(message) = validate_username(&username) {
            tracing::debug!(%username, %message, "username rejected");
            self.validation_error = Some(message);
            return None;
        }

        self.username = username.clone();
        self.validation_error = None;
        self.next_request_id += 1;
        let request = SearchRequest {
            id: self.next_request_id,
            username,
        };
        tracing::info!(username = %request.username, id = request.id, "search started");
        self.status = SearchStatus::Pending(request.clone());
        Some(request)
    }

    /// Set the username and submit in one step, e.g. from a leaderboard chip.
    pub fn search_for(&mut self, username: &str) -> Option<SearchRequest> {
        self.username = username.to_string();
        self.validation_error = None;
        self.submit()
    }

    /// Search again for the username of the last request.
    pub fn retry(&mut self) -> Option<SearchRequest> {
        self.submit()
    }

    /// Apply the outcome of `request_id`. Returns false if that request was
    /// superseded and the outcome was ignored.
    pub fn complete(&mut self, request_id: u64, outcome: SearchOutcome) -> bool {
        let username = match &self.status {
            SearchStatus::Pending(request) if request.id == request_id => request.username.clone(),
            _ => {
                tracing::debug!(request_id, "dropping outcome of superseded search");
                return false;
            }
        };

        match outcome {
            Ok(success) => {
                self.location.push(&user_path(&username));
                self.location.set_title(&user_title(&username));
                self.has_succeeded = true;
                self.status = SearchStatus::Success(success);
            }
            Err(failure) => {
                if self.has_succeeded {
                    self.reset_location();
                }
                self.status = SearchStatus::Error(failure);
            }
        }
        true
    }

    /// Pick up a deep link from the current route.
    ///
    /// `/github/{username}` starts a search. Any other non-root route, or a
    /// username that fails validation, is replaced with the root.
    pub fn init_from_location(&mut self) -> Option<SearchRequest> {
        let path = self.location.path().to_string();
        if path == ROOT_PATH {
            return None;
        }

        match parse_user_path(&path) {
            Some(username) => {
                let request = self.search_for(username);
                if request.is_none() {
                    tracing::debug!(%path, "invalid username in route, redirecting to root");
                    self.location.replace(ROOT_PATH);
                }
                request
            }
            None => {
                tracing::debug!(%path, "unknown route, redirecting to root");
                self.location.replace(ROOT_PATH);
                None
            }
        }
    }

    /// Back to a blank form.
    pub fn reset(&mut self) {
        self.username.clear();
        self.include_forks = false;
        self.include_unknown = true;
        self.status = SearchStatus::Idle;
        self.validation_error = None;
        self.has_succeeded = false;
        self.reset_location();
    }

    fn reset_location(&mut self) {
        if self.location.path() != ROOT_PATH {
            self.location.push(ROOT_PATH);
        }
        self.location.set_title(DEFAULT_TITLE);
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, SearchStatus::Pending(_))
    }

    pub fn result(&self) -> Option<&SearchSuccess> {
        match &self.status {
            SearchStatus::Success(success) => Some(success),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SearchFailure> {
        match &self.status {
            SearchStatus::Error(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Result series with the forks/unknown filters applied
    pub fn filtered_data(&self) -> Option<Vec<LanguageDatum>> {
        self.result()
            .map(|r| apply_filters(&r.data, self.include_forks, self.include_unknown))
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}
