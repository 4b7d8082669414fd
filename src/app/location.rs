//! Route and window title, the desktop stand-in for the browser location bar.

pub const ROOT_PATH: &str = "/";
pub const DEFAULT_TITLE: &str = "GitLingo";
const USER_PATH_PREFIX: &str = "/github/";

/// Where the app currently "is" and what the window is called.
pub trait Location {
    fn path(&self) -> &str;
    /// Navigate to `path`, keeping the previous entry in history
    fn push(&mut self, path: &str);
    /// Swap the current entry for `path`
    fn replace(&mut self, path: &str);
    fn title(&self) -> &str;
    fn set_title(&mut self, title: &str);
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    history: Vec<String>,
    title: String,
}

impl MemoryLocation {
    pub fn new(path: &str) -> Self {
        Self {
            history: vec![normalize_path(path)],
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Step back in history. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(ROOT_PATH)
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(ROOT_PATH)
    }

    fn push(&mut self, path: &str) {
        let path = normalize_path(path);
        if self.path() != path {
            self.history.push(path);
        }
    }

    fn replace(&mut self, path: &str) {
        let path = normalize_path(path);
        match self.history.last_mut() {
            Some(current) => *current = path,
            None => self.history.push(path),
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn user_path(username: &str) -> String {
    format!("{}{}", USER_PATH_PREFIX, username)
}

pub fn user_title(username: &str) -> String {
    format!("{} • github • {}", DEFAULT_TITLE, username)
}

/// Username from a `/github/{username}` route. One trailing slash is tolerated.
pub fn parse_user_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(USER_PATH_PREFIX)?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    (!rest.is_empty() && !rest.contains('/')).then_some(rest)
}
