//! Application state and the egui front end.

pub mod error_state;
pub mod leaderboard;
pub mod location;
pub mod search;
mod state;
pub mod toast;
mod ui;

pub use location::{Location, MemoryLocation};
pub use search::{SearchRequest, SearchState, SearchStatus};
pub use state::{share_url, App, AppWrapper};
