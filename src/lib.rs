//! # GitLingo
//!
//! `gitlingo` looks up a GitHub account through the GitLingo API and charts
//! the programming languages used across its repositories.
//!
//! ## Features
//!
//! - Username search with client-side validation
//! - Bar, pie, polar area and radar charts
//! - Top-N aggregation with an "Others" bucket
//! - PNG/JPG and CSV export
//! - Shareable `/github/{username}` links and deep linking on startup
//! - A "most searched" leaderboard
//!
//! ## Example
//!
//! ```no_run
//! use gitlingo::GitLingoApp;
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! // Create a new application instance
//! let app = Arc::new(Mutex::new(GitLingoApp::default()));
//! let app_wrapper = gitlingo::app::AppWrapper { app };
//!
//! // Run the application with eframe
//! eframe::run_native(
//!     "GitLingo",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as GitLingoApp;
pub use config::Config;
pub use types::{LanguageDatum, SearchFailure, SearchOutcome, SearchSuccess};
