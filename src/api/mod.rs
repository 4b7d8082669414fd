pub mod client;
pub mod service;

pub use client::ApiClient;
pub use service::GitLingoApi;
