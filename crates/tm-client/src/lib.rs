//! HTTP client for the remote task/employee matching service

mod client;
mod config;

pub use client::RecommendationClient;
pub use config::ServiceConfig;

// Re-export core types
pub use tm_core::{Error, Result};
