mod blog_api;
pub mod blog_api_test;
mod client;
mod client_utils;
mod errors;
pub mod observer;
mod opentelemetry;
mod types;

pub use blog_api::BlogApi;
pub use client::{BlogClient, BlogClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use errors::*;
pub use reqwest::Url;
pub use types::*;
