//! SmartCampus API client
//!
//! This crate provides the HTTP client wrapper used to talk to the
//! SmartCampus REST backend, the typed resource DTOs, and a small endpoint
//! facade ([`CampusApi`]) covering authentication and the list resources.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod http;
pub mod types;

pub use api::CampusApi;
pub use http::{ApiClient, ApiClientConfig, ApiError, ApiRequest, HttpMethod};
pub use types::{Assignment, LoginRequest, LoginResponse, RegisterRequest, ResourceId, School};

/// Result type for client construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up the client
///
/// Request failures are not reported through this type; every request
/// returns the normalized [`ApiError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
