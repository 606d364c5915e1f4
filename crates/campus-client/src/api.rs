//! Typed endpoint facade over [`ApiClient`]

use crate::http::{ApiClient, ApiError};
use crate::types::{Assignment, LoginRequest, LoginResponse, RegisterRequest, School};

/// Login endpoint
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint
pub const REGISTER_PATH: &str = "/auth/register";
/// Schools collection
pub const SCHOOLS_PATH: &str = "/schools";
/// Assignments collection
pub const ASSIGNMENTS_PATH: &str = "/assignments";

/// SmartCampus backend endpoints
#[derive(Debug, Clone)]
pub struct CampusApi {
    client: ApiClient,
}

impl CampusApi {
    /// Create a facade over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, credentials: &LoginRequest) -> Result<String, ApiError> {
        let response: LoginResponse = self.client.post(LOGIN_PATH, credentials).await?;

        if response.token.is_empty() {
            return Err(ApiError::invalid_response("empty token"));
        }

        Ok(response.token)
    }

    /// Create an account; the response body is ignored
    pub async fn register(&self, details: &RegisterRequest) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post(REGISTER_PATH, details).await?;
        Ok(())
    }

    /// Fetch all schools, in backend order
    pub async fn list_schools(&self) -> Result<Vec<School>, ApiError> {
        self.client.get(SCHOOLS_PATH).await
    }

    /// Fetch all assignments, in backend order
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, ApiError> {
        self.client.get(ASSIGNMENTS_PATH).await
    }
}
