//! Login screen

use super::Rendered;
use crate::navigation::View;
use campus_client::{CampusApi, LoginRequest};

/// Username pre-filled on the demo login form
pub const DEMO_USERNAME: &str = "admin";
/// Password pre-filled on the demo login form
pub const DEMO_PASSWORD: &str = "password";

/// Login form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginScreen {
    /// Username field
    pub username: String,
    /// Password field
    pub password: String,
    error: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self {
            username: DEMO_USERNAME.to_string(),
            password: DEMO_PASSWORD.to_string(),
            error: None,
        }
    }
}

impl LoginScreen {
    /// Create a form with the demo credentials filled in
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline error from the last submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form
    ///
    /// Returns the token on success. On failure the normalized error
    /// message is kept for display and `None` is returned.
    pub async fn submit(&mut self, api: &CampusApi) -> Option<String> {
        let credentials = LoginRequest::new(self.username.clone(), self.password.clone());

        match api.login(&credentials).await {
            Ok(token) => {
                self.error = None;
                Some(token)
            }
            Err(e) => {
                tracing::debug!("Login rejected: {}", e);
                self.error = Some(e.error().to_string());
                None
            }
        }
    }

    /// Render the form
    pub fn render(&self) -> Rendered {
        Rendered::new(View::Login)
            .line(format!("Username: {}", self.username))
            .line(format!("Password: {}", "*".repeat(self.password.chars().count())))
            .line("[Sign in] [Register]")
            .error(self.error())
    }
}
