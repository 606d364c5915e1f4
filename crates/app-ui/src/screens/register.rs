//! Registration screen

use super::Rendered;
use crate::navigation::View;
use campus_client::{CampusApi, RegisterRequest};

/// Registration form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterScreen {
    /// Username field
    pub username: String,
    /// Email field
    pub email: String,
    /// Password field
    pub password: String,
    error: Option<String>,
}

impl RegisterScreen {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline error from the last submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form, returning whether the account was created
    pub async fn submit(&mut self, api: &CampusApi) -> bool {
        let details = RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match api.register(&details).await {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                tracing::debug!("Registration rejected: {}", e);
                self.error = Some(e.error().to_string());
                false
            }
        }
    }

    /// Render the form
    pub fn render(&self) -> Rendered {
        Rendered::new(View::Register)
            .line(format!("Username: {}", self.username))
            .line(format!("Email: {}", self.email))
            .line(format!("Password: {}", "*".repeat(self.password.chars().count())))
            .line("[Register] [Back]")
            .error(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let screen = RegisterScreen::new();
        assert!(screen.username.is_empty());
        assert!(screen.email.is_empty());
        assert_eq!(screen.error(), None);
        assert!(screen.render().contains("Email: "));
    }
}
