//! Application screens
//!
//! Each screen keeps its own form or list state and renders to a
//! [`Rendered`] description that a frontend can paint.

use crate::navigation::View;
use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod lists;
pub mod login;
pub mod register;

pub use dashboard::DashboardScreen;
pub use lists::{ListItem, ListScreen, LoadTicket};
pub use login::LoginScreen;
pub use register::RegisterScreen;

/// Rendered screen contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    /// View being shown
    pub view: View,
    /// Screen heading
    pub title: String,
    /// Header navigation labels (authenticated views only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation: Vec<String>,
    /// Body lines, in display order
    #[serde(default)]
    pub lines: Vec<String>,
    /// Item keys for list views, parallel to `lines`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    /// Inline error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Rendered {
    /// Start rendering `view` with its default title
    pub fn new(view: View) -> Self {
        Self {
            view,
            title: view.title().to_string(),
            navigation: Vec::new(),
            lines: Vec::new(),
            keys: Vec::new(),
            error: None,
        }
    }

    /// Append a body line
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append a keyed list row
    ///
    /// Keyed rows are not mixed with plain lines, so `keys[i]` identifies
    /// `lines[i]`.
    pub fn item(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self.lines.push(label.into());
        self
    }

    /// Set the inline error
    pub fn error(mut self, error: Option<&str>) -> Self {
        self.error = error.map(str::to_string);
        self
    }

    /// Set the header navigation labels
    pub fn navigation(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.navigation = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any body line contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.contains(text))
    }
}
