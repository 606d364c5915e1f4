//! Dashboard screen

use super::Rendered;
use crate::navigation::View;

/// Landing screen shown after sign-in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardScreen;

impl DashboardScreen {
    /// Render the dashboard
    pub fn render(&self) -> Rendered {
        Rendered::new(View::Dashboard)
            .line("Welcome to SmartCampus.")
            .line("Use the header to browse schools and assignments.")
    }
}
