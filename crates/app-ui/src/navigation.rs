//! View routing for SmartCampus
//!
//! The application has a fixed set of views. Which one is shown depends on
//! the last navigation action and on whether a session token is present:
//! authenticated views are never shown without one.

use serde::{Deserialize, Serialize};

// =============================================================================
// Views
// =============================================================================

/// All views in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Sign-in form
    Login,
    /// Account registration form
    Register,
    /// Landing view after sign-in
    Dashboard,
    /// Schools list
    Schools,
    /// Assignments list
    Assignments,
}

impl View {
    /// Check if this view requires authentication
    pub fn requires_auth(&self) -> bool {
        matches!(self, View::Dashboard | View::Schools | View::Assignments)
    }

    /// Get a display title for this view
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "SmartCampus Login (demo)",
            View::Register => "Register",
            View::Dashboard => "Dashboard",
            View::Schools => "Schools",
            View::Assignments => "Assignments",
        }
    }

    /// Get the path for this view
    pub fn to_path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/",
            View::Schools => "/schools",
            View::Assignments => "/assignments",
        }
    }

    /// Get all views
    pub fn all() -> [View; 5] {
        [View::Login, View::Register, View::Dashboard, View::Schools, View::Assignments]
    }
}

// =============================================================================
// Header Navigation
// =============================================================================

/// Buttons in the authenticated header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavButton {
    /// Go to the dashboard
    Dashboard,
    /// Go to the schools list
    Schools,
    /// Go to the assignments list
    Assignments,
    /// End the session
    SignOut,
}

impl NavButton {
    /// Get the button label
    pub fn label(&self) -> &'static str {
        match self {
            NavButton::Dashboard => "Dashboard",
            NavButton::Schools => "Schools",
            NavButton::Assignments => "Assignments",
            NavButton::SignOut => "Sign out",
        }
    }

    /// Get the action this button dispatches
    pub fn action(&self) -> NavAction {
        match self {
            NavButton::Dashboard => NavAction::Navigate(View::Dashboard),
            NavButton::Schools => NavAction::Navigate(View::Schools),
            NavButton::Assignments => NavAction::Navigate(View::Assignments),
            NavButton::SignOut => NavAction::SignOut,
        }
    }

    /// Get all buttons in header order
    pub fn all() -> [NavButton; 4] {
        [NavButton::Dashboard, NavButton::Schools, NavButton::Assignments, NavButton::SignOut]
    }
}

// =============================================================================
// Router
// =============================================================================

/// Navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavAction {
    /// "Register" link on the login view
    ShowRegister,
    /// Login succeeded and the token is in place
    LoggedIn,
    /// Registration succeeded
    Registered,
    /// "Back" on the register view
    Back,
    /// Header navigation between authenticated views
    Navigate(View),
    /// Sign out
    SignOut,
}

/// View router
///
/// Holds the selected view. The view actually shown is derived from the
/// selection and the session state by [`ViewRouter::current`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRouter {
    selected: View,
}

impl ViewRouter {
    /// Create a router for the session state at startup
    pub fn new(authenticated: bool) -> Self {
        let selected = if authenticated { View::Dashboard } else { View::Login };
        Self { selected }
    }

    /// The view to show for the given session state
    ///
    /// Without a token this is never an authenticated view; with one it is
    /// never the login or register form.
    pub fn current(&self, authenticated: bool) -> View {
        match (authenticated, self.selected.requires_auth()) {
            (false, true) => View::Login,
            (true, false) => View::Dashboard,
            _ => self.selected,
        }
    }

    /// Apply an action and return the view now shown
    ///
    /// Actions that do not apply to the current view are ignored.
    pub fn dispatch(&mut self, action: NavAction, authenticated: bool) -> View {
        let current = self.current(authenticated);

        let next = match (current, action) {
            (_, NavAction::SignOut) => Some(View::Login),
            (View::Login, NavAction::ShowRegister) => Some(View::Register),
            (View::Login, NavAction::LoggedIn) => Some(View::Dashboard),
            (View::Register, NavAction::Registered | NavAction::Back) => Some(View::Login),
            (view, NavAction::Navigate(target)) if view.requires_auth() && target.requires_auth() => {
                Some(target)
            }
            _ => None,
        };

        match next {
            Some(view) => self.selected = view,
            None => {
                tracing::debug!("Ignoring {:?} on {:?}", action, current);
                self.selected = current;
            }
        }

        self.current(authenticated)
    }
}

// =============================================================================
// Tests
// =============================================================================
