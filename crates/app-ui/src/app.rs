//! Application root
//!
//! [`App`] owns the session, the API facade, the router, and every screen.
//! All mutations go through `&mut self`, so each user action runs to
//! completion before the next one starts.

use crate::navigation::{NavAction, NavButton, View, ViewRouter};
use crate::screens::{DashboardScreen, ListScreen, LoginScreen, RegisterScreen, Rendered};
use app_state::SessionController;
use campus_client::{ApiClient, ApiClientConfig, Assignment, CampusApi, School};
use std::sync::Arc;
use storage::TokenStore;

/// The SmartCampus application
pub struct App {
    session: SessionController,
    api: CampusApi,
    router: ViewRouter,
    login: LoginScreen,
    register: RegisterScreen,
    dashboard: DashboardScreen,
    schools: ListScreen<School>,
    assignments: ListScreen<Assignment>,
}

impl App {
    /// Create the application with a fresh client
    pub fn new(config: ApiClientConfig, store: Arc<dyn TokenStore>) -> campus_client::Result<Self> {
        Ok(Self::with_client(ApiClient::new(config)?, store))
    }

    /// Create the application over an existing client
    ///
    /// The stored token, if any, is restored and the initial view chosen
    /// from it.
    pub fn with_client(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let session = SessionController::new(store, client.clone());
        let router = ViewRouter::new(session.is_authenticated());

        Self {
            session,
            api: CampusApi::new(client),
            router,
            login: LoginScreen::new(),
            register: RegisterScreen::new(),
            dashboard: DashboardScreen,
            schools: ListScreen::new(View::Schools),
            assignments: ListScreen::new(View::Assignments),
        }
    }

    /// The view currently shown
    pub fn view(&self) -> View {
        self.router.current(self.session.is_authenticated())
    }

    /// Read access to the session
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Login form
    pub fn login_form(&self) -> &LoginScreen {
        &self.login
    }

    /// Login form, for editing fields
    pub fn login_form_mut(&mut self) -> &mut LoginScreen {
        &mut self.login
    }

    /// Registration form
    pub fn register_form(&self) -> &RegisterScreen {
        &self.register
    }

    /// Registration form, for editing fields
    pub fn register_form_mut(&mut self) -> &mut RegisterScreen {
        &mut self.register
    }

    /// Schools list state
    pub fn schools(&self) -> &ListScreen<School> {
        &self.schools
    }

    /// Assignments list state
    pub fn assignments(&self) -> &ListScreen<Assignment> {
        &self.assignments
    }

    /// "Register" link on the login view
    pub fn show_register(&mut self) -> View {
        self.dispatch(NavAction::ShowRegister)
    }

    /// "Back" on the register view
    pub fn back(&mut self) -> View {
        self.dispatch(NavAction::Back)
    }

    /// Submit the login form
    ///
    /// On success the token is handed to the session before the router
    /// moves to the dashboard. Returns whether the login succeeded.
    pub async fn submit_login(&mut self) -> bool {
        if self.view() != View::Login {
            return false;
        }

        let Some(token) = self.login.submit(&self.api).await else {
            return false;
        };

        if let Err(e) = self.session.set_token(Some(&token)) {
            tracing::warn!("Signed in, but the token was not persisted: {}", e);
        }

        self.dispatch(NavAction::LoggedIn);
        true
    }

    /// Submit the registration form
    ///
    /// Returns to the login view on success.
    pub async fn submit_register(&mut self) -> bool {
        if self.view() != View::Register {
            return false;
        }

        if !self.register.submit(&self.api).await {
            return false;
        }

        self.register = RegisterScreen::new();
        self.dispatch(NavAction::Registered);
        true
    }

    /// Switch between authenticated views
    ///
    /// Entering a list view fetches its collection.
    pub async fn navigate(&mut self, view: View) -> View {
        let shown = self.dispatch(NavAction::Navigate(view));

        match shown {
            View::Schools => {
                let ticket = self.schools.begin_load();
                let result = self.api.list_schools().await;
                self.schools.complete(ticket, result);
            }
            View::Assignments => {
                let ticket = self.assignments.begin_load();
                let result = self.api.list_assignments().await;
                self.assignments.complete(ticket, result);
            }
            _ => {}
        }

        shown
    }

    /// Press a header button
    pub async fn press(&mut self, button: NavButton) -> View {
        match button.action() {
            NavAction::Navigate(view) => self.navigate(view).await,
            _ => self.sign_out(),
        }
    }

    /// End the session and return to the login view
    ///
    /// Always lands on the login view, even if the stored token could not
    /// be removed.
    pub fn sign_out(&mut self) -> View {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Signed out, but the stored token was not removed: {}", e);
        }

        self.login = LoginScreen::new();
        self.register = RegisterScreen::new();
        self.dispatch(NavAction::SignOut)
    }

    /// Render the current view
    pub fn render(&self) -> Rendered {
        let view = self.view();

        let rendered = match view {
            View::Login => self.login.render(),
            View::Register => self.register.render(),
            View::Dashboard => self.dashboard.render(),
            View::Schools => self.schools.render(),
            View::Assignments => self.assignments.render(),
        };

        if view.requires_auth() {
            rendered.navigation(NavButton::all().iter().map(NavButton::label))
        } else {
            rendered
        }
    }

    fn dispatch(&mut self, action: NavAction) -> View {
        let previous = self.view();
        let shown = self.router.dispatch(action, self.session.is_authenticated());

        if previous != shown {
            match previous {
                View::Schools => self.schools.unmount(),
                View::Assignments => self.assignments.unmount(),
                _ => {}
            }
            tracing::debug!("View {:?} -> {:?}", previous, shown);
        }

        shown
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").field("view", &self.view()).field("session", &self.session).finish()
    }
}
