//! User interface for SmartCampus
//!
//! This crate holds the view layer: the router that decides which view is
//! shown, the screens with their form and list state, and the [`App`] root
//! that ties them to the session and the backend API.
//!
//! # Modules
//!
//! - [`navigation`] - Views, header buttons, and the view router
//! - [`screens`] - Login, register, dashboard, and list screens
//! - [`app`] - Application root
//!
//! # Example
//!
//! ```rust
//! use app_ui::{App, View};
//! use campus_client::ApiClientConfig;
//! use std::sync::Arc;
//! use storage::MemoryTokenStore;
//!
//! let app = App::new(ApiClientConfig::default(), Arc::new(MemoryTokenStore::new())).unwrap();
//! assert_eq!(app.view(), View::Login);
//! assert_eq!(app.render().title, "SmartCampus Login (demo)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod navigation;
pub mod screens;

// Re-export commonly used types
pub use app::App;

pub use navigation::{NavAction, NavButton, View, ViewRouter};

pub use screens::{
    DashboardScreen, ListItem, ListScreen, LoadTicket, LoginScreen, RegisterScreen, Rendered,
};
