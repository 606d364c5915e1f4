//! Application state for SmartCampus
//!
//! This crate owns the session: the current bearer token, its persistence,
//! and its synchronization with the API client.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;

pub use session::{SessionCallback, SessionController, SessionError, SessionEvent};
