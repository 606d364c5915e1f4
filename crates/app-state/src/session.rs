//! Session controller
//!
//! Holds the current bearer token, persists it through a [`TokenStore`],
//! and keeps the API client's authorization header in step with it.
//!
//! # Example
//!
//! ```rust
//! use app_state::session::SessionController;
//! use campus_client::{ApiClient, ApiClientConfig};
//! use std::sync::Arc;
//! use storage::MemoryTokenStore;
//!
//! let client = ApiClient::new(ApiClientConfig::default()).unwrap();
//! let mut session = SessionController::new(Arc::new(MemoryTokenStore::new()), client.clone());
//!
//! session.set_token(Some("abc")).unwrap();
//! assert_eq!(client.authorization(), Some("Bearer abc".to_string()));
//!
//! session.clear().unwrap();
//! assert_eq!(client.authorization(), None);
//! ```

use campus_client::ApiClient;
use std::sync::Arc;
use storage::{KvError, TokenStore};
use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token could not be written to or removed from storage
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Session change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A token was set
    SignedIn,
    /// The token was cleared
    SignedOut,
}

/// Callback invoked after each session change
pub type SessionCallback = Arc<dyn Fn(SessionEvent) + Send + Sync>;

/// Owner of the current session token
///
/// The token, the client's authorization header, and the stored entry are
/// updated together in [`SessionController::set_token`]; no caller can see
/// the new token before the header matches it.
pub struct SessionController {
    /// Current token; never `Some("")`
    token: Option<String>,

    /// Durable token storage
    store: Arc<dyn TokenStore>,

    /// Client whose authorization header tracks the token
    client: ApiClient,

    /// Session event callbacks
    callbacks: Vec<SessionCallback>,
}

impl SessionController {
    /// Create a controller, restoring any stored token
    ///
    /// A stored empty string counts as no token. A failed read is logged
    /// and treated as no token.
    pub fn new(store: Arc<dyn TokenStore>, client: ApiClient) -> Self {
        let token = match store.load() {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to load stored token: {}", e);
                None
            }
        };

        client.configure_auth(token.as_deref().unwrap_or_default());

        Self { token, store, client, callbacks: Vec::new() }
    }

    /// Current token, if signed in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a non-empty token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Get the client this session configures
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Replace the current token
    ///
    /// `None` and `Some("")` both sign out. The in-memory token and the
    /// authorization header always change; a storage failure is returned
    /// after the fact.
    pub fn set_token(&mut self, token: Option<&str>) -> Result<()> {
        let token = token.filter(|token| !token.is_empty()).map(str::to_string);

        self.client.configure_auth(token.as_deref().unwrap_or_default());
        self.token = token;

        let (persisted, event) = match &self.token {
            Some(token) => (self.store.save(token), SessionEvent::SignedIn),
            None => (self.store.clear(), SessionEvent::SignedOut),
        };

        if let Err(e) = &persisted {
            tracing::warn!("Failed to persist session change: {}", e);
        }

        match event {
            SessionEvent::SignedIn => tracing::info!("Session token set"),
            SessionEvent::SignedOut => tracing::info!("Session token cleared"),
        }

        for callback in &self.callbacks {
            callback(event);
        }

        persisted.map_err(SessionError::from)
    }

    /// Sign out
    pub fn clear(&mut self) -> Result<()> {
        self.set_token(None)
    }

    /// Register a session event callback
    pub fn on_session_event<F>(&mut self, callback: F)
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("authenticated", &self.is_authenticated())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
