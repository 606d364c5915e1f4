//! Storage layer for SmartCampus
//!
//! This crate provides the durable key-value store and the token
//! persistence interface used by the session layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod token;

pub use kv::{KvConfig, KvError, KvStore};
pub use token::{KvTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
