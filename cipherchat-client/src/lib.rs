//! Chat client core for cipherchat.
//!
//! Everything between the UI and the backend:
//! - HTTP API client for the user directory and message store
//! - Durable private-key storage keyed by user id
//! - Session controller for register / login / send flows
//! - Per-message disclosure policy (decrypt, cached plaintext, or opaque)
//! - Cancellable message poll loop
//!
//! The cryptography itself lives in `cipherchat-crypto`; this crate decides
//! when to invoke it and how failures degrade.

pub mod api_client;
pub mod config;
pub mod error;
pub mod key_store;
pub mod policy;
pub mod poller;
pub mod session;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use types::*;
