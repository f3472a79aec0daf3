//! Bearer-authenticated HTTP client for the admin REST API
//!
//! The client reads its token from a [`TokenStore`] through an explicit
//! [`Session`] on every request instead of consulting global state.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod api_client;
pub mod error;
pub mod session;
pub mod token_store;

// Re-export the main types
pub use api::{AdminApi, endpoints};
pub use api_client::{ApiClient, ClientConfig};
pub use error::{ClientError, Result};
pub use reqwest::StatusCode;
pub use session::{DEFAULT_TOKEN_KEY, Session};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
