//! Authentication context threaded into the HTTP client

use crate::error::Result;
use crate::token_store::{MemoryTokenStore, TokenStore};
use std::sync::Arc;
use tracing::warn;

/// Storage key the bearer token lives under unless configured otherwise
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Where the client finds its bearer token
///
/// The token is looked up on every call, so a token stored or cleared
/// after the client was built is picked up by the next request.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    token_key: String,
}

impl Session {
    /// Create a session over `store` using the default `token` key
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_key(store, DEFAULT_TOKEN_KEY)
    }

    /// Create a session over `store` reading the token from `token_key`
    pub fn with_key(store: Arc<dyn TokenStore>, token_key: impl Into<String>) -> Self {
        Self {
            store,
            token_key: token_key.into(),
        }
    }

    /// Session with no token at all
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Session holding `token` in memory only
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryTokenStore::with_entry(
            DEFAULT_TOKEN_KEY,
            token.into(),
        )))
    }

    /// Storage key the token is read from
    #[must_use]
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Current bearer token, if one is stored
    ///
    /// A failed or empty read yields `None`; the request then goes out
    /// unauthenticated and the server decides what to do with it.
    pub async fn bearer_token(&self) -> Option<String> {
        match self.store.get(&self.token_key).await {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, key = %self.token_key, "could not read bearer token, sending request without it");
                None
            }
        }
    }

    /// Persist `token` for subsequent requests
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be written
    pub async fn store_token(&self, token: &str) -> Result<()> {
        self.store.set(&self.token_key, token).await
    }

    /// Forget the stored token
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be written
    pub async fn clear_token(&self) -> Result<()> {
        self.store.remove(&self.token_key).await
    }
}
