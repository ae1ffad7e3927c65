// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Access-token retrieval and the run-scoped token store

use crate::api::models::{AuthenticationResponse, LoginRequest};
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Bearer tokens obtained during this run, keyed by username.
///
/// Created once per test run and handed (cloned) to whichever component
/// needs authentication; clones share the same map. Re-login for a
/// username overwrites its entry. Writes for different usernames are
/// independent; a re-login racing a read of the same username has no
/// ordering guarantee.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore::default()
    }

    /// Inserts or overwrites the token for a username.
    pub fn insert(&self, username: impl Into<String>, token: impl Into<String>) {
        self.inner.write().insert(username.into(), token.into());
    }

    /// The last-obtained token for a username.
    pub fn get(&self, username: &str) -> Option<String> {
        self.inner.read().get(username).cloned()
    }

    /// Number of usernames with a cached token.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Retrieves access tokens from the login endpoint.
pub struct AccessTokenRetriever;

impl AccessTokenRetriever {
    /// Logs in against the configured API and caches the obtained token.
    ///
    /// Opens a short-lived HTTP client against `BASE_API_URL`, posts the
    /// credentials to `/api/authaccount/login` and extracts `Data.Token`
    /// from the JSON response. A response without a token - or with an
    /// empty or whitespace-only one - fails with `Authentication` and
    /// leaves the store untouched. On success the token is upserted under
    /// the username and returned.
    pub async fn obtain(
        config: &HarnessConfig,
        store: &TokenStore,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let url = config.require_base_api_url()?.join("/api/authaccount/login")?;
        debug!(%url, %username, "obtaining access token");

        let client = reqwest::Client::builder().cookie_store(true).build()?;
        let response = client
            .post(url)
            .json(&LoginRequest {
                email: username.to_owned(),
                password: password.to_owned(),
            })
            .send()
            .await?;

        let status = response.status();
        let body: AuthenticationResponse = response.json().await.map_err(|err| {
            Error::Authentication(format!(
                "login returned status {status} with an unreadable body: {err}"
            ))
        })?;

        let token = body
            .token()
            .ok_or_else(|| {
                Error::Authentication(format!(
                    "login for '{username}' returned status {status} without a usable Data.Token"
                ))
            })?
            .to_owned();

        store.insert(username, token.clone());
        debug!(%username, "access token cached");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_existing_entries() {
        let store = TokenStore::new();
        store.insert("user@test.com", "first");
        store.insert("user@test.com", "second");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("user@test.com").as_deref(), Some("second"));
    }

    #[test]
    fn clones_share_the_same_map() {
        let store = TokenStore::new();
        let clone = store.clone();
        store.insert("a@test.com", "token-a");
        assert_eq!(clone.get("a@test.com").as_deref(), Some("token-a"));
    }

    #[test]
    fn distinct_usernames_do_not_collide() {
        let store = TokenStore::new();
        store.insert("a@test.com", "token-a");
        store.insert("b@test.com", "token-b");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b@test.com").as_deref(), Some("token-b"));
    }
}
