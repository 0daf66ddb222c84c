use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{error::ServiceError, provider::Provider, utils};

/// Where a provider stands in the authorization-code flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Unauthenticated,
    AwaitingCallback,
    Authenticated,
    TokenInvalidated,
}

#[derive(Debug, Clone)]
struct PendingAuthorization {
    provider: Provider,
    issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    obtained_at: DateTime<Utc>,
    invalidated: bool,
}

#[derive(Debug, Default)]
struct Sessions {
    pending: HashMap<String, PendingAuthorization>,
    tokens: HashMap<Provider, AccessToken>,
}

/// In-memory OAuth state shared by all request handlers.
///
/// Holds the pending login attempts, keyed by their `state` value, and the
/// current access token of each provider. Cloning is cheap; clones share the
/// same store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    state_ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(state_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            state_ttl: chrono::Duration::from_std(state_ttl)
                .unwrap_or_else(|_| chrono::Duration::seconds(600)),
        }
    }

    /// Issues a fresh state value for a login attempt with `provider`.
    pub async fn begin_authorization(&self, provider: Provider) -> String {
        let state = utils::generate_state(utils::STATE_LENGTH);
        let now = Utc::now();

        let mut sessions = self.inner.lock().await;
        self.prune_expired(&mut sessions, now);
        sessions.pending.insert(
            state.clone(),
            PendingAuthorization {
                provider,
                issued_at: now,
            },
        );
        state
    }

    /// Consumes a pending state returned by a callback.
    ///
    /// `presented` yields the state value the browser holds for a provider
    /// (its cookie). The callback is accepted only if `state` is pending, has
    /// not expired, and matches what the browser presents for the same
    /// provider. A state is consumed only when the browser presents it, so a
    /// callback without the matching cookie cannot burn a legitimate login.
    /// A consumed state cannot be used again.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidState`] if any of the checks fail.
    pub async fn complete_authorization<F>(
        &self,
        state: &str,
        presented: F,
    ) -> Result<Provider, ServiceError>
    where
        F: FnOnce(Provider) -> Option<String>,
    {
        let now = Utc::now();
        let mut sessions = self.inner.lock().await;
        self.prune_expired(&mut sessions, now);

        let provider = sessions
            .pending
            .get(state)
            .map(|pending| pending.provider)
            .ok_or(ServiceError::InvalidState)?;

        match presented(provider) {
            Some(cookie) if cookie == state => {
                sessions.pending.remove(state);
                Ok(provider)
            }
            _ => Err(ServiceError::InvalidState),
        }
    }

    /// Stores the token for `provider`, replacing any previous one.
    pub async fn store_token(&self, provider: Provider, token: String) {
        let mut sessions = self.inner.lock().await;
        sessions.tokens.insert(
            provider,
            AccessToken {
                value: token,
                obtained_at: Utc::now(),
                invalidated: false,
            },
        );
    }

    /// Returns the usable token for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotAuthenticated`] if there is no token or the
    /// provider has rejected it.
    pub async fn token(&self, provider: Provider) -> Result<String, ServiceError> {
        let sessions = self.inner.lock().await;
        match sessions.tokens.get(&provider) {
            Some(token) if !token.invalidated => Ok(token.value.clone()),
            _ => Err(ServiceError::NotAuthenticated(provider)),
        }
    }

    /// Marks the token of `provider` as rejected upstream.
    pub async fn invalidate(&self, provider: Provider) {
        let mut sessions = self.inner.lock().await;
        if let Some(token) = sessions.tokens.get_mut(&provider) {
            token.invalidated = true;
        }
    }

    /// When the current token of `provider` was obtained, if there is one.
    pub async fn token_obtained_at(&self, provider: Provider) -> Option<DateTime<Utc>> {
        let sessions = self.inner.lock().await;
        sessions.tokens.get(&provider).map(|t| t.obtained_at)
    }

    pub async fn status(&self, provider: Provider) -> AuthStatus {
        let now = Utc::now();
        let sessions = self.inner.lock().await;

        match sessions.tokens.get(&provider) {
            Some(token) if !token.invalidated => return AuthStatus::Authenticated,
            Some(_) => return AuthStatus::TokenInvalidated,
            None => {}
        }

        let awaiting = sessions
            .pending
            .values()
            .any(|p| p.provider == provider && now - p.issued_at <= self.state_ttl);
        if awaiting {
            AuthStatus::AwaitingCallback
        } else {
            AuthStatus::Unauthenticated
        }
    }

    pub fn state_ttl(&self) -> chrono::Duration {
        self.state_ttl
    }

    fn prune_expired(&self, sessions: &mut Sessions, now: DateTime<Utc>) {
        let ttl = self.state_ttl;
        sessions
            .pending
            .retain(|_, pending| now - pending.issued_at <= ttl);
    }
}
