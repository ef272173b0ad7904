//! Expiring access-token cache
//!
//! Owned by whoever talks to the external catalog API and passed around
//! explicitly; there is no process-wide token state.

use chrono::{DateTime, Duration, Utc};

/// Tokens are treated as expired this long before their real expiry
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.checked_add_signed(Duration::seconds(REFRESH_MARGIN_SECS))
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    token: Option<CachedToken>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if it is still valid at `now`
    pub fn get(&self, now: DateTime<Utc>) -> Option<&str> {
        self.token
            .as_ref()
            .filter(|t| t.is_valid_at(now))
            .map(|t| t.value.as_str())
    }

    /// Replace the cached token. Lifetimes past the representable range are
    /// clamped to the earliest or latest timestamp.
    pub fn store(&mut self, value: String, expires_in: Duration, now: DateTime<Utc>) {
        let expires_at = now.checked_add_signed(expires_in).unwrap_or_else(|| {
            tracing::warn!("Token lifetime {} out of range, clamping expiry", expires_in);
            if expires_in < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            }
        });
        self.token = Some(CachedToken { value, expires_at });
    }

    /// Return the cached token, calling `fetch` for a new one when it is
    /// missing or about to expire. `fetch` returns the token and its lifetime.
    pub fn get_or_refresh<F, E>(&mut self, now: DateTime<Utc>, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<(String, Duration), E>,
    {
        if let Some(token) = self.get(now) {
            return Ok(token.to_string());
        }

        tracing::debug!("Refreshing access token");
        let (value, expires_in) = fetch()?;
        self.store(value.clone(), expires_in, now);
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}
