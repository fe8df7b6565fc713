//! Short-lived stream access tokens

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::challenge::random_base36;

/// Stream tokens outlive the signing ceremony by a day.
pub const STREAM_TOKEN_TTL: Duration = Duration::from_secs(60 * 60 * 24);

const TOKEN_LEN: usize = 13;

/// A session credential unlocking the protected byte stream.
///
/// Unlike challenges, stream tokens are multi-use: they stay valid for every
/// request from the bound identity until they expire.
#[derive(Clone, Debug)]
pub struct StreamToken {
    pub value: String,
    pub bound_to: IpAddr,
    pub expires_at: Instant,
}

impl StreamToken {
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Outstanding stream tokens keyed by value.
///
/// Expired entries are reaped by `sweep_expired`, which the stream endpoint
/// invokes after a failed validation rather than on a schedule.
pub struct StreamTokenStore {
    tokens: Mutex<HashMap<String, StreamToken>>,
    ttl: Duration,
}

impl StreamTokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn issue(&self, bound_to: IpAddr) -> StreamToken {
        let token = StreamToken {
            value: random_base36(TOKEN_LEN),
            bound_to,
            expires_at: Instant::now() + self.ttl,
        };
        self.tokens
            .lock()
            .unwrap()
            .insert(token.value.clone(), token.clone());
        token
    }

    /// True iff a token with this value exists, is bound to `requester`, and
    /// is unexpired. Never consumes the token.
    pub fn validate(&self, value: &str, requester: IpAddr) -> bool {
        let tokens = self.tokens.lock().unwrap();
        match tokens.get(value) {
            Some(token) if token.bound_to != requester => {
                tracing::debug!(%requester, "stream token identity mismatch");
                false
            }
            Some(token) if token.is_expired() => {
                tracing::debug!("stream token expired");
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Drop every expired token; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, token| !token.is_expired());
        before - tokens.len()
    }

    pub fn active(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn validate_matches_value_and_identity() {
        let store = StreamTokenStore::new(STREAM_TOKEN_TTL);
        let token = store.issue(ip(1));

        assert!(store.validate(&token.value, ip(1)));
        assert!(!store.validate(&token.value, ip(2)));
        assert!(!store.validate("nosuchtoken", ip(1)));
    }

    #[test]
    fn tokens_are_multi_use() {
        let store = StreamTokenStore::new(STREAM_TOKEN_TTL);
        let token = store.issue(ip(1));

        assert!(store.validate(&token.value, ip(1)));
        assert!(store.validate(&token.value, ip(1)));
        assert_eq!(store.active(), 1);
    }

    #[test]
    fn expired_tokens_fail_validation() {
        let store = StreamTokenStore::new(Duration::from_millis(10));
        let token = store.issue(ip(1));
        std::thread::sleep(Duration::from_millis(25));

        assert!(!store.validate(&token.value, ip(1)));
        // Identity mismatch and expiry both fail, independently or combined.
        assert!(!store.validate(&token.value, ip(2)));
    }

    #[test]
    fn sweep_removes_only_expired() {
        let store = StreamTokenStore::new(Duration::from_millis(30));
        let stale = store.issue(ip(1));
        std::thread::sleep(Duration::from_millis(50));
        let fresh = store.issue(ip(1));

        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.active(), 1);
        assert!(!store.validate(&stale.value, ip(1)));
        assert!(store.validate(&fresh.value, ip(1)));
    }
}
