//! One-time login challenges, bound to the requester's source IP

use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::rngs::OsRng;
use rand::Rng;

use crate::error::{AuthError, AuthResult};

/// Testnet names prefixed onto challenge values. Readability only; the
/// random suffix carries all the entropy.
pub const CHALLENGE_WORDS: &[&str] =
    &["Olympic", "Morden", "Ropsten", "Rinkeby", "Kovan", "Goerli"];

/// Issued challenges stay redeemable for two hours.
pub const CHALLENGE_TTL: Duration = Duration::from_secs(60 * 60 * 2);

const SUFFIX_LEN: usize = 13;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub(crate) fn random_base36(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[derive(Clone, Debug)]
pub struct Challenge {
    /// `<word>-<base36 suffix>`, unguessable within the TTL window.
    pub value: String,
    pub issued_at: Instant,
    pub requester: IpAddr,
}

/// Ordered collection of outstanding challenges.
///
/// Find-and-remove is a single critical section, so two concurrent
/// verifications can never both redeem the same entry. Expired entries are
/// evicted lazily, during the scans that redemption attempts trigger.
pub struct ChallengeStore {
    entries: Mutex<Vec<Challenge>>,
    ttl: Duration,
}

impl ChallengeStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ttl,
        }
    }

    pub fn issue(&self, requester: IpAddr) -> Challenge {
        let mut rng = OsRng;
        let word = CHALLENGE_WORDS[rng.gen_range(0..CHALLENGE_WORDS.len())];
        let challenge = Challenge {
            value: format!("{word}-{}", random_base36(SUFFIX_LEN)),
            issued_at: Instant::now(),
            requester,
        };
        self.entries.lock().unwrap().push(challenge.clone());
        challenge
    }

    /// Atomically remove and return the oldest live challenge bound to
    /// `requester`, evicting every expired entry seen along the way.
    ///
    /// The returned challenge is gone from the store: the caller gets exactly
    /// one verification attempt per challenge, and a failed attempt does not
    /// restore it.
    pub fn take_match(&self, requester: IpAddr) -> AuthResult<Challenge> {
        let mut entries = self.entries.lock().unwrap();
        let mut saw_expired = false;
        let ttl = self.ttl;
        entries.retain(|c| {
            let live = c.issued_at.elapsed() < ttl;
            if !live && c.requester == requester {
                saw_expired = true;
            }
            live
        });
        match entries.iter().position(|c| c.requester == requester) {
            Some(idx) => Ok(entries.remove(idx)),
            None if saw_expired => Err(AuthError::ChallengeExpired),
            None => Err(AuthError::ChallengeNotFound),
        }
    }

    /// Number of outstanding (not yet consumed or evicted) challenges.
    pub fn outstanding(&self) -> usize {
        self.entries.lock().unwrap().len()
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
    fn issue_produces_tagged_base36_value() {
        let store = ChallengeStore::new(CHALLENGE_TTL);
        let challenge = store.issue(ip(1));

        let (word, suffix) = challenge.value.split_once('-').unwrap();
        assert!(CHALLENGE_WORDS.contains(&word));
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn take_match_consumes_entry() {
        let store = ChallengeStore::new(CHALLENGE_TTL);
        let issued = store.issue(ip(1));

        let taken = store.take_match(ip(1)).unwrap();
        assert_eq!(taken.value, issued.value);
        assert_eq!(store.outstanding(), 0);
        assert!(matches!(
            store.take_match(ip(1)),
            Err(AuthError::ChallengeNotFound)
        ));
    }

    #[test]
    fn take_match_is_bound_to_requester() {
        let store = ChallengeStore::new(CHALLENGE_TTL);
        store.issue(ip(1));

        assert!(matches!(
            store.take_match(ip(2)),
            Err(AuthError::ChallengeNotFound)
        ));
        // The entry survives the failed foreign attempt.
        assert_eq!(store.outstanding(), 1);
        assert!(store.take_match(ip(1)).is_ok());
    }

    #[test]
    fn earliest_issued_wins() {
        let store = ChallengeStore::new(CHALLENGE_TTL);
        let first = store.issue(ip(1));
        let second = store.issue(ip(1));

        assert_eq!(store.take_match(ip(1)).unwrap().value, first.value);
        assert_eq!(store.take_match(ip(1)).unwrap().value, second.value);
    }

    #[test]
    fn expired_entries_never_match_and_are_evicted() {
        let store = ChallengeStore::new(Duration::from_millis(10));
        store.issue(ip(1));
        store.issue(ip(2));
        std::thread::sleep(Duration::from_millis(25));

        assert!(matches!(
            store.take_match(ip(1)),
            Err(AuthError::ChallengeExpired)
        ));
        // The scan also swept the other requester's dead entry.
        assert_eq!(store.outstanding(), 0);
        assert!(matches!(
            store.take_match(ip(2)),
            Err(AuthError::ChallengeNotFound)
        ));
    }

    #[test]
    fn live_entry_still_matches_after_sweep() {
        let store = ChallengeStore::new(Duration::from_millis(40));
        store.issue(ip(1));
        std::thread::sleep(Duration::from_millis(60));
        let fresh = store.issue(ip(1));

        assert_eq!(store.take_match(ip(1)).unwrap().value, fresh.value);
    }
}
