//! Test fixture generation.
//!
//! Fixtures are disposable credential-like triples generated fresh per
//! call. Uniqueness comes from a process-wide monotonic counter seeded
//! once from the system clock, so two calls always differ within a
//! process and collide across processes only if they start within the
//! same millisecond.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed password used by generated fixtures.
///
/// Targets under test only validate shape, not entropy, so a stable
/// value keeps failures reproducible.
const FIXTURE_PASSWORD: &str = "TestPassword123!";

/// A disposable set of generated test credentials.
///
/// No identity beyond the call site and no persistence; ownership ends
/// with the test that generated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFixture {
    /// Generated unique username
    pub username: String,
    /// Generated unique email address
    pub email: String,
    /// Fixed well-formed password
    pub password: String,
}

impl TestFixture {
    /// Generate a fresh fixture.
    ///
    /// Every call in the same process yields a distinct username and
    /// email.
    #[must_use]
    pub fn generate() -> Self {
        let id = next_fixture_id();
        Self {
            username: format!("testuser_{id}"),
            email: format!("test{id}@example.com"),
            password: FIXTURE_PASSWORD.to_string(),
        }
    }
}

impl fmt::Display for TestFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Password deliberately omitted
        write!(f, "{} <{}>", self.username, self.email)
    }
}

/// Next fixture identifier: clock-seeded origin plus monotonic counter.
fn next_fixture_id() -> u64 {
    static ORIGIN: OnceLock<u64> = OnceLock::new();
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let origin = *ORIGIN.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(0))
    });
    origin + COUNTER.fetch_add(1, Ordering::Relaxed)
}
