//! Network predicates and response mocking rules.
//!
//! These are the pure halves of the session's network helpers: a
//! [`ResponsePredicate`] decides which observed response a wait matches,
//! and a [`MockRule`] decides which requests receive a synthesized
//! response. The session wires them to the collaborator's event and
//! interception streams.

use crate::error::{BrowserError, Result};
use regex::Regex;
use std::fmt;
use url::Url;

/// Matches an observed network response by URL substring and status.
///
/// Status defaults to 200, which is what API-readiness waits almost
/// always mean.
#[derive(Debug, Clone)]
pub struct ResponsePredicate {
    url_contains: String,
    status: i64,
}

impl ResponsePredicate {
    /// Match responses whose URL contains the given substring.
    pub fn url_contains(fragment: impl Into<String>) -> Self {
        Self {
            url_contains: fragment.into(),
            status: 200,
        }
    }

    /// Narrow the predicate to a specific status code.
    #[must_use]
    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    /// Whether a response with this URL and status satisfies the predicate.
    #[must_use]
    pub fn matches(&self, url: &str, status: i64) -> bool {
        status == self.status && url.contains(&self.url_contains)
    }
}

impl fmt::Display for ResponsePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "url contains {:?}, status {}", self.url_contains, self.status)
    }
}

/// A network response observed while waiting.
#[derive(Debug, Clone)]
pub struct ObservedResponse {
    /// Full response URL
    pub url: String,
    /// HTTP status code
    pub status: i64,
}

/// An interception rule mapping a URL pattern to a canned JSON response.
///
/// Patterns are glob-style: `*` matches any run of characters. A pattern
/// without a scheme (e.g. `/api/login`) is matched against the request
/// URL's path, so callers don't have to care which host the app talks to.
#[derive(Debug, Clone)]
pub struct MockRule {
    pattern: String,
    regex: Regex,
    body: String,
}

impl MockRule {
    /// Build a rule serving `payload` as a 200 JSON response for URLs
    /// matching `pattern`.
    pub fn new(pattern: &str, payload: &serde_json::Value) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: glob_to_regex(pattern)?,
            body: payload.to_string(),
        })
    }

    /// The pattern this rule was registered with.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The serialized JSON body this rule serves.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether a request URL matches this rule.
    ///
    /// Schemeless patterns compare against the URL's path; full patterns
    /// compare against the whole URL.
    #[must_use]
    pub fn matches(&self, request_url: &str) -> bool {
        if self.regex.is_match(request_url) {
            return true;
        }
        if let Ok(parsed) = Url::parse(request_url) {
            return self.regex.is_match(parsed.path());
        }
        false
    }
}

/// Compile a `*` glob into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        if ch == '*' {
            expr.push_str(".*");
        } else {
            expr.push_str(&regex::escape(&ch.to_string()));
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|e| BrowserError::InvalidPattern(format!("{pattern}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_defaults_to_200() {
        let predicate = ResponsePredicate::url_contains("/api/session");
        assert!(predicate.matches("https://app.example.com/api/session", 200));
        assert!(!predicate.matches("https://app.example.com/api/session", 500));
        assert!(!predicate.matches("https://app.example.com/health", 200));
    }

    #[test]
    fn test_predicate_with_status() {
        let predicate = ResponsePredicate::url_contains("/api/login").with_status(401);
        assert!(predicate.matches("https://app.example.com/api/login", 401));
        assert!(!predicate.matches("https://app.example.com/api/login", 200));
    }

    #[test]
    fn test_path_pattern_matches_any_host() {
        let rule = MockRule::new("/api/x", &json!({"a": 1})).expect("build rule");
        assert!(rule.matches("https://app.example.com/api/x"));
        assert!(rule.matches("http://localhost:3000/api/x"));
        assert!(!rule.matches("https://app.example.com/api/xyz"));
    }

    #[test]
    fn test_glob_pattern() {
        let rule = MockRule::new("*/api/users/*", &json!([])).expect("build rule");
        assert!(rule.matches("https://app.example.com/api/users/42"));
        assert!(!rule.matches("https://app.example.com/api/teams/42"));
    }

    #[test]
    fn test_full_url_pattern() {
        let rule = MockRule::new("https://mock.invalid/api/x", &json!({"a": 1}))
            .expect("build rule");
        assert!(rule.matches("https://mock.invalid/api/x"));
        assert!(!rule.matches("https://other.invalid/api/x"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let rule = MockRule::new("/api/v1.0/items", &json!([])).expect("build rule");
        assert!(rule.matches("https://app.example.com/api/v1.0/items"));
        assert!(!rule.matches("https://app.example.com/api/v1x0/items"));
    }

    #[test]
    fn test_body_is_serialized_json() {
        let rule = MockRule::new("/api/x", &json!({"a": 1})).expect("build rule");
        assert_eq!(rule.body(), "{\"a\":1}");
    }
}
