//! One browser tab, wrapped for page objects and test helpers.
//!
//! A [`Session`] is the handle every page object borrows. All element
//! interaction goes through [`Locator`]s resolved at the point of use,
//! so no stale element handle survives a navigation. Errors surface
//! unrecovered; the suite performs no retries.

use crate::error::{BrowserError, Result};
use crate::locator::{Locator, Query};
use crate::net::{MockRule, ObservedResponse, ResponsePredicate};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams as FetchEnableParams, EventRequestPaused,
    FulfillRequestParams, HeaderEntry, RequestId, RequestPattern,
};
use chromiumoxide::cdp::browser_protocol::network::EventResponseReceived;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use url::Url;
use vantage_core::config::TimeoutConfig;

/// Handle to one browser tab.
///
/// Owned by the test case; injected by reference into page objects.
/// Stateless between calls apart from the registered mock rules.
pub struct Session {
    page: Page,
    base_url: Url,
    nav_timeout: Duration,
    action_timeout: Duration,
    response_timeout: Duration,
    mocks: Arc<Mutex<Vec<MockRule>>>,
    interception: OnceCell<()>,
}

impl Session {
    pub(crate) fn new(page: Page, base_url: Url, timeouts: &TimeoutConfig) -> Self {
        Self {
            page,
            base_url,
            nav_timeout: Duration::from_secs(timeouts.navigation_secs),
            action_timeout: Duration::from_millis(timeouts.action_ms),
            response_timeout: Duration::from_millis(timeouts.response_wait_ms),
            mocks: Arc::new(Mutex::new(Vec::new())),
            interception: OnceCell::new(),
        }
    }

    /// The base URL relative paths are joined against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Load a relative or absolute path and wait for the load to settle.
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let target = join_url(&self.base_url, path)?;
        tracing::debug!(url = %target, "navigating");

        let navigation = async {
            self.page
                .goto(target.as_str())
                .await
                .map_err(|e| BrowserError::Navigation(format!("{target}: {e}")))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| BrowserError::Navigation(format!("{target}: {e}")))?;
            Ok(())
        };
        self.with_timeout(self.nav_timeout, "navigation", navigation)
            .await
    }

    /// Resolve a locator against the current DOM.
    pub async fn resolve(&self, locator: &Locator) -> Result<Element> {
        let found = match locator.to_query() {
            Query::Css(selector) => self.page.find_element(selector).await,
            Query::XPath(xpath) => self.page.find_xpath(xpath).await,
        };
        found.map_err(|e| {
            tracing::trace!(locator = %locator, error = %e, "locator did not resolve");
            BrowserError::ElementNotFound(locator.description().to_string())
        })
    }

    /// Resolve and click.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let action = async {
            let element = self.resolve(locator).await?;
            self.ensure_interactable(&element, locator).await?;
            element.click().await.map_err(|e| {
                BrowserError::ElementNotInteractable(format!("{}: {e}", locator.description()))
            })?;
            Ok(())
        };
        self.with_timeout(self.action_timeout, locator.description(), action)
            .await
    }

    /// Resolve, clear any existing value, and type the given text.
    pub async fn fill(&self, locator: &Locator, value: &str) -> Result<()> {
        let action = async {
            let element = self.resolve(locator).await?;
            self.ensure_interactable(&element, locator).await?;
            element.focus().await.map_err(|e| {
                BrowserError::ElementNotInteractable(format!("{}: {e}", locator.description()))
            })?;
            element
                .call_js_fn("function() { if ('value' in this) { this.value = ''; } }", false)
                .await
                .map_err(|e| BrowserError::Chromium(e.to_string()))?;
            element.type_str(value).await.map_err(|e| {
                BrowserError::ElementNotInteractable(format!("{}: {e}", locator.description()))
            })?;
            Ok(())
        };
        self.with_timeout(self.action_timeout, locator.description(), action)
            .await
    }

    /// Resolve and send a key press, e.g. "Enter" to submit.
    pub async fn press(&self, locator: &Locator, key: &str) -> Result<()> {
        let action = async {
            let element = self.resolve(locator).await?;
            self.ensure_interactable(&element, locator).await?;
            element.focus().await.map_err(|e| {
                BrowserError::ElementNotInteractable(format!("{}: {e}", locator.description()))
            })?;
            element.press_key(key).await.map_err(|e| {
                BrowserError::ElementNotInteractable(format!("{}: {e}", locator.description()))
            })?;
            Ok(())
        };
        self.with_timeout(self.action_timeout, locator.description(), action)
            .await
    }

    /// Rendered text of the first matching element.
    pub async fn text_of(&self, locator: &Locator) -> Result<String> {
        let element = self.resolve(locator).await?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(text.unwrap_or_default())
    }

    /// Whether the locator resolves to a visible element right now.
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        match self.resolve(locator).await {
            Ok(element) => element_visible(&element).await,
            Err(BrowserError::ElementNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Assert that the locator resolves to a visible element.
    ///
    /// `what` names the element in the failure message.
    pub async fn expect_visible(&self, locator: &Locator, what: &str) -> Result<()> {
        match self.resolve(locator).await {
            Ok(element) => {
                if element_visible(&element).await? {
                    Ok(())
                } else {
                    Err(BrowserError::Assertion {
                        expected: format!("{what} visible"),
                        observed: "element present but hidden".to_string(),
                    })
                }
            }
            Err(BrowserError::ElementNotFound(_)) => Err(BrowserError::Assertion {
                expected: format!("{what} visible"),
                observed: "element not found".to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Assert the locator's rendered text equals `expected` exactly
    /// (after trimming).
    pub async fn expect_text(&self, locator: &Locator, expected: &str) -> Result<()> {
        match self.resolve(locator).await {
            Ok(element) => {
                let observed = element
                    .inner_text()
                    .await
                    .map_err(|e| BrowserError::Chromium(e.to_string()))?
                    .unwrap_or_default();
                if observed.trim() == expected {
                    Ok(())
                } else {
                    Err(BrowserError::Assertion {
                        expected: format!("text {expected:?}"),
                        observed: format!("text {:?}", observed.trim()),
                    })
                }
            }
            Err(BrowserError::ElementNotFound(_)) => Err(BrowserError::Assertion {
                expected: format!("text {expected:?}"),
                observed: "element not found".to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Current page URL.
    pub async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?
            .ok_or_else(|| BrowserError::Chromium("page reported no URL".to_string()))
    }

    /// Current document title.
    pub async fn title(&self) -> Result<String> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(title.unwrap_or_default())
    }

    /// Evaluate an expression in the page, returning its JSON value.
    pub async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    /// Evaluate a function (async functions are awaited) in the page.
    pub async fn evaluate_fn(&self, function: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate_function(function)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    /// Clear localStorage and sessionStorage in the page. Idempotent.
    ///
    /// Opaque origins (data: URLs, bare about:blank) deny storage access;
    /// there is nothing to clear there, so that case is a no-op.
    pub async fn clear_client_storage(&self) -> Result<()> {
        self.evaluate_fn(
            "() => { try { window.localStorage.clear(); window.sessionStorage.clear(); } \
             catch (e) { /* opaque origin */ } }",
        )
        .await?;
        Ok(())
    }

    /// Wait for the first network response satisfying the predicate.
    ///
    /// Responses are observed in transport delivery order; times out
    /// after the configured response window.
    pub async fn wait_for_response(
        &self,
        predicate: ResponsePredicate,
    ) -> Result<ObservedResponse> {
        let mut responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        let wait = async {
            while let Some(event) = responses.next().await {
                let url = event.response.url.clone();
                let status = event.response.status;
                tracing::trace!(%url, status, "response observed");
                if predicate.matches(&url, status) {
                    return Ok(ObservedResponse { url, status });
                }
            }
            Err(BrowserError::Chromium(
                "response event stream closed".to_string(),
            ))
        };
        tokio::time::timeout(self.response_timeout, wait)
            .await
            .map_err(|_| {
                BrowserError::Timeout(format!(
                    "no response matching {predicate} within {}ms",
                    self.response_timeout.as_millis()
                ))
            })?
    }

    /// Register an interception rule serving `payload` as a 200 JSON
    /// response for requests matching `pattern`.
    ///
    /// Rules persist for the life of the session; when patterns overlap
    /// the most recently registered rule wins.
    pub async fn install_response_mock(
        &self,
        pattern: &str,
        payload: serde_json::Value,
    ) -> Result<()> {
        let rule = MockRule::new(pattern, &payload)?;
        tracing::debug!(pattern = rule.pattern(), "installing response mock");
        self.mocks.lock().await.push(rule);
        self.ensure_interception().await
    }

    /// Enable request interception and start the loop servicing paused
    /// requests. Runs once per session.
    ///
    /// The listener must be live before `Fetch.enable` takes effect:
    /// events are only delivered from subscription time onward, and a
    /// paused request with no consumer is never continued.
    async fn ensure_interception(&self) -> Result<()> {
        self.interception
            .get_or_try_init(|| async {
                let mut paused = self
                    .page
                    .event_listener::<EventRequestPaused>()
                    .await
                    .map_err(|e| BrowserError::Chromium(e.to_string()))?;

                let page = self.page.clone();
                let mocks = Arc::clone(&self.mocks);
                tokio::spawn(async move {
                    while let Some(event) = paused.next().await {
                        let url = event.request.url.clone();
                        let body = {
                            let rules = mocks.lock().await;
                            // newest rule wins on overlap
                            rules
                                .iter()
                                .rev()
                                .find(|rule| rule.matches(&url))
                                .map(|rule| rule.body().to_string())
                        };
                        let outcome = match body {
                            Some(body) => {
                                tracing::debug!(%url, "serving mocked response");
                                fulfill_json(&page, event.request_id.clone(), &body).await
                            }
                            None => page
                                .execute(ContinueRequestParams::new(event.request_id.clone()))
                                .await
                                .map(|_| ())
                                .map_err(|e| BrowserError::Chromium(e.to_string())),
                        };
                        if let Err(e) = outcome {
                            tracing::warn!(%url, error = %e, "request interception failed");
                        }
                    }
                });

                let params = FetchEnableParams::builder()
                    .pattern(RequestPattern::builder().url_pattern("*").build())
                    .build();
                self.page
                    .execute(params)
                    .await
                    .map_err(|e| BrowserError::Chromium(e.to_string()))?;
                Ok(())
            })
            .await
            .map(|_| ())
    }

    async fn ensure_interactable(&self, element: &Element, locator: &Locator) -> Result<()> {
        if element_visible(element).await? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotInteractable(format!(
                "{} is present but hidden",
                locator.description()
            )))
        }
    }

    async fn with_timeout<T>(
        &self,
        window: Duration,
        what: &str,
        operation: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(window, operation).await {
            Ok(result) => result,
            Err(_) => Err(BrowserError::Timeout(format!(
                "{what} exceeded {}ms",
                window.as_millis()
            ))),
        }
    }
}

/// Synthesize a 200 JSON response for a paused request.
async fn fulfill_json(page: &Page, request_id: RequestId, body: &str) -> Result<()> {
    let params = FulfillRequestParams::builder()
        .request_id(request_id)
        .response_code(200)
        .response_header(HeaderEntry::new("content-type", "application/json"))
        .body(BASE64.encode(body))
        .build()
        .map_err(BrowserError::Chromium)?;
    page.execute(params)
        .await
        .map_err(|e| BrowserError::Chromium(e.to_string()))?;
    Ok(())
}

/// Whether an element takes up space and is not styled invisible.
async fn element_visible(element: &Element) -> Result<bool> {
    const VISIBLE_FN: &str = "function() { \
        const style = window.getComputedStyle(this); \
        if (style.visibility === 'hidden' || style.display === 'none') { return false; } \
        const rect = this.getBoundingClientRect(); \
        return rect.width > 0 && rect.height > 0; }";
    let returns = element
        .call_js_fn(VISIBLE_FN, false)
        .await
        .map_err(|e| BrowserError::Chromium(e.to_string()))?;
    Ok(matches!(
        returns.result.value,
        Some(serde_json::Value::Bool(true))
    ))
}

/// Join a relative path against the base URL; absolute URLs pass through.
fn join_url(base: &Url, path: &str) -> Result<Url> {
    if let Ok(absolute) = Url::parse(path) {
        return Ok(absolute);
    }
    base.join(path)
        .map_err(|e| BrowserError::InvalidUrl(format!("{path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://docs.example.com").expect("valid base URL")
    }

    #[test]
    fn test_join_relative_path() {
        let url = join_url(&base(), "/login").expect("join path");
        assert_eq!(url.as_str(), "https://docs.example.com/login");
    }

    #[test]
    fn test_join_bare_segment() {
        let url = join_url(&base(), "search?q=getting+started").expect("join path");
        assert_eq!(
            url.as_str(),
            "https://docs.example.com/search?q=getting+started"
        );
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let url = join_url(&base(), "https://other.example.com/intro").expect("absolute URL");
        assert_eq!(url.as_str(), "https://other.example.com/intro");
    }

    #[test]
    fn test_data_url_passes_through() {
        let url = join_url(&base(), "data:text/html,<p>hi</p>").expect("data URL");
        assert_eq!(url.scheme(), "data");
    }
}
