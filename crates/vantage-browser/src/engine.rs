use crate::error::{BrowserError, Result};
use crate::session::Session;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network;
use futures::StreamExt;
use url::Url;
use vantage_core::config::{AppConfig, TimeoutConfig};

/// Browser automation engine.
///
/// Launches one Chromium process per engine and vends [`Session`]s, one
/// per test case. Sessions share the process but not a tab, so test
/// cases have no shared mutable state.
pub struct BrowserEngine {
    browser: Browser,
    base_url: Url,
    timeouts: TimeoutConfig,
}

impl BrowserEngine {
    /// Launch a Chromium instance configured from suite settings.
    pub async fn launch(config: &AppConfig) -> Result<Self> {
        let base_url = Url::parse(&config.target.base_url).map_err(|e| {
            BrowserError::InvalidUrl(format!("{}: {e}", config.target.base_url))
        })?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.browser.window_width, config.browser.window_height);
        if !config.browser.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(BrowserError::Chromium)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        // Drive the CDP connection for the life of the engine.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event");
                }
            }
        });

        tracing::info!(base_url = %base_url, "browser engine launched");
        Ok(Self {
            browser,
            base_url,
            timeouts: config.timeouts.clone(),
        })
    }

    /// Open a fresh tab and wrap it in a [`Session`].
    ///
    /// Network observation is enabled up front so response waits see
    /// every response from the first navigation onwards.
    pub async fn new_session(&self) -> Result<Session> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        page.execute(network::EnableParams::default())
            .await
            .map_err(|e| BrowserError::Chromium(e.to_string()))?;

        Ok(Session::new(page, self.base_url.clone(), &self.timeouts))
    }

    /// The base URL sessions join relative paths against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
