//! Home page of the documentation site.

use crate::base::PageObject;
use async_trait::async_trait;
use vantage_browser::{Locator, Result, Role, Session};

/// The landing page: navigation menu, search box, and the "Get started"
/// call to action.
pub struct HomePage<'a> {
    session: &'a Session,
    get_started: Locator,
    search_box: Locator,
    navigation: Locator,
}

impl<'a> HomePage<'a> {
    /// Bind a home page to a session.
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            get_started: Locator::role(Role::Link, "Get started"),
            search_box: Locator::placeholder("Search docs"),
            navigation: Locator::role_only(Role::Navigation),
        }
    }

    /// Follow the "Get started" link.
    pub async fn click_get_started(&self) -> Result<()> {
        self.session.click(&self.get_started).await
    }

    /// Type a query into the search box and submit it.
    pub async fn search(&self, query: &str) -> Result<()> {
        tracing::debug!(query, "searching docs");
        self.session.fill(&self.search_box, query).await?;
        self.session.press(&self.search_box, "Enter").await
    }

    /// Assert the page's defining elements are visible.
    pub async fn verify_loaded(&self) -> Result<()> {
        self.session
            .expect_visible(&self.get_started, "\"Get started\" link")
            .await?;
        self.session
            .expect_visible(&self.navigation, "navigation menu")
            .await
    }
}

#[async_trait]
impl PageObject for HomePage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/"
    }
}
