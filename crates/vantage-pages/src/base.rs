//! Shared page-object behavior.

use async_trait::async_trait;
use vantage_browser::{Result, Session};

/// Behavior common to every page object.
///
/// Pages hold a borrowed [`Session`]; the only shared behavior is
/// navigation, provided here so concrete pages compose rather than
/// inherit it.
#[async_trait]
pub trait PageObject: Sync {
    /// The session this page is bound to.
    fn session(&self) -> &Session;

    /// Path that identifies this page, relative to the configured base URL.
    fn path(&self) -> &str;

    /// Navigate to this page and wait for the load to settle.
    async fn open(&self) -> Result<()> {
        self.navigate(self.path()).await
    }

    /// Navigate to an arbitrary relative or absolute path.
    async fn navigate(&self, path: &str) -> Result<()> {
        self.session().navigate(path).await
    }
}
