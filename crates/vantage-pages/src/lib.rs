//! Page objects for the Vantage E2E suite.
//!
//! Each page type binds a borrowed [`vantage_browser::Session`] to a
//! fixed set of named locators and exposes intent-level actions. Pages
//! carry no mutable state; every action re-resolves its locators against
//! the live DOM. Scenario specifications live under `tests/`.

pub mod base;
pub mod home;
pub mod login;

pub use base::PageObject;
pub use home::HomePage;
pub use login::LoginPage;
