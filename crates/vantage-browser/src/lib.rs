//! Browser session layer for the Vantage E2E suite.
//!
//! Wraps chromiumoxide behind a [`Session`] handle: lazy [`Locator`]
//! resolution, intent-level element actions, response waiting, client
//! storage clearing, and JSON response mocking. Page objects live one
//! crate up, in `vantage-pages`.

pub mod engine;
pub mod error;
pub mod locator;
pub mod net;
pub mod session;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use locator::{Locator, Query, Role, Strategy};
pub use net::{MockRule, ObservedResponse, ResponsePredicate};
pub use session::Session;
