//! Vantage Core - Foundation crate for the Vantage E2E test suite.
//!
//! This crate provides shared configuration, test fixture generation, and
//! logging setup that the browser and page-object crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with environment overrides
//! - [`types`] - Test fixture generation (`TestFixture`)
//! - [`logging`] - Tracing setup for test binaries
//!
//! # Example
//!
//! ```rust
//! use vantage_core::{AppConfig, TestFixture};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(config.browser.headless);
//!
//! let fixture = TestFixture::generate();
//! assert!(fixture.email.ends_with("@example.com"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, TargetConfig, TimeoutConfig};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_test_logging;
pub use types::TestFixture;
