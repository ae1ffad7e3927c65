//! webtestkit: browser and REST test-automation harness
//!
//! This crate provides the reusable pieces a behavior-driven test suite is
//! built from: layered configuration, a per-scenario browser session over
//! the Chrome DevTools Protocol, a page-object base with semantic element
//! actions, a cookie-carrying REST client with last-response retention, an
//! access-token retriever, and an HTML report model with renderer.
//!
//! The Gherkin step definitions and lifecycle hooks live in the companion
//! `webtestkit-bdd` crate; this crate has no dependency on any test
//! runner.
//!
//! # Examples
//!
//! ## Browser scenario
//!
//! ```ignore
//! use webtestkit::browser::{BrowserFactory, Locator, PageHandle};
//! use webtestkit::config::HarnessConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::load()?;
//!
//!     // Tags usually come from the running scenario
//!     let tags = ["UI".to_string(), "Browser:Chromium".to_string()];
//!     let mut session = BrowserFactory::launch_for_tags(&tags, &config).await?;
//!
//!     let page = PageHandle::new(&session, &config);
//!     page.goto_base(&config).await?;
//!     page.fill(&Locator::css("#search"), "webtestkit").await?;
//!     page.click(&Locator::css("#go"), None).await?;
//!     let heading = page.inner_text(&Locator::css("h1")).await?;
//!     assert!(!heading.is_empty());
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API scenario
//!
//! ```ignore
//! use webtestkit::api::{AccessTokenRetriever, RestClient, TokenStore};
//! use webtestkit::config::HarnessConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::load()?;
//!     let tokens = TokenStore::new();
//!
//!     let (email, password) = config.require_credentials()?;
//!     AccessTokenRetriever::obtain(&config, &tokens, email, password).await?;
//!
//!     let mut client = RestClient::new(config.require_base_api_url()?.clone())?;
//!     let response = client.get("/health").await?;
//!     assert_eq!(response.status(), 200);
//!     client.dispose();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod config;
mod error;
pub mod report;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use config::{DEFAULT_TIMEOUT_MS, HarnessConfig};

// Re-export the browser layer
pub use browser::{
    BrowserFactory, BrowserKind, BrowserSession, ClickOptions, ElementState, Locator,
    MouseButton, PageHandle, PressOptions, TypeOptions, WaitOptions,
};

// Re-export the REST layer
pub use api::{AccessTokenRetriever, ApiResponse, RestClient, TokenStore};

// Re-export reporting
pub use report::{ReportPaths, RunReport, ScenarioReport, StepReport, StepStatus};
