//! webtestkit-bdd: the Gherkin face of webtestkit
//!
//! Binds the harness library to the cucumber runner:
//!
//! - [`HarnessWorld`] owns each scenario's exclusive resources (one
//!   browser session, one REST client) plus run-scoped shared state
//!   (configuration, token store)
//! - [`hooks`] wires `@UI` / `@API` tagged setup and guaranteed teardown
//! - [`pages`] holds the page objects scenarios drive
//! - [`steps`] maps step text to page-object and REST-client calls
//! - [`HtmlReportWriter`] turns cucumber lifecycle events into the HTML
//!   report, attaching screenshots on failure
//!
//! The runner lives in `tests/bdd.rs`; feature files under
//! `tests/features/`.

pub mod hooks;
pub mod pages;
pub mod report_writer;
pub mod run_context;
pub mod steps;
pub mod world;

pub use report_writer::{BrowserWorld, HtmlReportWriter};
pub use run_context::RunContext;
pub use world::HarnessWorld;
