// BrowserSession - one launched browser, one page, scenario-scoped

use crate::browser::kind::BrowserKind;
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A launched browser bound to one scenario.
///
/// Owns the browser process, the CDP event-handler task and a single page.
/// At most one session exists per scenario, and the session must be closed
/// before the next scenario starts. `close` is idempotent; dropping an
/// unclosed session still stops the handler task and lets the engine kill
/// the child process.
pub struct BrowserSession {
    kind: BrowserKind,
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    console_logs: Arc<Mutex<Vec<String>>>,
    console_task: Option<JoinHandle<()>>,
    closed: bool,
}

impl BrowserSession {
    /// Wires up a freshly launched browser: opens the scenario page and,
    /// when `capture_browser_logs` is set, starts draining console events.
    pub(crate) async fn start(
        kind: BrowserKind,
        browser: Browser,
        handler_task: JoinHandle<()>,
        config: &HarnessConfig,
    ) -> Result<Self> {
        let page = browser.new_page("about:blank").await?;

        let console_logs = Arc::new(Mutex::new(Vec::new()));
        let console_task = if config.capture_browser_logs {
            let mut events = page.event_listener::<EventConsoleApiCalled>().await?;
            let sink = Arc::clone(&console_logs);
            Some(tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    let parts: Vec<String> = event
                        .args
                        .iter()
                        .map(|arg| {
                            arg.value
                                .as_ref()
                                .map(ToString::to_string)
                                .or_else(|| arg.description.clone())
                                .unwrap_or_default()
                        })
                        .collect();
                    sink.lock()
                        .push(format!("[{:?}] {}", event.r#type, parts.join(" ")));
                }
            }))
        } else {
            None
        };

        Ok(BrowserSession {
            kind,
            browser,
            handler_task,
            page,
            console_logs,
            console_task,
            closed: false,
        })
    }

    /// The kind this session was launched as.
    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    /// Canonical browser name, matching the scenario tag that selected it.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The scenario's page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Browser version string, as the page reports it.
    pub async fn version(&self) -> Result<String> {
        let result = self.page.evaluate("navigator.userAgent").await?;
        result
            .into_value::<String>()
            .map_err(|err| Error::Cdp(err.to_string()))
    }

    /// PNG screenshot of the current page viewport.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let bytes = self
            .page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await?;
        Ok(bytes)
    }

    /// Console messages collected so far (empty unless
    /// `capture_browser_logs` was set at launch).
    pub fn console_logs(&self) -> Vec<String> {
        self.console_logs.lock().clone()
    }

    /// Closes the browser and releases every session resource.
    ///
    /// Safe to call more than once; only the first call does work.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        debug!(browser = %self.kind, "closing browser");
        if let Err(err) = self.browser.close().await {
            warn!(%err, "browser did not close cleanly");
        }
        let _ = self.browser.wait().await;

        if let Some(task) = self.console_task.take() {
            task.abort();
        }
        self.handler_task.abort();
        debug!(browser = %self.kind, "browser closed");
        Ok(())
    }

    /// Whether `close` has already run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Last-resort cleanup when a scenario aborted before teardown; the
        // engine's own Drop kills the child process.
        if let Some(task) = self.console_task.take() {
            task.abort();
        }
        self.handler_task.abort();
    }
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("kind", &self.kind)
            .field("closed", &self.closed)
            .finish()
    }
}
