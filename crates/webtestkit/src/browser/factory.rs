// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// BrowserFactory - launches one browser per scenario from its tag

use crate::browser::kind::BrowserKind;
use crate::browser::session::BrowserSession;
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{debug, warn};

/// Launches browser sessions for scenarios.
///
/// The factory is stateless; each call owns its own browser process. The
/// scenario owns the returned [`BrowserSession`] exclusively and must close
/// it in teardown (closing is idempotent, so teardown is safe to run on
/// every exit path).
pub struct BrowserFactory;

impl BrowserFactory {
    /// Selects the browser kind from scenario tags and launches it.
    ///
    /// Fails with `UnsupportedBrowser` when no recognized `@Browser:<Name>`
    /// tag is present, and with `BrowserLaunch` when the engine cannot
    /// start.
    pub async fn launch_for_tags<S: AsRef<str>>(
        tags: &[S],
        config: &HarnessConfig,
    ) -> Result<BrowserSession> {
        let kind = BrowserKind::from_tags(tags)?;
        Self::launch(kind, config).await
    }

    /// Launches a browser of the given kind.
    pub async fn launch(kind: BrowserKind, config: &HarnessConfig) -> Result<BrowserSession> {
        debug!(browser = %kind, headless = config.headless, "launching browser");

        let mut builder = BrowserConfig::builder().window_size(1280, 720);
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = kind.executable() {
            debug!(browser = %kind, path = %executable.display(), "using branded executable");
            builder = builder.chrome_executable(executable);
        }
        let browser_config = builder.build().map_err(Error::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|err| Error::BrowserLaunch(err.to_string()))?;

        // The handler stream must be polled for the whole session lifetime;
        // it carries every CDP message for this browser process.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    warn!(%err, "browser handler stopped");
                    break;
                }
            }
        });

        BrowserSession::start(kind, browser, handler_task, config).await
    }
}
