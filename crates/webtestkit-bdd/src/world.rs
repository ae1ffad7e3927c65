// HarnessWorld - per-scenario state

use crate::pages::HomePage;
use crate::run_context;
use cucumber::World;
use std::sync::Arc;
use webtestkit::api::{RestClient, TokenStore};
use webtestkit::browser::BrowserSession;
use webtestkit::config::HarnessConfig;

/// One scenario's state.
///
/// The browser session and REST client are exclusive to the scenario and
/// torn down by the after-hook on every exit path. Configuration and the
/// token store are shared, run-scoped handles.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct HarnessWorld {
    pub config: Arc<HarnessConfig>,
    pub tokens: TokenStore,
    pub browser: Option<BrowserSession>,
    pub rest: Option<RestClient>,
    pub home_page: Option<HomePage>,
}

impl HarnessWorld {
    fn new() -> Self {
        let context = run_context::get();
        HarnessWorld {
            config: Arc::clone(&context.config),
            tokens: context.tokens.clone(),
            browser: None,
            rest: None,
            home_page: None,
        }
    }

    /// The scenario's browser session; panics (failing the scenario) when
    /// the scenario is not tagged `@UI`.
    pub fn browser(&self) -> &BrowserSession {
        self.browser
            .as_ref()
            .expect("no browser session - is the scenario tagged @UI with a @Browser:<Name> tag?")
    }

    /// The scenario's REST client; panics (failing the scenario) when the
    /// scenario is not tagged `@API`.
    pub fn rest(&self) -> &RestClient {
        self.rest
            .as_ref()
            .expect("no request context - is the scenario tagged @API?")
    }

    /// Mutable access to the scenario's REST client.
    pub fn rest_mut(&mut self) -> &mut RestClient {
        self.rest
            .as_mut()
            .expect("no request context - is the scenario tagged @API?")
    }

    /// The home page object, created by the first UI step that uses it.
    pub fn home_page(&mut self) -> &HomePage {
        if self.home_page.is_none() {
            let session = self
                .browser
                .as_ref()
                .expect("no browser session - is the scenario tagged @UI?");
            self.home_page = Some(HomePage::new(session, &self.config));
        }
        self.home_page.as_ref().expect("home page was just created")
    }
}
