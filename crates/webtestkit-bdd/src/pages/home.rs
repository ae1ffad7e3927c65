// HomePage - the application's search page

use webtestkit::browser::{BrowserSession, Locator, PageHandle};
use webtestkit::config::HarnessConfig;
use webtestkit::Result;

/// The home page: cookie banner, search field, result list.
#[derive(Debug)]
pub struct HomePage {
    page: PageHandle,
}

impl HomePage {
    pub fn new(session: &BrowserSession, config: &HarnessConfig) -> Self {
        HomePage {
            page: PageHandle::new(session, config),
        }
    }

    fn accept_cookies_button() -> Locator {
        Locator::css("#accept-cookies")
    }

    fn search_field() -> Locator {
        Locator::css("#search")
    }

    fn search_button() -> Locator {
        Locator::css("button[name='search-go']").last()
    }

    fn first_result_text() -> Locator {
        Locator::css(".results .result-title").first()
    }

    /// Navigates to the configured base URL.
    pub async fn open(&self, config: &HarnessConfig) -> Result<()> {
        self.page.goto_base(config).await
    }

    pub async fn accept_cookies(&self) -> Result<()> {
        self.page.click(&Self::accept_cookies_button(), None).await
    }

    pub async fn fill_search_field(&self, text: &str) -> Result<()> {
        self.page.fill(&Self::search_field(), text).await
    }

    pub async fn click_search_button(&self) -> Result<()> {
        self.page.click(&Self::search_button(), None).await
    }

    pub async fn first_result(&self) -> Result<String> {
        self.page.inner_text(&Self::first_result_text()).await
    }
}
