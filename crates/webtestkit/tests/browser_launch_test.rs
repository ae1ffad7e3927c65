// Browser launch integration tests
//
// These launch a real Chromium-family browser and are ignored by default;
// run them on a machine with a local browser install:
//
//   cargo test -p webtestkit --test browser_launch_test -- --ignored

use webtestkit::browser::{BrowserFactory, BrowserKind, ElementState, Locator, PageHandle, WaitOptions};
use webtestkit::config::HarnessConfig;

fn local_config() -> HarnessConfig {
    HarnessConfig {
        action_timeout_ms: 10_000,
        ..HarnessConfig::default()
    }
}

#[tokio::test]
#[ignore = "Requires a local Chromium install"]
async fn launched_session_reports_its_kind_and_closes_idempotently() {
    let config = local_config();
    let mut session = BrowserFactory::launch(BrowserKind::Chromium, &config)
        .await
        .unwrap();

    assert_eq!(session.kind(), BrowserKind::Chromium);
    assert_eq!(session.name(), "Chromium");
    assert!(session.version().await.unwrap().contains("Mozilla"));

    session.close().await.unwrap();
    assert!(session.is_closed());
    // Second close is a no-op.
    session.close().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires a local Chromium install"]
async fn page_actions_roundtrip_against_a_data_url() {
    let config = local_config();
    let mut session = BrowserFactory::launch(BrowserKind::Chromium, &config)
        .await
        .unwrap();
    let page = PageHandle::new(&session, &config);

    page.goto(
        "data:text/html,<html><body>\
         <h1 id='title'>Welcome</h1>\
         <input id='name' />\
         <input type='checkbox' id='agree' />\
         <button id='btn' onclick=\"this.textContent='Clicked'\">Click me</button>\
         </body></html>",
    )
    .await
    .unwrap();

    let title = Locator::css("#title");
    page.wait_for_state(&title, WaitOptions::state(ElementState::Visible))
        .await
        .unwrap();
    assert_eq!(page.inner_text(&title).await.unwrap(), "Welcome");

    let name = Locator::css("#name");
    page.fill(&name, "Ada Lovelace").await.unwrap();
    assert_eq!(page.input_value(&name).await.unwrap(), "Ada Lovelace");
    page.clear(&name).await.unwrap();
    assert_eq!(page.input_value(&name).await.unwrap(), "");

    let agree = Locator::css("#agree");
    page.check(&agree).await.unwrap();
    assert!(page.is_checked(&agree).await.unwrap());
    page.uncheck(&agree).await.unwrap();
    assert!(!page.is_checked(&agree).await.unwrap());

    let button = Locator::css("#btn");
    page.click(&button, None).await.unwrap();
    assert_eq!(page.inner_text(&button).await.unwrap(), "Clicked");

    let screenshot = session.screenshot().await.unwrap();
    assert!(!screenshot.is_empty());

    session.close().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires a local Chromium install"]
async fn missing_element_times_out_without_killing_the_session() {
    let config = HarnessConfig {
        action_timeout_ms: 500,
        ..local_config()
    };
    let mut session = BrowserFactory::launch(BrowserKind::Chromium, &config)
        .await
        .unwrap();
    let page = PageHandle::new(&session, &config);

    page.goto("data:text/html,<html><body><p>empty</p></body></html>")
        .await
        .unwrap();

    let missing = Locator::css("#never-there");
    let err = page.click(&missing, None).await.unwrap_err();
    assert!(matches!(err, webtestkit::Error::Timeout { .. }));

    // The timeout aborted only that call; the page is still usable.
    assert_eq!(page.inner_text(&Locator::css("p")).await.unwrap(), "empty");

    session.close().await.unwrap();
}
