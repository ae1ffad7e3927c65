// AccessTokenRetriever integration tests against the mock login endpoint


use test_server::TestApi;
use webtestkit::api::{AccessTokenRetriever, TokenStore};
use webtestkit::config::HarnessConfig;
use webtestkit::Error;

fn config_for(api: &TestApi) -> HarnessConfig {
    HarnessConfig {
        base_api_url: Some(api.base_url()),
        ..HarnessConfig::default()
    }
}

#[tokio::test]
async fn a_valid_login_caches_the_token_under_the_username() {
    let api = TestApi::start().await;
    let config = config_for(&api);
    let tokens = TokenStore::new();

    let token = AccessTokenRetriever::obtain(&config, &tokens, "user@test.com", "pw")
        .await
        .unwrap();

    assert_eq!(token, "abc123");
    assert_eq!(tokens.get("user@test.com").as_deref(), Some("abc123"));
    assert_eq!(tokens.len(), 1);
}

#[tokio::test]
async fn a_second_login_overwrites_instead_of_duplicating() {
    let api = TestApi::start().await;
    let config = config_for(&api);
    let tokens = TokenStore::new();

    AccessTokenRetriever::obtain(&config, &tokens, "relogin@test.com", "one")
        .await
        .unwrap();
    AccessTokenRetriever::obtain(&config, &tokens, "relogin@test.com", "two")
        .await
        .unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens.get("relogin@test.com").as_deref(),
        Some("token-for-relogin@test.com-two")
    );
}

#[tokio::test]
async fn missing_or_blank_tokens_fail_authentication_and_skip_the_store() {
    let api = TestApi::start().await;
    let config = config_for(&api);
    let tokens = TokenStore::new();

    for email in [
        "empty@test.com",
        "blank@test.com",
        "missing@test.com",
        "nodata@test.com",
    ] {
        let result = AccessTokenRetriever::obtain(&config, &tokens, email, "pw").await;
        assert!(
            matches!(result, Err(Error::Authentication(_))),
            "expected Authentication failure for {email}, got {result:?}"
        );
    }
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn tokens_for_different_users_live_side_by_side() {
    let api = TestApi::start().await;
    let config = config_for(&api);
    let tokens = TokenStore::new();

    AccessTokenRetriever::obtain(&config, &tokens, "a@test.com", "pw-a")
        .await
        .unwrap();
    AccessTokenRetriever::obtain(&config, &tokens, "b@test.com", "pw-b")
        .await
        .unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(
        tokens.get("a@test.com").as_deref(),
        Some("token-for-a@test.com-pw-a")
    );
}

#[tokio::test]
async fn obtaining_without_a_base_api_url_is_a_configuration_error() {
    let tokens = TokenStore::new();
    let config = HarnessConfig::default();
    let result = AccessTokenRetriever::obtain(&config, &tokens, "user@test.com", "pw").await;
    assert!(matches!(
        result,
        Err(Error::ConfigurationMissing { name: "BASE_API_URL" })
    ));
}
