// Authentication steps (@API scenarios)

use crate::world::HarnessWorld;
use cucumber::{then, when};
use webtestkit::api::AccessTokenRetriever;

#[when(expr = "I log in as {string} with password {string}")]
async fn log_in(world: &mut HarnessWorld, username: String, password: String) {
    AccessTokenRetriever::obtain(&world.config, &world.tokens, &username, &password)
        .await
        .expect("login failed");
}

#[then(expr = "an access token is cached for {string}")]
async fn token_is_cached(world: &mut HarnessWorld, username: String) {
    let token = world.tokens.get(&username);
    assert!(
        token.as_deref().is_some_and(|t| !t.trim().is_empty()),
        "no usable token cached for '{username}'"
    );
}

#[then(expr = "the cached token for {string} is {string}")]
async fn cached_token_is(world: &mut HarnessWorld, username: String, expected: String) {
    assert_eq!(world.tokens.get(&username).as_deref(), Some(expected.as_str()));
}
