// Home page steps (@UI scenarios)

use crate::world::HarnessWorld;
use cucumber::{given, then, when};
use std::sync::Arc;

#[given(expr = "I open the home page")]
async fn open_home_page(world: &mut HarnessWorld) {
    let config = Arc::clone(&world.config);
    world
        .home_page()
        .open(&config)
        .await
        .expect("could not open the home page");
}

#[given(expr = "I accept cookies")]
async fn accept_cookies(world: &mut HarnessWorld) {
    world
        .home_page()
        .accept_cookies()
        .await
        .expect("could not accept cookies");
}

#[when(expr = "I fill {string} in the search field")]
async fn fill_search_field(world: &mut HarnessWorld, text: String) {
    world
        .home_page()
        .fill_search_field(&text)
        .await
        .expect("could not fill the search field");
}

#[when(expr = "I click on the search button")]
async fn click_search_button(world: &mut HarnessWorld) {
    world
        .home_page()
        .click_search_button()
        .await
        .expect("could not click the search button");
}

#[then(expr = "the first result is {string}")]
async fn first_result_is(world: &mut HarnessWorld, expected: String) {
    let actual = world
        .home_page()
        .first_result()
        .await
        .expect("could not read the first result");
    assert_eq!(actual, expected);
}
