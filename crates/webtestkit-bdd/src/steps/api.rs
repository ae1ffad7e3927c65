// REST client steps (@API scenarios)

use crate::world::HarnessWorld;
use cucumber::gherkin::Step;
use cucumber::{then, when};
use serde_json::Value;

#[when(expr = "I send GET request to endpoint {string}")]
async fn send_get_request(world: &mut HarnessWorld, endpoint: String) {
    world
        .rest_mut()
        .get(&endpoint)
        .await
        .expect("GET request failed");
}

#[when(expr = "I send DELETE request to endpoint {string}")]
async fn send_delete_request(world: &mut HarnessWorld, endpoint: String) {
    world
        .rest_mut()
        .delete(&endpoint)
        .await
        .expect("DELETE request failed");
}

#[when(expr = "I send POST request to endpoint {string} with body:")]
async fn send_post_request(world: &mut HarnessWorld, endpoint: String, step: &Step) {
    let body: Value = serde_json::from_str(
        step.docstring
            .as_deref()
            .expect("the step needs a JSON docstring body"),
    )
    .expect("the docstring body is not valid JSON");
    world
        .rest_mut()
        .post(&endpoint, &body)
        .await
        .expect("POST request failed");
}

#[when(expr = "I send PUT request to endpoint {string} with body:")]
async fn send_put_request(world: &mut HarnessWorld, endpoint: String, step: &Step) {
    let body: Value = serde_json::from_str(
        step.docstring
            .as_deref()
            .expect("the step needs a JSON docstring body"),
    )
    .expect("the docstring body is not valid JSON");
    world
        .rest_mut()
        .put(&endpoint, &body)
        .await
        .expect("PUT request failed");
}

#[then(expr = "I receive response with status code {int}")]
async fn receive_status_code(world: &mut HarnessWorld, expected: u16) {
    let response = world
        .rest()
        .last_response()
        .expect("no response - send a request first");
    assert_eq!(
        response.status(),
        expected,
        "unexpected status for {}",
        response.url()
    );
}

#[then(expr = "the response field {string} equals {string}")]
async fn response_field_equals(world: &mut HarnessWorld, pointer: String, expected: String) {
    let body: Value = world
        .rest()
        .deserialize_last()
        .expect("could not deserialize the last response");
    let actual = body
        .pointer(&pointer)
        .unwrap_or_else(|| panic!("response has no field at '{pointer}': {body}"));
    assert_eq!(actual.as_str().unwrap_or_default(), expected);
}
