// REST layer - scenario-scoped HTTP client, token retrieval
//
// One RestClient per API scenario, bound to the configured base URL, with
// cookie propagation and last-response retention. Access tokens live in an
// explicit TokenStore created once per run and passed to whoever needs it.

pub mod client;
pub mod models;
pub mod token;

pub use client::{ApiResponse, RestClient};
pub use models::{AuthData, AuthenticationResponse, LoginRequest};
pub use token::{AccessTokenRetriever, TokenStore};
