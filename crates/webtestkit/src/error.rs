// Error types for webtestkit

use thiserror::Error;

/// Result type alias for webtestkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using webtestkit
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is absent
    ///
    /// Set the value in `webtestkit.toml` or export the matching
    /// environment variable (environment wins over the file).
    #[error("Missing required configuration value '{name}'. Set it in webtestkit.toml or export the environment variable.")]
    ConfigurationMissing { name: &'static str },

    /// Configuration file or environment value could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Scenario tag does not name a supported browser
    ///
    /// Scenarios that run a browser must carry a tag in the form
    /// `@Browser:<Name>` where `<Name>` is one of the supported kinds.
    #[error(
        "Unsupported browser tag '{tag}'. Tag the scenario with a supported browser \
        in the format @Browser:<Name> (supported: Chromium, Chrome, Edge)."
    )]
    UnsupportedBrowser { tag: String },

    /// The browser process could not be started
    ///
    /// Common causes: no Chromium-family binary on PATH, sandbox
    /// restrictions, or a stale DevTools port.
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    /// Navigation failed before a response was produced
    ///
    /// Raised for SSL errors, invalid URLs, and unreachable hosts.
    /// A non-2xx HTTP status is NOT a navigation error; read the status
    /// explicitly if it matters.
    #[error("Navigation to '{url}' failed: {message}")]
    Navigation { url: String, message: String },

    /// Timeout waiting for an action or wait condition
    ///
    /// Exceeding the deadline aborts only the one call that timed out.
    #[error("Timeout after {timeout_ms}ms: {what}")]
    Timeout { what: String, timeout_ms: u64 },

    /// Login response did not contain a usable access token
    ///
    /// An empty or whitespace-only token is treated as a failure.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A response buffer was read after the request context was disposed
    #[error("Response was disposed. Read or deserialize response bodies before disposing the request context.")]
    DisposedResponse,

    /// No response (or no response body) is available to deserialize
    #[error("No response body available. Issue a request and read it before sending the next one.")]
    NullResponse,

    /// HTTP transport error from the REST client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// DevTools protocol error surfaced by the browser engine
    #[error("CDP error: {0}")]
    Cdp(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_browser_message_names_the_tag_and_format() {
        let err = Error::UnsupportedBrowser {
            tag: "Browser:Netscape".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Browser:Netscape"));
        assert!(msg.contains("@Browser:<Name>"));
    }

    #[test]
    fn timeout_message_carries_deadline() {
        let err = Error::Timeout {
            what: "click on '#submit'".into(),
            timeout_ms: 30_000,
        };
        assert_eq!(
            err.to_string(),
            "Timeout after 30000ms: click on '#submit'"
        );
    }

    #[test]
    fn configuration_missing_names_the_value() {
        let err = Error::ConfigurationMissing { name: "BASE_URL" };
        assert!(err.to_string().contains("BASE_URL"));
    }
}
