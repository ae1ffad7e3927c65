// RestClient - one HTTP request context per scenario
//
// Wraps a cookie-carrying reqwest client bound to a base URL. Every verb
// call buffers the full response body so assertions and deserialization
// can happen later, and replaces the retained last response. Disposing the
// client discards every buffered body; handles kept across a dispose fail
// on read instead of returning stale data.

use crate::error::{Error, Result};
use bytes::Bytes;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Buffered body shared between the client and issued response handles.
/// `None` after the owning client was disposed.
#[derive(Debug)]
struct ResponseSlot {
    body: RwLock<Option<Bytes>>,
}

/// One buffered HTTP response.
///
/// Cheap to clone; clones share the buffer, so disposing the client
/// invalidates every copy at once.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    url: Url,
    slot: Arc<ResponseSlot>,
}

impl ApiResponse {
    /// HTTP status code of this response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Final URL of the request (after redirects).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The buffered body bytes.
    ///
    /// Fails with `DisposedResponse` once the owning client was disposed.
    pub fn body(&self) -> Result<Bytes> {
        self.slot
            .body
            .read()
            .clone()
            .ok_or(Error::DisposedResponse)
    }

    /// The body as UTF-8 text (lossy).
    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.body()?).into_owned())
    }

    /// Deserializes the JSON body.
    ///
    /// Fails with `NullResponse` when the body is empty and with
    /// `DisposedResponse` after a dispose.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.body()?;
        if body.is_empty() {
            return Err(Error::NullResponse);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// A scenario's HTTP request context.
///
/// Cookies set by one response are sent on the following requests, and
/// redirects are followed automatically. Bodies passed to `post`, `put`
/// and `patch` are serialized to JSON.
///
/// # Example
///
/// ```ignore
/// use webtestkit::api::RestClient;
///
/// let mut client = RestClient::new(config.require_base_api_url()?.clone())?;
/// let response = client.get("/health").await?;
/// assert_eq!(response.status(), 200);
/// client.dispose();
/// ```
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
    issued: Vec<Arc<ResponseSlot>>,
    last: Option<ApiResponse>,
    disposed: bool,
}

impl RestClient {
    /// Creates a request context bound to a base URL.
    pub fn new(base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(RestClient {
            client,
            base_url,
            issued: Vec::new(),
            last: None,
            disposed: false,
        })
    }

    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request.
    pub async fn get(&mut self, path: &str) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        debug!(%url, "GET");
        let request = self.client.get(url);
        self.execute(request).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&mut self, path: &str) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        debug!(%url, "DELETE");
        let request = self.client.delete(url);
        self.execute(request).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        debug!(%url, "POST");
        let request = self.client.post(url).json(body);
        self.execute(request).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        debug!(%url, "PUT");
        let request = self.client.put(url).json(body);
        self.execute(request).await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        debug!(%url, "PATCH");
        let request = self.client.patch(url).json(body);
        self.execute(request).await
    }

    async fn execute(&mut self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response.bytes().await?;

        let slot = Arc::new(ResponseSlot {
            body: RwLock::new(Some(body)),
        });
        self.issued.push(Arc::clone(&slot));

        let response = ApiResponse { status, url, slot };
        self.last = Some(response.clone());
        Ok(response)
    }

    /// The most recent response, if any request has been issued.
    ///
    /// Each new request replaces this; read or deserialize before sending
    /// the next one.
    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last.as_ref()
    }

    /// Deserializes the most recent response's JSON body.
    ///
    /// Fails with `NullResponse` when no request has been issued yet or
    /// the body is empty.
    pub fn deserialize_last<T: DeserializeOwned>(&self) -> Result<T> {
        self.last
            .as_ref()
            .ok_or(Error::NullResponse)?
            .json()
    }

    /// Discards every buffered response body issued by this client.
    ///
    /// Any retained `ApiResponse` fails with `DisposedResponse` on body
    /// reads afterwards. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        debug!(buffered = self.issued.len(), "disposing request context");
        for slot in &self.issued {
            slot.body.write().take();
        }
    }

    /// Whether `dispose` has already run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("issued", &self.issued.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
