use std::time::Duration;

use http::Method;
use tracing::debug;

use crate::error::{RequestError, RequestResult};

/// Per-request timeout used by [`HttpRequestor`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs one request against the gateway and returns the response body.
///
/// Implementations decide what counts as failure; the client only sees the
/// body or an error. Any `Fn(&Method, &str, Option<Vec<u8>>)` closure with the
/// right return type is a requestor.
pub trait Requestor: Send + Sync {
    fn request(&self, method: &Method, path: &str, body: Option<Vec<u8>>) -> RequestResult<Vec<u8>>;
}

impl<F> Requestor for F
where
    F: Fn(&Method, &str, Option<Vec<u8>>) -> RequestResult<Vec<u8>> + Send + Sync,
{
    fn request(&self, method: &Method, path: &str, body: Option<Vec<u8>>) -> RequestResult<Vec<u8>> {
        self(method, path, body)
    }
}

/// Blocking HTTP requestor rooted at a base URL.
///
/// Anything other than `200 OK` is reported as
/// [`RequestError::UnexpectedStatus`], so a gateway `400` never reaches the
/// response parser. Must not be used from inside an async runtime.
#[derive(Debug, Clone)]
pub struct HttpRequestor {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRequestor {
    pub fn new(base_url: impl Into<String>) -> RequestResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Requestor for HttpRequestor {
    fn request(&self, method: &Method, path: &str, body: Option<Vec<u8>>) -> RequestResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            request = request.body(body);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(%method, %url, %status, "gateway responded");
        if status != reqwest::StatusCode::OK {
            return Err(RequestError::UnexpectedStatus(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}
