//! HTTP transport seam and its reqwest implementation.

use reqwest::blocking::Client;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug)]
pub enum TransportError {
    Reqwest(reqwest::Error),
    /// Failure reported by a non-reqwest transport.
    Unavailable(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reqwest(err) => write!(f, "http request failed: {err}"),
            Self::Unavailable(message) => write!(f, "transport unavailable: {message}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reqwest(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Reqwest(value)
    }
}

/// Status and raw body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Issues a GET request and returns the full response.
pub trait WeatherTransport {
    fn get(&self, url: &str) -> TransportResult<HttpResponse>;
}

impl<T: WeatherTransport + ?Sized> WeatherTransport for &T {
    fn get(&self, url: &str) -> TransportResult<HttpResponse> {
        (**self).get(url)
    }
}

/// Blocking reqwest client with a request timeout.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> TransportResult<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl WeatherTransport for ReqwestTransport {
    fn get(&self, url: &str) -> TransportResult<HttpResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
