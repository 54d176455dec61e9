//! Per-city weather client.
//!
//! # Invariants
//! - The city is appended as a single escaped path segment.
//! - Non-200 responses never reach the JSON decoder.

use super::transport::{TransportError, WeatherTransport};
use log::{error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use url::Url;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weather.com/v1";

pub type WeatherResult<T> = Result<T, WeatherError>;

#[derive(Debug)]
pub enum WeatherError {
    InvalidCity,
    InvalidBaseUrl(String),
    Transport(TransportError),
    UnexpectedStatus(u16),
    Decode(serde_json::Error),
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCity => write!(f, "city cannot be empty"),
            Self::InvalidBaseUrl(message) => write!(f, "invalid weather base url: {message}"),
            Self::Transport(err) => write!(f, "{err}"),
            Self::UnexpectedStatus(status) => {
                write!(f, "could not fetch weather: upstream returned status {status}")
            }
            Self::Decode(err) => write!(f, "invalid weather payload: {err}"),
        }
    }
}

impl Error for WeatherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::InvalidCity | Self::InvalidBaseUrl(_) | Self::UnexpectedStatus(_) => None,
        }
    }
}

impl From<TransportError> for WeatherError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Decoded weather payload. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub condition: String,
}

/// Weather lookups against a configurable base URL.
pub struct WeatherClient<T: WeatherTransport> {
    transport: T,
    base_url: Url,
}

impl<T: WeatherTransport> WeatherClient<T> {
    /// Uses [`DEFAULT_WEATHER_BASE_URL`].
    pub fn new(transport: T) -> WeatherResult<Self> {
        Self::with_base_url(transport, DEFAULT_WEATHER_BASE_URL)
    }

    /// # Errors
    /// - `InvalidBaseUrl` when `base_url` does not parse or cannot carry
    ///   path segments (e.g. `mailto:`).
    pub fn with_base_url(transport: T, base_url: &str) -> WeatherResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| WeatherError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(WeatherError::InvalidBaseUrl(format!(
                "`{base_url}` cannot carry path segments"
            )));
        }
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the request URL for `city`.
    pub fn city_url(&self, city: &str) -> WeatherResult<Url> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::InvalidCity);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(city);
        Ok(url)
    }

    /// Fetches the current weather for `city`.
    ///
    /// # Errors
    /// - `InvalidCity` for blank input; no request is sent.
    /// - `Transport` when the request itself fails.
    /// - `UnexpectedStatus` for any status other than 200.
    /// - `Decode` when a 200 body is not a weather payload.
    pub fn fetch(&self, city: &str) -> WeatherResult<WeatherReport> {
        let url = self.city_url(city)?;
        let started_at = Instant::now();

        let response = self.transport.get(url.as_str()).map_err(|err| {
            error!(
                "event=weather_fetch module=weather status=error duration_ms={} error_code=transport_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;

        if !response.is_ok() {
            error!(
                "event=weather_fetch module=weather status=error duration_ms={} error_code=unexpected_status http_status={}",
                started_at.elapsed().as_millis(),
                response.status
            );
            return Err(WeatherError::UnexpectedStatus(response.status));
        }

        let report: WeatherReport = serde_json::from_str(&response.body)?;
        info!(
            "event=weather_fetch module=weather status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}
