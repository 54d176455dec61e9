//! Weather lookup over HTTP.
//!
//! # Responsibility
//! - Build per-city request URLs and decode weather payloads.
//! - Reach the network only through the `WeatherTransport` seam.
//!
//! # Invariants
//! - One `fetch` issues exactly one GET.
//! - Only HTTP 200 responses are decoded.

pub mod client;
pub mod transport;

pub use client::{
    WeatherClient, WeatherError, WeatherReport, WeatherResult, DEFAULT_WEATHER_BASE_URL,
};
pub use transport::{
    HttpResponse, ReqwestTransport, TransportError, TransportResult, WeatherTransport,
};
