//! Core library for userkit: an in-memory user registry plus small
//! persistence, weather and numeric utilities.
//!
//! External collaborators (SQLite, HTTP) sit behind `UserRepository` and
//! `WeatherTransport` so callers and tests can inject their own.

pub mod arith;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod service;
pub mod weather;

pub use arith::{
    add, divide, is_prime, temperature_label, MathError, MathResult, TemperatureLabel,
};
pub use config::{AppConfig, ConfigError, ConfigResult};
pub use logging::{
    default_log_level, init_logging, logging_status, normalize_log_level, LoggingError,
};
pub use model::user::{NewUser, UserId, UserRow, UserValidationError};
pub use registry::user_registry::{DuplicateKeyError, RegistryResult, UserRegistry};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::{save_user_to_path, UserService};
pub use weather::{
    HttpResponse, ReqwestTransport, TransportError, WeatherClient, WeatherError, WeatherReport,
    WeatherTransport,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
