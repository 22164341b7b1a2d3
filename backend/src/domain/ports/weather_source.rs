//! Port for the upstream weather forecast provider.

use async_trait::async_trait;

use crate::domain::weather::{City, DailyForecast};

/// Errors raised by weather source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherSourceError {
    /// The provider did not answer within the configured deadline.
    #[error("weather provider timed out after {seconds}s")]
    Timeout {
        /// Configured deadline in seconds.
        seconds: u64,
    },
    /// The provider could not be reached.
    #[error("weather provider unreachable: {message}")]
    Network {
        /// Adapter-level failure detail.
        message: String,
    },
    /// The provider answered with a non-success status.
    #[error("weather provider returned status {status}: {body_preview}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        body_preview: String,
    },
    /// The provider's response body could not be decoded.
    #[error("weather provider response malformed: {message}")]
    Decode {
        /// Adapter-level failure detail.
        message: String,
    },
}

/// Port for fetching daily forecasts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the five-day forecast for a covered city.
    async fn five_day(&self, city: City) -> Result<Vec<DailyForecast>, WeatherSourceError>;
}

/// Fixture implementation returning an empty forecast.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWeatherSource;

#[async_trait]
impl WeatherSource for FixtureWeatherSource {
    async fn five_day(&self, _city: City) -> Result<Vec<DailyForecast>, WeatherSourceError> {
        Ok(Vec::new())
    }
}
