//! Driving port for classified weather forecasts.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::weather::{City, ClassifiedDay};

/// Driving port for weather read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherQuery: Send + Sync {
    /// The five-day forecast for a covered city, each day carrying its
    /// computed severity flag.
    async fn five_day(&self, city: City) -> Result<Vec<ClassifiedDay>, Error>;
}

/// Fixture query serving empty forecasts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWeatherQuery;

#[async_trait]
impl WeatherQuery for FixtureWeatherQuery {
    async fn five_day(&self, _city: City) -> Result<Vec<ClassifiedDay>, Error> {
        Ok(Vec::new())
    }
}
