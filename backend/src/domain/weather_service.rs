//! Weather domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{WeatherQuery, WeatherSource, WeatherSourceError};
use crate::domain::weather::{City, ClassifiedDay, is_severe_weather};

fn map_source_error(error: WeatherSourceError) -> Error {
    match error {
        WeatherSourceError::Timeout { .. }
        | WeatherSourceError::Network { .. }
        | WeatherSourceError::Status { .. } => Error::upstream(error.to_string()),
        WeatherSourceError::Decode { message } => {
            Error::upstream(format!("weather provider response malformed: {message}"))
        }
    }
}

/// Weather service classifying provider forecasts.
#[derive(Clone)]
pub struct WeatherService<S> {
    source: Arc<S>,
}

impl<S> WeatherService<S> {
    /// Create a new service over the given provider adapter.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> WeatherQuery for WeatherService<S>
where
    S: WeatherSource,
{
    async fn five_day(&self, city: City) -> Result<Vec<ClassifiedDay>, Error> {
        let days = self
            .source
            .five_day(city)
            .await
            .map_err(map_source_error)?;
        Ok(days
            .into_iter()
            .map(|forecast| {
                let severe = is_severe_weather(&forecast);
                ClassifiedDay { forecast, severe }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockWeatherSource;
    use crate::domain::weather::{DailyForecast, DayConditions};

    fn day(phrase: &str) -> DailyForecast {
        DailyForecast {
            date: "2025-06-01".to_owned(),
            temperature: None,
            day: Some(DayConditions {
                icon_phrase: Some(phrase.to_owned()),
                ..DayConditions::default()
            }),
        }
    }

    #[tokio::test]
    async fn classifies_each_forecast_day() {
        let mut source = MockWeatherSource::new();
        source
            .expect_five_day()
            .returning(|_| Ok(vec![day("Thunderstorms"), day("Sunny")]));

        let service = WeatherService::new(Arc::new(source));
        let days = service
            .five_day(City::Yangon)
            .await
            .expect("forecast succeeds");
        assert!(days[0].severe);
        assert!(!days[1].severe);
    }

    #[tokio::test]
    async fn provider_failures_surface_as_upstream_errors() {
        let mut source = MockWeatherSource::new();
        source.expect_five_day().returning(|_| {
            Err(WeatherSourceError::Status {
                status: 503,
                body_preview: "maintenance".to_owned(),
            })
        });

        let service = WeatherService::new(Arc::new(source));
        let error = service
            .five_day(City::Mandalay)
            .await
            .expect_err("provider failure surfaces");
        assert_eq!(error.code, ErrorCode::Upstream);
    }
}
