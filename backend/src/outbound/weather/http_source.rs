//! Reqwest-backed AccuWeather source adapter.
//!
//! Owns transport details only: the city to location-key table, request
//! timeout, HTTP error mapping, and JSON decoding into domain forecasts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::ForecastResponseDto;
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::domain::weather::{City, DailyForecast};

/// Default request timeout for forecast calls.
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
/// Longest body prefix included in status errors.
const BODY_PREVIEW_LIMIT: usize = 256;

/// Provider location key for a covered city.
fn location_key(city: City) -> &'static str {
    match city {
        City::Yangon => "246562",
        City::Mandalay => "242614",
        City::Naypyitaw => "241431",
        City::Bago => "241426",
        City::Mawlamyine => "241427",
        City::Pathein => "241430",
        City::Sittwe => "241456",
        City::Taunggyi => "241428",
        City::Myitkyina => "358889",
        City::Dawei => "241432",
    }
}

/// AccuWeather adapter fetching five-day daily forecasts.
#[derive(Debug, Clone)]
pub struct AccuWeatherSource {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl AccuWeatherSource {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: Url, api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn with_timeout(
        base_url: Url,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
            timeout,
        })
    }

    fn forecast_url(&self, city: City) -> Result<Url, WeatherSourceError> {
        self.base_url
            .join(&format!("forecasts/v1/daily/5day/{}", location_key(city)))
            .map_err(|err| WeatherSourceError::Network {
                message: format!("invalid forecast endpoint: {err}"),
            })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> WeatherSourceError {
        if error.is_timeout() {
            WeatherSourceError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            WeatherSourceError::Network {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl WeatherSource for AccuWeatherSource {
    async fn five_day(&self, city: City) -> Result<Vec<DailyForecast>, WeatherSourceError> {
        let url = self.forecast_url(city)?;
        let response = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str()), ("metric", "true")])
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_transport_error(err))?;
        if !status.is_success() {
            let preview = String::from_utf8_lossy(&body)
                .chars()
                .take(BODY_PREVIEW_LIMIT)
                .collect();
            return Err(WeatherSourceError::Status {
                status: status.as_u16(),
                body_preview: preview,
            });
        }

        let decoded: ForecastResponseDto =
            serde_json::from_slice(&body).map_err(|err| WeatherSourceError::Decode {
                message: err.to_string(),
            })?;
        Ok(decoded
            .daily_forecasts
            .into_iter()
            .map(super::dto::DailyForecastDto::into_domain)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_covered_city_has_a_location_key() {
        for city in City::ALL {
            assert!(!location_key(city).is_empty());
        }
    }

    #[test]
    fn forecast_url_embeds_the_location_key() {
        let source = AccuWeatherSource::new(
            Url::parse("https://dataservice.accuweather.example/").expect("valid base"),
            "key".to_owned(),
        )
        .expect("client builds");
        let url = source.forecast_url(City::Yangon).expect("url builds");
        assert!(url.path().ends_with("/forecasts/v1/daily/5day/246562"));
    }
}
