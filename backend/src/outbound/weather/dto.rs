//! Wire types for the AccuWeather daily forecast API.

use serde::Deserialize;

use crate::domain::weather::{DailyForecast, DayConditions, TemperatureRange};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ForecastResponseDto {
    #[serde(default)]
    pub daily_forecasts: Vec<DailyForecastDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DailyForecastDto {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: Option<TemperatureDto>,
    #[serde(rename = "Day")]
    pub day: Option<DayDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TemperatureDto {
    #[serde(rename = "Minimum")]
    pub minimum: Option<TemperatureValueDto>,
    #[serde(rename = "Maximum")]
    pub maximum: Option<TemperatureValueDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TemperatureValueDto {
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct DayDto {
    #[serde(rename = "Icon")]
    pub icon: Option<i32>,
    #[serde(rename = "IconPhrase")]
    pub icon_phrase: Option<String>,
    #[serde(rename = "HasPrecipitation", default)]
    pub has_precipitation: bool,
    #[serde(rename = "PrecipitationType")]
    pub precipitation_type: Option<String>,
    #[serde(rename = "PrecipitationIntensity")]
    pub precipitation_intensity: Option<String>,
}

impl DailyForecastDto {
    pub fn into_domain(self) -> DailyForecast {
        let temperature = self.temperature.and_then(|t| {
            match (t.minimum, t.maximum) {
                (Some(min), Some(max)) => Some(TemperatureRange {
                    min_c: min.value,
                    max_c: max.value,
                }),
                _ => None,
            }
        });
        DailyForecast {
            date: self.date,
            temperature,
            day: self.day.map(|day| DayConditions {
                icon: day.icon,
                icon_phrase: day.icon_phrase,
                has_precipitation: day.has_precipitation,
                precipitation_type: day.precipitation_type,
                precipitation_intensity: day.precipitation_intensity,
            }),
        }
    }
}
