//! Weather forecasts and severe-weather classification.
//!
//! The classifier is a pure function over a single forecast day. Severity is
//! advisory and biased towards flagging: heavy precipitation or any
//! storm-related wording in the day's icon phrase marks the day severe.

use serde::{Deserialize, Serialize};

/// Phrase fragments that mark a forecast day as severe, matched
/// case-insensitively against the day's icon phrase.
pub const SEVERE_KEYWORDS: [&str; 10] = [
    "storm",
    "thunderstorm",
    "rain",
    "heavy",
    "flood",
    "wind",
    "hurricane",
    "typhoon",
    "cyclone",
    "tornado",
];

/// Cities with forecast coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Yangon,
    Mandalay,
    Naypyitaw,
    Bago,
    Mawlamyine,
    Pathein,
    Sittwe,
    Taunggyi,
    Myitkyina,
    Dawei,
}

impl City {
    /// All covered cities, in display order.
    pub const ALL: [Self; 10] = [
        Self::Yangon,
        Self::Mandalay,
        Self::Naypyitaw,
        Self::Bago,
        Self::Mawlamyine,
        Self::Pathein,
        Self::Sittwe,
        Self::Taunggyi,
        Self::Myitkyina,
        Self::Dawei,
    ];

    /// The city's display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yangon => "Yangon",
            Self::Mandalay => "Mandalay",
            Self::Naypyitaw => "Naypyitaw",
            Self::Bago => "Bago",
            Self::Mawlamyine => "Mawlamyine",
            Self::Pathein => "Pathein",
            Self::Sittwe => "Sittwe",
            Self::Taunggyi => "Taunggyi",
            Self::Myitkyina => "Myitkyina",
            Self::Dawei => "Dawei",
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for City {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Daytime conditions within a forecast day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayConditions {
    /// Provider icon code.
    pub icon: Option<i32>,
    /// Human-readable summary, e.g. "Thunderstorms".
    pub icon_phrase: Option<String>,
    /// Whether precipitation is expected.
    #[serde(default)]
    pub has_precipitation: bool,
    /// Kind of precipitation, e.g. "Rain".
    pub precipitation_type: Option<String>,
    /// Intensity, e.g. "Light", "Moderate", "Heavy".
    pub precipitation_intensity: Option<String>,
}

/// Forecast temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRange {
    /// Daily minimum.
    pub min_c: f64,
    /// Daily maximum.
    pub max_c: f64,
}

/// A single day of a forecast as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Forecast date in the provider's ISO form.
    pub date: String,
    /// Daily temperature range, when the provider supplies one.
    pub temperature: Option<TemperatureRange>,
    /// Daytime conditions. Absent blocks classify as not severe.
    pub day: Option<DayConditions>,
}

/// A forecast day with its computed severity flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDay {
    /// The forecast day.
    #[serde(flatten)]
    pub forecast: DailyForecast,
    /// Whether the day is classified severe.
    pub severe: bool,
}

/// Classify a forecast day as severe or not.
///
/// A day is severe when it has precipitation of `Heavy` intensity, or when
/// its icon phrase contains any of [`SEVERE_KEYWORDS`] (case-insensitive).
/// Missing conditions or fields classify as not severe.
///
/// # Examples
/// ```
/// use backend::domain::weather::{DailyForecast, DayConditions, is_severe_weather};
///
/// let day = DailyForecast {
///     date: "2025-06-01".into(),
///     temperature: None,
///     day: Some(DayConditions {
///         icon_phrase: Some("Thunderstorms".into()),
///         ..DayConditions::default()
///     }),
/// };
/// assert!(is_severe_weather(&day));
/// ```
#[must_use]
pub fn is_severe_weather(forecast: &DailyForecast) -> bool {
    let Some(day) = &forecast.day else {
        return false;
    };
    if day.has_precipitation
        && day
            .precipitation_intensity
            .as_deref()
            .is_some_and(|intensity| intensity.eq_ignore_ascii_case("heavy"))
    {
        return true;
    }
    day.icon_phrase.as_deref().is_some_and(|phrase| {
        let phrase = phrase.to_lowercase();
        SEVERE_KEYWORDS
            .iter()
            .any(|keyword| phrase.contains(keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn forecast(day: Option<DayConditions>) -> DailyForecast {
        DailyForecast {
            date: "2025-06-01".to_owned(),
            temperature: None,
            day,
        }
    }

    #[test]
    fn heavy_precipitation_is_severe() {
        let day = forecast(Some(DayConditions {
            has_precipitation: true,
            precipitation_type: Some("Rain".into()),
            precipitation_intensity: Some("Heavy".into()),
            ..DayConditions::default()
        }));
        assert!(is_severe_weather(&day));
    }

    #[test]
    fn light_precipitation_with_calm_phrase_is_not_severe() {
        let day = forecast(Some(DayConditions {
            icon_phrase: Some("Partly sunny".into()),
            has_precipitation: true,
            precipitation_type: Some("Rain".into()),
            precipitation_intensity: Some("Light".into()),
            ..DayConditions::default()
        }));
        assert!(!is_severe_weather(&day));
    }

    #[rstest]
    #[case("Thunderstorms")]
    #[case("Heavy rain")]
    #[case("Windy")]
    #[case("TORNADO WATCH")]
    #[case("Tropical cyclone approaching")]
    fn storm_phrases_are_severe(#[case] phrase: &str) {
        let day = forecast(Some(DayConditions {
            icon_phrase: Some(phrase.into()),
            ..DayConditions::default()
        }));
        assert!(is_severe_weather(&day));
    }

    #[rstest]
    #[case("Sunny")]
    #[case("Partly cloudy")]
    #[case("Hazy sunshine")]
    fn calm_phrases_are_not_severe(#[case] phrase: &str) {
        let day = forecast(Some(DayConditions {
            icon_phrase: Some(phrase.into()),
            ..DayConditions::default()
        }));
        assert!(!is_severe_weather(&day));
    }

    #[test]
    fn missing_day_block_is_not_severe() {
        assert!(!is_severe_weather(&forecast(None)));
    }

    #[test]
    fn missing_phrase_and_intensity_is_not_severe() {
        let day = forecast(Some(DayConditions {
            has_precipitation: true,
            ..DayConditions::default()
        }));
        assert!(!is_severe_weather(&day));
    }

    #[rstest]
    #[case("yangon", City::Yangon)]
    #[case(" Mandalay ", City::Mandalay)]
    #[case("DAWEI", City::Dawei)]
    fn parses_city_names(#[case] raw: &str, #[case] expected: City) {
        assert_eq!(raw.parse::<City>(), Ok(expected));
    }

    #[test]
    fn rejects_uncovered_city() {
        assert!("Atlantis".parse::<City>().is_err());
    }
}
