//! Weather handlers.
//!
//! ```text
//! GET /api/v1/weather/{city}
//! ```
//!
//! City names match the covered-city list case-insensitively. Each returned
//! day carries the computed `severe` flag alongside the provider's forecast
//! fields.

use actix_web::{get, web};

use crate::domain::{City, ClassifiedDay, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn parse_city(raw: &str) -> Result<City, Error> {
    raw.parse().map_err(|()| {
        let covered = City::ALL.map(City::name).join(", ");
        Error::invalid_request(format!("city must be one of: {covered}"))
    })
}

/// Five-day forecast for a covered city, with severity classification.
#[utoipa::path(
    get,
    path = "/api/v1/weather/{city}",
    params(("city" = String, Path, description = "Covered city name, e.g. 'Yangon'")),
    responses(
        (status = 200, description = "Classified forecast days", body = [ClassifiedDay]),
        (status = 400, description = "City not covered", body = Error),
        (status = 502, description = "Weather provider unavailable", body = Error)
    ),
    tags = ["weather"],
    operation_id = "fiveDayForecast",
    security([])
)]
#[get("/weather/{city}")]
pub async fn five_day_forecast(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ClassifiedDay>>> {
    let city = parse_city(&path.into_inner())?;
    Ok(web::Json(state.weather.five_day(city).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    #[case("Yangon", City::Yangon)]
    #[case("yangon", City::Yangon)]
    #[case("MANDALAY", City::Mandalay)]
    fn parses_covered_cities_case_insensitively(#[case] raw: &str, #[case] expected: City) {
        assert_eq!(parse_city(raw).expect("covered city"), expected);
    }

    #[test]
    fn rejects_uncovered_cities() {
        let error = parse_city("Atlantis").expect_err("uncovered city");
        assert!(error.message.contains("Yangon"));
    }

    #[actix_web::test]
    async fn uncovered_city_answers_bad_request() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::default()))
                .service(five_day_forecast),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/weather/Atlantis").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
