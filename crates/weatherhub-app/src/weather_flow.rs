use std::time::Duration;

use weatherhub_client::{ApiClient, ApiResult, WeatherReport};
use weatherhub_core::{AppError, AuthError, UiConfig};

use crate::forms::CoordinateForm;
use crate::notice::Notice;

const FETCH_FAILED: &str = "Failed to fetch weather data";

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    /// No credential stored; the page offers a link to login instead.
    SignInRequired(Notice),
    Report(WeatherReport),
    Error(Notice),
}

#[derive(Debug, Clone)]
pub struct WeatherFlow {
    client: ApiClient,
    notice_lifetime: Duration,
}

impl WeatherFlow {
    pub fn new(client: ApiClient, ui: &UiConfig) -> Self {
        Self {
            client,
            notice_lifetime: Duration::from_millis(ui.weather_notice_ms),
        }
    }

    fn error(&self, message: impl Into<String>) -> WeatherView {
        WeatherView::Error(Notice::error(message, self.notice_lifetime))
    }

    /// Validate the typed coordinates and fetch current conditions.
    pub async fn lookup(&self, form: &CoordinateForm) -> WeatherView {
        match self.client.session().is_authenticated() {
            Ok(true) => {}
            Ok(false) => {
                return WeatherView::SignInRequired(Notice::warning(
                    AppError::from(AuthError::NotSignedIn).user_message(),
                ))
            }
            Err(e) => return self.error(AppError::from(e).user_message()),
        }

        let (lat, lon) = match form.parse() {
            Ok(coords) => coords,
            Err(e) => return self.error(e.to_string()),
        };

        match self.client.get_current_weather(lat, lon).await {
            Ok(ApiResult::Success(report)) => {
                tracing::info!(
                    "Weather at {}, {}: {}°C, {}",
                    report.coordinates.lat,
                    report.coordinates.lon,
                    report.temp_c,
                    report.description
                );
                WeatherView::Report(report)
            }
            Ok(result) => self.error(result.error_message().unwrap_or(FETCH_FAILED)),
            Err(e) => {
                tracing::error!("Weather error: {}", e);
                self.error(e.server_message().unwrap_or(FETCH_FAILED))
            }
        }
    }
}
