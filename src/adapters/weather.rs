use crate::core::{Coordinates, WeatherReading, WeatherSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i64,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}

/// Open-Meteo 預報（不需 API key），華氏與 mph 單位
pub struct OpenMeteoClient {
    client: Client,
    endpoint: String,
    hourly_points: usize,
}

impl OpenMeteoClient {
    pub fn new(client: Client, endpoint: impl Into<String>, hourly_points: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            hourly_points,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn forecast(&self, at: Coordinates) -> Result<WeatherReading> {
        tracing::debug!(
            "Requesting forecast for {:.4},{:.4} from {}",
            at.latitude,
            at.longitude,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: ForecastResponse = response.json().await?;
        let c = data.current;

        Ok(WeatherReading {
            temperature: c.temperature_2m,
            apparent_temperature: c.apparent_temperature,
            humidity: c.relative_humidity_2m,
            wind_speed: c.wind_speed_10m,
            weather_code: c.weather_code,
            hourly_temperatures: data
                .hourly
                .temperature_2m
                .into_iter()
                .take(self.hourly_points)
                .flatten()
                .collect(),
        })
    }
}
