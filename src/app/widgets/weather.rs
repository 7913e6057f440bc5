use crate::adapters::page::WEATHER_SURFACE;
use crate::core::site_config::{ACCENT_PROPERTY, DEFAULT_ACCENT_COLOR};
use crate::core::sparkline::{render_sparkline_svg, SparklineSize};
use crate::core::{GeoLocator, RenderContext, Surface, WeatherReading, WeatherSource, Widget};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use std::time::Duration;

pub const WEATHER_LOADING: &str =
    r#"<div class="notice">Getting your location for live weather…</div>"#;
pub const WEATHER_UNAVAILABLE: &str =
    r#"<div class="notice">Could not load weather (location blocked or offline).</div>"#;
pub const DEFAULT_LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// WMO 天氣代碼 → 簡短描述；未列出的代碼回傳 "Weather"
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 => "Snow",
        80 => "Rain showers",
        95 => "Thunderstorms",
        _ => "Weather",
    }
}

/// 四捨五入，.5 一律往正無限大
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn render_weather(reading: &WeatherReading, accent: &str, size: SparklineSize) -> String {
    format!(
        r#"<div class="grid-2">
  <div>
    <div class="badge-mini">Your Location</div>
    <h3>{temp}°F — {desc}</h3>
    <div class="subtitle">Feels like {feels}°F • Wind {wind} mph • Humidity {humidity}%</div>
  </div>
  <div>
    {spark}
    <div class="notice">Next 24h temperature (°F)</div>
  </div>
</div>"#,
        temp = round_half_up(reading.temperature),
        desc = describe_weather_code(reading.weather_code),
        feels = round_half_up(reading.apparent_temperature),
        wind = round_half_up(reading.wind_speed),
        humidity = reading.humidity,
        spark = render_sparkline_svg(&reading.hourly_temperatures, size, accent),
    )
}

pub struct WeatherWidget<L: GeoLocator, W: WeatherSource> {
    locator: L,
    source: W,
    locate_timeout: Duration,
    sparkline: SparklineSize,
}

impl<L: GeoLocator, W: WeatherSource> WeatherWidget<L, W> {
    pub fn new(locator: L, source: W) -> Self {
        Self {
            locator,
            source,
            locate_timeout: DEFAULT_LOCATE_TIMEOUT,
            sparkline: SparklineSize::default(),
        }
    }

    pub fn with_locate_timeout(mut self, timeout: Duration) -> Self {
        self.locate_timeout = timeout;
        self
    }

    pub fn with_sparkline_size(mut self, size: SparklineSize) -> Self {
        self.sparkline = size;
        self
    }

    async fn current_reading(&self) -> Result<WeatherReading> {
        let coordinates = tokio::time::timeout(self.locate_timeout, self.locator.locate())
            .await
            .map_err(|_| SiteError::GeolocationTimeout {
                seconds: self.locate_timeout.as_secs(),
            })??;
        self.source.forecast(coordinates).await
    }
}

#[async_trait]
impl<L: GeoLocator, W: WeatherSource> Widget for WeatherWidget<L, W> {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn surface_id(&self) -> &'static str {
        WEATHER_SURFACE
    }

    async fn render(&self, surface: &dyn Surface, ctx: &RenderContext<'_>) {
        surface.render(WEATHER_LOADING);

        match self.current_reading().await {
            Ok(reading) => {
                let accent = ctx
                    .presentation
                    .property(ACCENT_PROPERTY)
                    .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string());
                surface.render(&render_weather(&reading, &accent, self.sparkline));
                tracing::info!(
                    "🌤️ Weather rendered: {}°F, {}",
                    round_half_up(reading.temperature),
                    describe_weather_code(reading.weather_code)
                );
            }
            Err(e) => {
                tracing::error!("❌ Could not load weather: {}", e);
                surface.render(WEATHER_UNAVAILABLE);
            }
        }
    }
}
