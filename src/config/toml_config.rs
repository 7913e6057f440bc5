use crate::adapters::feeds::DEFAULT_FEED_TO_JSON_ENDPOINT;
use crate::adapters::geo::DEFAULT_GEOLOCATION_ENDPOINT;
use crate::adapters::weather::DEFAULT_FORECAST_ENDPOINT;
use crate::app::widgets::news::NewsLimits;
use crate::app::widgets::social::DEFAULT_QR_ENDPOINT;
use crate::core::sparkline::SparklineSize;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_location, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 工具本身的設定（`site-widgets.toml`），所有區段皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub site: SiteSection,
    pub output: OutputSection,
    pub endpoints: EndpointSection,
    pub weather: WeatherSection,
    pub news: NewsSection,
    pub http: HttpSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub config_source: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            config_source: "./config/site.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
    pub filename: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: "./public".to_string(),
            filename: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSection {
    pub weather: String,
    pub feed_to_json: String,
    pub qr_code: String,
    pub geolocation: String,
}

impl Default for EndpointSection {
    fn default() -> Self {
        Self {
            weather: DEFAULT_FORECAST_ENDPOINT.to_string(),
            feed_to_json: DEFAULT_FEED_TO_JSON_ENDPOINT.to_string(),
            qr_code: DEFAULT_QR_ENDPOINT.to_string(),
            geolocation: DEFAULT_GEOLOCATION_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSection {
    pub geolocation_timeout_seconds: u64,
    pub hourly_points: usize,
    pub sparkline_width: f64,
    pub sparkline_height: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for WeatherSection {
    fn default() -> Self {
        let size = SparklineSize::default();
        Self {
            geolocation_timeout_seconds: 10,
            hourly_points: 24,
            sparkline_width: size.width,
            sparkline_height: size.height,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSection {
    pub per_feed_limit: usize,
    pub total_limit: usize,
}

impl Default for NewsSection {
    fn default() -> Self {
        let limits = NewsLimits::default();
        Self {
            per_feed_limit: limits.per_feed,
            total_limit: limits.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub request_timeout_seconds: Option<u64>,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            request_timeout_seconds: Some(30),
        }
    }
}

impl ToolConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FEED_PROXY})；未定義的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn news_limits(&self) -> NewsLimits {
        NewsLimits {
            per_feed: self.news.per_feed_limit,
            total: self.news.total_limit,
        }
    }

    pub fn sparkline_size(&self) -> SparklineSize {
        SparklineSize {
            width: self.weather.sparkline_width,
            height: self.weather.sparkline_height,
        }
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.weather.geolocation_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.http.request_timeout_seconds.map(Duration::from_secs)
    }

    /// 設定了經緯度時回傳固定位置，否則由 IP 推估
    pub fn fixed_location(&self) -> Result<Option<(f64, f64)>> {
        match (self.weather.latitude, self.weather.longitude) {
            (None, None) => Ok(None),
            (latitude, longitude) => {
                let latitude = *validate_required_field("weather.latitude", &latitude)?;
                let longitude = *validate_required_field("weather.longitude", &longitude)?;
                Ok(Some((latitude, longitude)))
            }
        }
    }

    pub fn output_file(&self) -> String {
        Path::new(&self.output.path)
            .join(&self.output.filename)
            .to_string_lossy()
            .into_owned()
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        validate_location("site.config_source", &self.site.config_source)?;
        validate_path("output.path", &self.output.path)?;
        validate_path("output.filename", &self.output.filename)?;

        validate_url("endpoints.weather", &self.endpoints.weather)?;
        validate_url("endpoints.feed_to_json", &self.endpoints.feed_to_json)?;
        validate_url("endpoints.qr_code", &self.endpoints.qr_code)?;
        validate_url("endpoints.geolocation", &self.endpoints.geolocation)?;

        validate_positive_number("news.per_feed_limit", self.news.per_feed_limit, 1)?;
        validate_positive_number("news.total_limit", self.news.total_limit, 1)?;
        validate_positive_number("weather.hourly_points", self.weather.hourly_points, 2)?;
        validate_range(
            "weather.geolocation_timeout_seconds",
            self.weather.geolocation_timeout_seconds,
            1,
            300,
        )?;
        validate_range("weather.sparkline_width", self.weather.sparkline_width, 1.0, 4096.0)?;
        validate_range("weather.sparkline_height", self.weather.sparkline_height, 1.0, 4096.0)?;
        if let Some(seconds) = self.http.request_timeout_seconds {
            validate_range("http.request_timeout_seconds", seconds, 1, 600)?;
        }

        if let Some((latitude, longitude)) = self.fixed_location()? {
            validate_range("weather.latitude", latitude, -90.0, 90.0)?;
            validate_range("weather.longitude", longitude, -180.0, 180.0)?;
        }

        Ok(())
    }
}
