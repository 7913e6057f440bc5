use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 缺少的鍵與明確的 `null` 都視為預設值
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// 站台設定（`config/site.json`），每次執行只載入一次
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: BrandConfig,
    /// 平台名稱 → 帳號或網址，保留 JSON 中的順序
    #[serde(default, deserialize_with = "null_as_default")]
    pub social: serde_json::Map<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: NewsConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tides: TidesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub site_title: Option<String>,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rss: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidesConfig {
    pub station_url: Option<String>,
}

impl TidesConfig {
    /// 未設定或為空字串時使用預設站點
    pub fn station_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.station_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub weather_code: i64,
    pub hourly_temperatures: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub pub_date: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialEntry {
    pub platform: String,
    pub handle: String,
    pub profile_url: String,
    pub icon: &'static str,
    pub qr_url: String,
}
