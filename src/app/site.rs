use crate::adapters::feeds::FeedToJsonClient;
use crate::adapters::geo::{FixedLocator, IpGeoLocator};
use crate::adapters::http::{build_client, HttpSiteConfig};
use crate::adapters::page::HtmlPage;
use crate::adapters::weather::OpenMeteoClient;
use crate::app::widgets::{NewsWidget, SocialWidget, TidesWidget, WeatherWidget};
use crate::config::cli::LocalStorage;
use crate::config::toml_config::ToolConfig;
use crate::core::bootstrap::SiteBootstrap;
use crate::core::site_config::StorageSiteConfig;
use crate::core::{Coordinates, GeoLocator, SiteConfig, SiteConfigSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 站台設定來源：網址或本機檔案
pub enum SiteSource {
    Http(HttpSiteConfig),
    File(StorageSiteConfig<LocalStorage>),
}

impl SiteSource {
    pub fn from_location(client: reqwest::Client, location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SiteSource::Http(HttpSiteConfig::new(client, location))
        } else {
            SiteSource::File(StorageSiteConfig::new(LocalStorage::new("."), location))
        }
    }
}

#[async_trait]
impl SiteConfigSource for SiteSource {
    async fn load(&self) -> Result<SiteConfig> {
        match self {
            SiteSource::Http(source) => source.load().await,
            SiteSource::File(source) => source.load().await,
        }
    }
}

/// 有設定經緯度就用固定位置，否則用 IP 推估
pub enum Locator {
    Fixed(FixedLocator),
    Ip(IpGeoLocator),
}

#[async_trait]
impl GeoLocator for Locator {
    async fn locate(&self) -> Result<Coordinates> {
        match self {
            Locator::Fixed(locator) => locator.locate().await,
            Locator::Ip(locator) => locator.locate().await,
        }
    }
}

/// 依工具設定組出完整的啟動流程（四個元件）
pub fn build_bootstrap(config: &ToolConfig) -> Result<SiteBootstrap<SiteSource>> {
    let client = build_client(config.request_timeout())?;

    let locator = match config.fixed_location()? {
        Some((latitude, longitude)) => Locator::Fixed(FixedLocator::new(latitude, longitude)),
        None => Locator::Ip(IpGeoLocator::new(client.clone(), &config.endpoints.geolocation)),
    };
    let forecast = OpenMeteoClient::new(
        client.clone(),
        &config.endpoints.weather,
        config.weather.hourly_points,
    );
    let feeds = FeedToJsonClient::new(client.clone(), &config.endpoints.feed_to_json);

    let bootstrap = SiteBootstrap::new(SiteSource::from_location(client, &config.site.config_source))
        .with_widget(
            WeatherWidget::new(locator, forecast)
                .with_locate_timeout(config.geolocation_timeout())
                .with_sparkline_size(config.sparkline_size()),
        )
        .with_widget(TidesWidget)
        .with_widget(NewsWidget::new(feeds).with_limits(config.news_limits()))
        .with_widget(SocialWidget::new(&config.endpoints.qr_code));

    Ok(bootstrap)
}

/// 渲染整個頁面；站台設定載入失敗時回傳錯誤
pub async fn render_page(config: &ToolConfig) -> Result<HtmlPage> {
    let page = HtmlPage::with_standard_surfaces();
    let bootstrap = build_bootstrap(config)?;
    tracing::debug!("Widgets: {:?}", bootstrap.widget_names());
    bootstrap.run(&page).await?;
    Ok(page)
}

/// 把頁面寫入 Storage，回傳寫入的檔名
pub async fn publish<S: Storage>(page: &HtmlPage, storage: &S, filename: &str) -> Result<String> {
    let html = page.to_html();
    tracing::debug!("Writing page ({} bytes) to storage", html.len());
    storage.write_file(filename, html.as_bytes()).await?;
    Ok(filename.to_string())
}
