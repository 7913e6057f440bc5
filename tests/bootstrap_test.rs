use anyhow::Result;
use httpmock::prelude::*;
use site_widgets::adapters::page::{
    HtmlPage, NEWS_SURFACE, SOCIAL_SURFACE, TIDES_SURFACE, WEATHER_SURFACE,
};
use site_widgets::app::widgets::weather::WEATHER_UNAVAILABLE;
use site_widgets::app::widgets::{SocialWidget, TidesWidget};
use site_widgets::core::site_config::StorageSiteConfig;
use site_widgets::core::Presentation;
use site_widgets::utils::validation::Validate;
use site_widgets::{publish, render_page, LocalStorage, SiteBootstrap, SiteError, ToolConfig};
use tempfile::TempDir;

fn tool_config(server: &MockServer, site_source: &str, output: &str) -> Result<ToolConfig> {
    let toml_content = format!(
        r#"
[site]
config_source = "{site_source}"

[output]
path = "{output}"

[endpoints]
weather = "{weather}"
feed_to_json = "{feeds}"
geolocation = "{geo}"

[weather]
latitude = 36.6
longitude = -121.9
"#,
        site_source = site_source,
        output = output.replace('\\', "/"),
        weather = server.url("/v1/forecast"),
        feeds = server.url("/v1/api.json"),
        geo = server.url("/json"),
    );
    Ok(ToolConfig::from_toml_str(&toml_content)?)
}

/// 端對端：設定、天氣、新聞皆來自 mock server，輸出 index.html
#[tokio::test]
async fn test_end_to_end_render_and_publish() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_string_lossy().into_owned();
    let server = MockServer::start_async().await;

    let site_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/config/site.json");
            then.status(200).json_body(serde_json::json!({
                "brand": {
                    "primaryColor": "#0b3d91",
                    "accentColor": "#f4a261",
                    "siteTitle": "Coastal",
                    "tagline": "Live"
                },
                "social": {"instagram": "coastal.live", "x": "handle", "tiktok": ""},
                "news": {"rss": ["https://coast.example.com/weather.rss"]},
                "tides": {"stationUrl": "https://tidesandcurrents.noaa.gov/stationhome.html?id=9413450"}
            }));
        })
        .await;
    let forecast_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "36.6")
                .query_param("temperature_unit", "fahrenheit");
            then.status(200).json_body(serde_json::json!({
                "current": {
                    "temperature_2m": 58.0,
                    "relative_humidity_2m": 88,
                    "apparent_temperature": 55.1,
                    "weather_code": 45,
                    "wind_speed_10m": 6.2
                },
                "hourly": { "temperature_2m": [55.0, 56.0, 58.0, 60.0] }
            }));
        })
        .await;
    let feed_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/api.json")
                .query_param("rss_url", "https://coast.example.com/weather.rss");
            then.status(200).json_body(serde_json::json!({
                "status": "ok",
                "items": [{"title": "Dense fog advisory", "link": "https://coast.example.com/fog", "pubDate": "2024-05-01 06:00:00"}]
            }));
        })
        .await;

    let config = tool_config(&server, &server.url("/config/site.json"), &output_path)?;
    config.validate()?;

    let page = render_page(&config).await?;
    let storage = LocalStorage::new(config.output.path.clone());
    publish(&page, &storage, &config.output.filename).await?;

    site_mock.assert_async().await;
    forecast_mock.assert_async().await;
    feed_mock.assert_async().await;

    assert_eq!(page.title().as_deref(), Some("Coastal — Live"));
    assert!(page
        .contents(WEATHER_SURFACE)
        .unwrap()
        .contains("<h3>58°F — Fog</h3>"));
    assert!(page
        .contents(NEWS_SURFACE)
        .unwrap()
        .contains("Dense fog advisory"));
    assert!(page
        .contents(TIDES_SURFACE)
        .unwrap()
        .contains("stationhome.html?id=9413450"));

    let social = page.contents(SOCIAL_SURFACE).unwrap();
    assert_eq!(social.matches(r#"<div class="social-card">"#).count(), 2);
    assert!(social.contains(r#"href="https://x.com/handle""#));
    assert!(social.contains("data=https%3A%2F%2Fx.com%2Fhandle"));
    assert!(!social.contains("tiktok"));

    let written = std::fs::read_to_string(std::path::Path::new(&output_path).join("index.html"))?;
    assert!(written.contains("<title>Coastal — Live</title>"));
    assert!(written.contains("--accent: #f4a261;"));
    assert!(written.contains("--brand: #0b3d91;"));
    assert!(written.contains(r##"stroke="#f4a261""##));

    Ok(())
}

#[tokio::test]
async fn test_local_site_config_with_failing_upstreams() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let site_path = temp_dir.path().join("site.json");
    std::fs::write(
        &site_path,
        r##"{"brand":{"primaryColor":"#111","siteTitle":"Coastal","tagline":"Live"},"news":{"rss":["https://gone.example.com/rss"]}}"##,
    )?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/api.json");
            then.status(502);
        })
        .await;

    let site_source = site_path.to_string_lossy().replace('\\', "/");
    let output = temp_dir.path().join("out").to_string_lossy().into_owned();
    let config = tool_config(&server, &site_source, &output)?;

    let page = render_page(&config).await?;

    assert_eq!(page.title().as_deref(), Some("Coastal — Live"));
    assert_eq!(page.property("--brand").as_deref(), Some("#111"));
    assert_eq!(page.property("--accent").as_deref(), Some("#ffd400"));
    assert_eq!(page.contents(WEATHER_SURFACE).as_deref(), Some(WEATHER_UNAVAILABLE));
    assert!(page.contents(NEWS_SURFACE).unwrap().contains("No news right now"));
    assert_eq!(page.contents(SOCIAL_SURFACE).as_deref(), Some(""));

    Ok(())
}

#[tokio::test]
async fn test_site_config_failure_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let bootstrap = SiteBootstrap::new(StorageSiteConfig::new(storage, "missing.json"))
        .with_widget(TidesWidget)
        .with_widget(SocialWidget::default());
    let page = HtmlPage::with_standard_surfaces();

    let result = bootstrap.run(&page).await;

    assert!(matches!(result, Err(SiteError::IoError(_))));
    assert_eq!(page.title(), None);
    assert!(page.history(TIDES_SURFACE).is_empty());
    assert!(page.history(SOCIAL_SURFACE).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_widgets_without_surface_are_skipped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("site.json"),
        r#"{"brand":{"siteTitle":"Coastal","tagline":"Live"},"social":{"x":"handle"}}"#,
    )?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let bootstrap = SiteBootstrap::new(StorageSiteConfig::new(storage, "site.json"))
        .with_widget(TidesWidget)
        .with_widget(SocialWidget::default());
    assert_eq!(bootstrap.widget_names(), vec!["tides", "social"]);

    let page = HtmlPage::new(&[SOCIAL_SURFACE]);
    bootstrap.run(&page).await?;

    assert!(page
        .contents(SOCIAL_SURFACE)
        .unwrap()
        .contains("https://x.com/handle"));
    assert_eq!(page.contents(TIDES_SURFACE), None);
    assert_eq!(page.title().as_deref(), Some("Coastal — Live"));

    Ok(())
}
