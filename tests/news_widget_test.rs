use anyhow::Result;
use async_trait::async_trait;
use chrono::FixedOffset;
use httpmock::prelude::*;
use site_widgets::adapters::feeds::FeedToJsonClient;
use site_widgets::adapters::http::build_client;
use site_widgets::adapters::page::{HtmlPage, NEWS_SURFACE};
use site_widgets::app::widgets::news::{NEWS_BLOCKED, NEWS_EMPTY, NEWS_LOADING};
use site_widgets::app::widgets::NewsWidget;
use site_widgets::core::{FeedSource, NewsItem, RenderContext, SiteConfig, SurfaceLookup, Widget};

fn site_with_feeds(feeds: &[String]) -> SiteConfig {
    let mut site = SiteConfig::default();
    site.news.rss = feeds.to_vec();
    site
}

async fn render_news<F: FeedSource + 'static>(widget: &NewsWidget<F>, site: &SiteConfig) -> HtmlPage {
    let page = HtmlPage::with_standard_surfaces();
    let ctx = RenderContext {
        site,
        presentation: &page,
    };
    let surface = page.surface(NEWS_SURFACE).unwrap();
    widget.render(surface.as_ref(), &ctx).await;
    page
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// 兩個 feed：一個回傳 3 筆、一個失敗 → 仍渲染 3 筆
#[tokio::test]
async fn test_one_failing_feed_does_not_block_others() -> Result<()> {
    let server = MockServer::start_async().await;
    let good_feed = "https://coast.example.com/weather.rss";
    let bad_feed = "https://down.example.com/feed.xml";

    let good_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/api.json")
                .query_param("rss_url", good_feed);
            then.status(200).json_body(serde_json::json!({
                "status": "ok",
                "items": [
                    {"title": "Swell arrives Tuesday", "link": "https://coast.example.com/a", "pubDate": "2024-05-01 08:00:00"},
                    {"title": "Fog lifts by noon", "link": "https://coast.example.com/b", "pubDate": "2024-05-02 08:00:00"},
                    {"title": "King tides this weekend", "link": "https://coast.example.com/c", "pubDate": "2024-04-30 08:00:00"}
                ]
            }));
        })
        .await;
    let bad_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/api.json")
                .query_param("rss_url", bad_feed);
            then.status(500);
        })
        .await;

    let widget = NewsWidget::new(FeedToJsonClient::new(
        build_client(None)?,
        server.url("/v1/api.json"),
    ))
    .with_display_offset(utc());
    let site = site_with_feeds(&[bad_feed.to_string(), good_feed.to_string()]);

    let page = render_news(&widget, &site).await;

    good_mock.assert_async().await;
    bad_mock.assert_async().await;

    let history = page.history(NEWS_SURFACE);
    assert_eq!(history[0], NEWS_LOADING);
    let html = history.last().unwrap();
    assert_eq!(html.matches(r#"<div class="card">"#).count(), 3);

    let fog = html.find("Fog lifts by noon").unwrap();
    let swell = html.find("Swell arrives Tuesday").unwrap();
    let king = html.find("King tides this weekend").unwrap();
    assert!(fog < swell && swell < king);
    assert!(html.contains("May 2, 2024, 8:00 AM"));

    Ok(())
}

#[tokio::test]
async fn test_undated_items_render_last() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/api.json");
            then.status(200).json_body(serde_json::json!({
                "items": [
                    {"title": "No date here", "link": "https://x.example.com/1"},
                    {"title": "Garbled date", "link": "https://x.example.com/2", "pubDate": "soon"},
                    {"title": "Dated", "link": "https://x.example.com/3", "pubDate": "Tue, 30 Apr 2024 10:00:00 GMT"}
                ]
            }));
        })
        .await;

    let widget = NewsWidget::new(FeedToJsonClient::new(
        build_client(None)?,
        server.url("/v1/api.json"),
    ))
    .with_display_offset(utc());
    let site = site_with_feeds(&["https://x.example.com/rss".to_string()]);

    let page = render_news(&widget, &site).await;
    let html = page.contents(NEWS_SURFACE).unwrap();

    let dated = html.find("Dated").unwrap();
    let no_date = html.find("No date here").unwrap();
    let garbled = html.find("Garbled date").unwrap();
    assert!(dated < no_date && no_date < garbled);
    assert_eq!(html.matches("Date unavailable").count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_no_items_renders_no_news_notice() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/api.json");
            then.status(200).json_body(serde_json::json!({"status": "ok", "items": []}));
        })
        .await;

    let widget = NewsWidget::new(FeedToJsonClient::new(
        build_client(None)?,
        server.url("/v1/api.json"),
    ));

    let page = render_news(&widget, &site_with_feeds(&["https://a.example.com/rss".to_string()])).await;
    assert_eq!(page.contents(NEWS_SURFACE).as_deref(), Some(NEWS_EMPTY));

    let page = render_news(&widget, &SiteConfig::default()).await;
    assert_eq!(page.contents(NEWS_SURFACE).as_deref(), Some(NEWS_EMPTY));

    Ok(())
}

struct CrashingFeeds;

#[async_trait]
impl FeedSource for CrashingFeeds {
    async fn fetch_items(&self, _feed_url: &str) -> site_widgets::Result<Vec<NewsItem>> {
        panic!("converter crashed");
    }
}

#[tokio::test]
async fn test_aggregation_failure_renders_blocked_notice() {
    let widget = NewsWidget::new(CrashingFeeds);
    let site = site_with_feeds(&["https://a.example.com/rss".to_string()]);

    let page = render_news(&widget, &site).await;

    assert_eq!(page.contents(NEWS_SURFACE).as_deref(), Some(NEWS_BLOCKED));
}

#[tokio::test]
async fn test_rerender_with_same_responses_is_identical() -> Result<()> {
    let server = MockServer::start_async().await;
    for (feed, hour) in [("https://a.example.com/rss", 9), ("https://b.example.com/rss", 9)] {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/api.json")
                    .query_param("rss_url", feed);
                then.status(200).json_body(serde_json::json!({
                    "items": [
                        {"title": format!("{} same time", feed), "link": feed, "pubDate": format!("2024-05-01 {:02}:00:00", hour)}
                    ]
                }));
            })
            .await;
    }

    let widget = NewsWidget::new(FeedToJsonClient::new(
        build_client(None)?,
        server.url("/v1/api.json"),
    ))
    .with_display_offset(utc());
    let site = site_with_feeds(&[
        "https://a.example.com/rss".to_string(),
        "https://b.example.com/rss".to_string(),
    ]);

    let first = render_news(&widget, &site).await.contents(NEWS_SURFACE);
    let second = render_news(&widget, &site).await.contents(NEWS_SURFACE);

    assert_eq!(first, second);
    // 同時間的項目依 feed 順序排列
    let html = first.unwrap();
    assert!(html.find("https://a.example.com/rss same time").unwrap()
        < html.find("https://b.example.com/rss same time").unwrap());

    Ok(())
}
