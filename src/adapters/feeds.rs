use crate::core::{FeedSource, NewsItem};
use crate::domain::model::null_as_default;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_FEED_TO_JSON_ENDPOINT: &str = "https://api.rss2json.com/v1/api.json";

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    link: String,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

/// 解析發佈時間：rss2json 的 `YYYY-MM-DD HH:MM:SS`（UTC）、RFC 3339、RFC 2822
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 經由 feed-to-JSON 服務把 RSS/Atom 轉成 JSON
pub struct FeedToJsonClient {
    client: Client,
    endpoint: String,
}

impl FeedToJsonClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedSource for FeedToJsonClient {
    async fn fetch_items(&self, feed_url: &str) -> Result<Vec<NewsItem>> {
        tracing::debug!("📰 Fetching feed: {}", feed_url);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("rss_url", feed_url)])
            .send()
            .await?
            .error_for_status()?;

        let body: FeedResponse = response.json().await?;
        if body.status.as_deref() == Some("error") {
            return Err(SiteError::FeedError {
                feed: feed_url.to_string(),
                message: body.message.unwrap_or_else(|| "conversion failed".to_string()),
            });
        }

        Ok(body
            .items
            .into_iter()
            .map(|entry| NewsItem {
                published_at: entry.pub_date.as_deref().and_then(parse_pub_date),
                title: entry.title,
                link: entry.link,
                pub_date: entry.pub_date,
            })
            .collect())
    }
}
