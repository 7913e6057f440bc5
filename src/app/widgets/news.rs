use crate::adapters::page::NEWS_SURFACE;
use crate::core::{FeedSource, NewsItem, RenderContext, Surface, Widget};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use chrono::{FixedOffset, Local, Offset};
use std::sync::Arc;
use tokio::task::JoinSet;

pub const NEWS_LOADING: &str = r#"<div class="notice">Loading weather news…</div>"#;
pub const NEWS_EMPTY: &str = r#"<div class="notice">No news right now. Try again later.</div>"#;
pub const NEWS_BLOCKED: &str = r#"<div class="notice">News feed blocked by your browser. We can set up a serverless proxy later.</div>"#;

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsLimits {
    pub per_feed: usize,
    pub total: usize,
}

impl Default for NewsLimits {
    fn default() -> Self {
        Self {
            per_feed: 5,
            total: 10,
        }
    }
}

/// 依發佈時間新到舊排序；沒有時間的排在最後，同時間保持原順序
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

pub fn render_news(items: &[NewsItem], offset: FixedOffset) -> String {
    items
        .iter()
        .map(|item| {
            let timestamp = item
                .published_at
                .map(|dt| dt.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "Date unavailable".to_string());
            format!(
                r#"<div class="card">
  <a href="{}" target="_blank" rel="noopener"><h3>{}</h3></a>
  <div class="notice">{}</div>
</div>"#,
                html_escape::encode_double_quoted_attribute(&item.link),
                html_escape::encode_text(&item.title),
                timestamp
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct NewsWidget<F: FeedSource + 'static> {
    source: Arc<F>,
    limits: NewsLimits,
    display_offset: Option<FixedOffset>,
}

impl<F: FeedSource + 'static> NewsWidget<F> {
    pub fn new(source: F) -> Self {
        Self {
            source: Arc::new(source),
            limits: NewsLimits::default(),
            display_offset: None,
        }
    }

    pub fn with_limits(mut self, limits: NewsLimits) -> Self {
        self.limits = limits;
        self
    }

    /// 固定顯示時區；未設定時使用本機時區
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = Some(offset);
        self
    }

    /// 各 feed 獨立抓取，單一 feed 失敗只記錄警告；
    /// 只有抓取任務本身崩潰時才回傳錯誤
    pub async fn aggregate(&self, feeds: &[String]) -> Result<Vec<NewsItem>> {
        let mut tasks = JoinSet::new();
        for (index, feed) in feeds.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let feed = feed.clone();
            let per_feed = self.limits.per_feed;
            tasks.spawn(async move {
                let items = match source.fetch_items(&feed).await {
                    Ok(mut items) => {
                        items.truncate(per_feed);
                        items
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Failed feed {}: {}", feed, e);
                        Vec::new()
                    }
                };
                (index, items)
            });
        }

        let mut collected: Vec<Vec<NewsItem>> = vec![Vec::new(); feeds.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, items) = joined.map_err(|e| SiteError::ProcessingError {
                message: format!("feed task failed: {}", e),
            })?;
            collected[index] = items;
        }

        let mut items: Vec<NewsItem> = collected.into_iter().flatten().collect();
        sort_newest_first(&mut items);
        items.truncate(self.limits.total);
        Ok(items)
    }
}

#[async_trait]
impl<F: FeedSource + 'static> Widget for NewsWidget<F> {
    fn name(&self) -> &'static str {
        "news"
    }

    fn surface_id(&self) -> &'static str {
        NEWS_SURFACE
    }

    async fn render(&self, surface: &dyn Surface, ctx: &RenderContext<'_>) {
        surface.render(NEWS_LOADING);

        match self.aggregate(&ctx.site.news.rss).await {
            Ok(items) if items.is_empty() => surface.render(NEWS_EMPTY),
            Ok(items) => {
                let offset = self
                    .display_offset
                    .unwrap_or_else(|| Local::now().offset().fix());
                surface.render(&render_news(&items, offset));
                tracing::info!(
                    "📰 Rendered {} news items from {} feeds",
                    items.len(),
                    ctx.site.news.rss.len()
                );
            }
            Err(_) => surface.render(NEWS_BLOCKED),
        }
    }
}
