use crate::domain::model::{Coordinates, NewsItem, SiteConfig, WeatherReading};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// 可寫入 HTML 的頁面容器（例如 `#weather-out`）
pub trait Surface: Send + Sync {
    fn render(&self, html: &str);
}

/// 依 id 取得容器；找不到時回傳 None，元件直接略過
pub trait SurfaceLookup: Send + Sync {
    fn surface(&self, id: &str) -> Option<Arc<dyn Surface>>;
}

/// 頁面層級的呈現屬性（CSS 自訂屬性與文件標題）
pub trait Presentation: Send + Sync {
    fn set_property(&self, name: &str, value: &str);
    fn property(&self, name: &str) -> Option<String>;
    fn set_title(&self, title: &str);
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait SiteConfigSource: Send + Sync {
    async fn load(&self) -> Result<SiteConfig>;
}

#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn forecast(&self, at: Coordinates) -> Result<WeatherReading>;
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_items(&self, feed_url: &str) -> Result<Vec<NewsItem>>;
}

/// 元件渲染時可用的唯讀上下文
pub struct RenderContext<'a> {
    pub site: &'a SiteConfig,
    pub presentation: &'a dyn Presentation,
}

/// 一個獨立的頁面元件：抓資料、渲染到自己的容器，失敗時顯示提示文字
#[async_trait]
pub trait Widget: Send + Sync {
    fn name(&self) -> &'static str;
    fn surface_id(&self) -> &'static str;
    async fn render(&self, surface: &dyn Surface, ctx: &RenderContext<'_>);
}
