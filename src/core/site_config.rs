use crate::core::{BrandConfig, Presentation, SiteConfig, SiteConfigSource, Storage, SurfaceLookup};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const DEFAULT_PRIMARY_COLOR: &str = "#0a7cff";
pub const DEFAULT_ACCENT_COLOR: &str = "#ffd400";
pub const BRAND_PROPERTY: &str = "--brand";
pub const ACCENT_PROPERTY: &str = "--accent";
pub const TITLE_SURFACE: &str = "site-title";
pub const TAGLINE_SURFACE: &str = "site-tagline";

/// 從 Storage 讀取站台設定 JSON
pub struct StorageSiteConfig<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> StorageSiteConfig<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> SiteConfigSource for StorageSiteConfig<S> {
    async fn load(&self) -> Result<SiteConfig> {
        tracing::debug!("Reading site configuration from: {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        parse_site_config(&bytes)
    }
}

pub fn parse_site_config(bytes: &[u8]) -> Result<SiteConfig> {
    Ok(serde_json::from_slice(bytes)?)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 文件標題：`<siteTitle> — <tagline>`
pub fn document_title(brand: &BrandConfig) -> String {
    format!(
        "{} — {}",
        brand.site_title.as_deref().unwrap_or_default(),
        brand.tagline.as_deref().unwrap_or_default()
    )
}

/// 套用品牌色與標題，並填入標題/標語容器（若頁面上有的話）
pub fn apply_branding(brand: &BrandConfig, presentation: &dyn Presentation, surfaces: &dyn SurfaceLookup) {
    let primary = non_empty(&brand.primary_color).unwrap_or(DEFAULT_PRIMARY_COLOR);
    let accent = non_empty(&brand.accent_color).unwrap_or(DEFAULT_ACCENT_COLOR);
    presentation.set_property(BRAND_PROPERTY, primary);
    presentation.set_property(ACCENT_PROPERTY, accent);
    presentation.set_title(&document_title(brand));

    if let Some(title) = surfaces.surface(TITLE_SURFACE) {
        let text = brand.site_title.as_deref().unwrap_or_default();
        title.render(&html_escape::encode_text(text));
    }
    if let Some(tagline) = surfaces.surface(TAGLINE_SURFACE) {
        let text = brand.tagline.as_deref().unwrap_or_default();
        tagline.render(&html_escape::encode_text(text));
    }
}

/// 載入站台設定並套用品牌；任何錯誤都回傳給呼叫端
pub async fn load_site_config<C: SiteConfigSource + ?Sized>(
    source: &C,
    presentation: &dyn Presentation,
    surfaces: &dyn SurfaceLookup,
) -> Result<SiteConfig> {
    let site = source.load().await?;
    apply_branding(&site.brand, presentation, surfaces);
    tracing::info!(
        "🎨 Branding applied: {}",
        document_title(&site.brand)
    );
    Ok(site)
}
