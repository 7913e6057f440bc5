use crate::core::site_config::load_site_config;
use crate::core::{Presentation, RenderContext, SiteConfig, SiteConfigSource, SurfaceLookup, Widget};
use crate::utils::error::Result;
use futures::future::join_all;
use std::time::Instant;

/// 頁面啟動流程：載入設定一次，再同時啟動所有元件
pub struct SiteBootstrap<C: SiteConfigSource> {
    source: C,
    widgets: Vec<Box<dyn Widget>>,
}

impl<C: SiteConfigSource> SiteBootstrap<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            widgets: Vec::new(),
        }
    }

    pub fn with_widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widgets.push(Box::new(widget));
        self
    }

    pub fn widget_names(&self) -> Vec<&'static str> {
        self.widgets.iter().map(|w| w.name()).collect()
    }

    /// 設定載入失敗時直接回傳錯誤，不渲染任何元件
    pub async fn run<P>(&self, page: &P) -> Result<SiteConfig>
    where
        P: Presentation + SurfaceLookup,
    {
        let started = Instant::now();
        tracing::info!("🚀 Loading site configuration");
        let site = load_site_config(&self.source, page, page).await?;

        let ctx = RenderContext {
            site: &site,
            presentation: page,
        };

        let renders = self.widgets.iter().map(|widget| {
            let ctx = &ctx;
            async move {
                match page.surface(widget.surface_id()) {
                    Some(surface) => {
                        tracing::debug!("🧩 Rendering {} into #{}", widget.name(), widget.surface_id());
                        widget.render(surface.as_ref(), ctx).await;
                    }
                    None => {
                        tracing::debug!(
                            "🧩 Surface #{} not on page, skipping {}",
                            widget.surface_id(),
                            widget.name()
                        );
                    }
                }
            }
        });
        join_all(renders).await;

        tracing::info!(
            "✅ Rendered {} widgets in {:?}",
            self.widgets.len(),
            started.elapsed()
        );
        Ok(site)
    }
}
