use crate::adapters::page::TIDES_SURFACE;
use crate::core::{RenderContext, Surface, Widget};
use async_trait::async_trait;

pub const DEFAULT_STATION_URL: &str = "https://tidesandcurrents.noaa.gov/";

pub fn render_tides(station_url: &str) -> String {
    let href = html_escape::encode_double_quoted_attribute(station_url);
    let text = html_escape::encode_text(station_url);
    format!(
        r#"<p class="subtitle">Linking to: <a href="{href}" target="_blank" rel="noopener">{text}</a></p>
<div class="card">
  <p>Want an embedded chart? Paste a station or widget URL in <code>config/site.json</code> under <code>tides.stationUrl</code>.</p>
  <p class="notice">We can also wire NOAA/third‑party APIs later for full inline charts.</p>
</div>"#,
        href = href,
        text = text
    )
}

/// 潮汐面板：只有連結與說明，不呼叫任何 API
#[derive(Debug, Default, Clone, Copy)]
pub struct TidesWidget;

#[async_trait]
impl Widget for TidesWidget {
    fn name(&self) -> &'static str {
        "tides"
    }

    fn surface_id(&self) -> &'static str {
        TIDES_SURFACE
    }

    async fn render(&self, surface: &dyn Surface, ctx: &RenderContext<'_>) {
        let url = ctx.site.tides.station_url_or(DEFAULT_STATION_URL);
        surface.render(&render_tides(url));
    }
}
