use crate::core::site_config::{TAGLINE_SURFACE, TITLE_SURFACE};
use crate::core::{Presentation, Surface, SurfaceLookup};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

pub const WEATHER_SURFACE: &str = "weather-out";
pub const TIDES_SURFACE: &str = "tides-wrap";
pub const NEWS_SURFACE: &str = "news-out";
pub const SOCIAL_SURFACE: &str = "social-grid";

pub const STANDARD_SURFACES: &[&str] = &[
    TITLE_SURFACE,
    TAGLINE_SURFACE,
    WEATHER_SURFACE,
    TIDES_SURFACE,
    NEWS_SURFACE,
    SOCIAL_SURFACE,
];

/// 記憶體中的容器，保留每次寫入以便檢查載入中→結果的轉換
#[derive(Debug, Default)]
pub struct MemorySurface {
    renders: Mutex<Vec<String>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Surface for MemorySurface {
    fn render(&self, html: &str) {
        self.renders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(html.to_string());
    }
}

/// 組成完整 HTML 文件的頁面；容器依宣告順序輸出
pub struct HtmlPage {
    surfaces: Vec<(String, Arc<MemorySurface>)>,
    properties: Mutex<BTreeMap<String, String>>,
    title: Mutex<Option<String>>,
}

impl HtmlPage {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            surfaces: ids
                .iter()
                .map(|id| (id.to_string(), Arc::new(MemorySurface::new())))
                .collect(),
            properties: Mutex::new(BTreeMap::new()),
            title: Mutex::new(None),
        }
    }

    pub fn with_standard_surfaces() -> Self {
        Self::new(STANDARD_SURFACES)
    }

    pub fn title(&self) -> Option<String> {
        self.title.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn contents(&self, id: &str) -> Option<String> {
        self.memory_surface(id).and_then(|s| s.contents())
    }

    pub fn history(&self, id: &str) -> Vec<String> {
        self.memory_surface(id)
            .map(|s| s.history())
            .unwrap_or_default()
    }

    fn memory_surface(&self, id: &str) -> Option<&Arc<MemorySurface>> {
        self.surfaces
            .iter()
            .find(|(surface_id, _)| surface_id == id)
            .map(|(_, surface)| surface)
    }

    pub fn to_html(&self) -> String {
        let title = self.title().unwrap_or_default();
        let properties = self
            .properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");

        let mut header = Vec::new();
        let mut sections = Vec::new();
        for (id, surface) in &self.surfaces {
            let content = surface.contents().unwrap_or_default();
            match id.as_str() {
                TITLE_SURFACE => header.push(format!(r#"<h1 id="{}">{}</h1>"#, id, content)),
                TAGLINE_SURFACE => {
                    header.push(format!(r#"<p id="{}" class="subtitle">{}</p>"#, id, content))
                }
                _ => sections.push(format!(
                    r#"<section class="panel"><div id="{}">{}</div></section>"#,
                    id, content
                )),
            }
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n<style>:root {{ {} }}</style>\n</head>\n<body>\n\
             <header>{}</header>\n<main>\n{}\n</main>\n</body>\n</html>\n",
            html_escape::encode_text(&title),
            properties,
            header.join(""),
            sections.join("\n")
        )
    }
}

impl SurfaceLookup for HtmlPage {
    fn surface(&self, id: &str) -> Option<Arc<dyn Surface>> {
        self.memory_surface(id)
            .map(|surface| surface.clone() as Arc<dyn Surface>)
    }
}

impl Presentation for HtmlPage {
    fn set_property(&self, name: &str, value: &str) {
        self.properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set_title(&self, title: &str) {
        *self.title.lock().unwrap_or_else(PoisonError::into_inner) = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_surface_is_none() {
        let page = HtmlPage::new(&[WEATHER_SURFACE]);
        assert!(page.surface(WEATHER_SURFACE).is_some());
        assert!(page.surface(NEWS_SURFACE).is_none());
        assert_eq!(page.contents(NEWS_SURFACE), None);
    }

    #[test]
    fn test_surface_keeps_render_history() {
        let page = HtmlPage::with_standard_surfaces();
        let surface = page.surface(NEWS_SURFACE).unwrap();
        surface.render("loading");
        surface.render("done");

        assert_eq!(page.contents(NEWS_SURFACE).as_deref(), Some("done"));
        assert_eq!(page.history(NEWS_SURFACE), vec!["loading", "done"]);
    }

    #[test]
    fn test_to_html_assembles_document() {
        let page = HtmlPage::with_standard_surfaces();
        page.set_title("Coastal — <Live>");
        page.set_property("--brand", "#111");
        page.set_property("--accent", "#ffd400");
        page.surface(TITLE_SURFACE).unwrap().render("Coastal");
        page.surface(TIDES_SURFACE).unwrap().render("<p>tides</p>");

        let html = page.to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Coastal — &lt;Live&gt;</title>"));
        assert!(html.contains(":root { --accent: #ffd400; --brand: #111; }"));
        assert!(html.contains(r#"<h1 id="site-title">Coastal</h1>"#));
        assert!(html.contains(r#"<div id="tides-wrap"><p>tides</p></div>"#));
        assert!(html.contains(r#"<div id="weather-out"></div>"#));
    }
}
