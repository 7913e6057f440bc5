use crate::adapters::page::SOCIAL_SURFACE;
use crate::core::{RenderContext, SocialEntry, Surface, Widget};
use async_trait::async_trait;

pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "400x400";
const FALLBACK_ICON: &str = "fa-solid fa-link";

/// 已知平台的個人頁網址規則與圖示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
    Facebook,
    Threads,
    X,
    Twitch,
    Discord,
    Email,
    Linktree,
}

impl Platform {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "tiktok" => Some(Platform::TikTok),
            "instagram" => Some(Platform::Instagram),
            "youtube" => Some(Platform::YouTube),
            "facebook" => Some(Platform::Facebook),
            "threads" => Some(Platform::Threads),
            "x" => Some(Platform::X),
            "twitch" => Some(Platform::Twitch),
            "discord" => Some(Platform::Discord),
            "email" => Some(Platform::Email),
            "linktree" => Some(Platform::Linktree),
            _ => None,
        }
    }

    pub fn profile_url(&self, handle: &str) -> String {
        match self {
            Platform::TikTok => format!("https://www.tiktok.com/@{}", handle),
            Platform::Instagram => format!("https://www.instagram.com/{}", handle),
            Platform::YouTube => format!("https://www.youtube.com/{}", handle),
            Platform::Facebook => format!("https://www.facebook.com/{}", handle),
            Platform::Threads => format!("https://www.threads.net/@{}", handle),
            Platform::X => format!("https://x.com/{}", handle),
            Platform::Twitch => format!("https://www.twitch.tv/{}", handle),
            // invite link
            Platform::Discord => handle.to_string(),
            Platform::Email => format!("mailto:{}", handle),
            Platform::Linktree => format!("https://linktr.ee/{}", handle),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::TikTok => "fa-brands fa-tiktok",
            Platform::Instagram => "fa-brands fa-instagram",
            Platform::YouTube => "fa-brands fa-youtube",
            Platform::Facebook => "fa-brands fa-facebook",
            Platform::Threads => "fa-brands fa-threads",
            Platform::X => "fa-brands fa-x-twitter",
            Platform::Twitch => "fa-brands fa-twitch",
            Platform::Discord => "fa-brands fa-discord",
            Platform::Email => "fa-regular fa-envelope",
            Platform::Linktree => "fa-solid fa-link",
        }
    }
}

pub fn qr_code_url(endpoint: &str, data: &str) -> String {
    format!(
        "{}?size={}&data={}",
        endpoint,
        QR_SIZE,
        urlencoding::encode(data)
    )
}

/// 過濾空白帳號並解析網址，順序與設定檔相同
pub fn social_entries(
    social: &serde_json::Map<String, serde_json::Value>,
    qr_endpoint: &str,
) -> Vec<SocialEntry> {
    social
        .iter()
        .filter_map(|(key, value)| {
            let handle = value.as_str().filter(|h| !h.trim().is_empty())?;
            let platform = Platform::from_key(key);
            let profile_url = platform
                .map(|p| p.profile_url(handle))
                .unwrap_or_else(|| handle.to_string());
            Some(SocialEntry {
                platform: key.clone(),
                handle: handle.to_string(),
                qr_url: qr_code_url(qr_endpoint, &profile_url),
                profile_url,
                icon: platform.map(|p| p.icon()).unwrap_or(FALLBACK_ICON),
            })
        })
        .collect()
}

pub fn render_social(entries: &[SocialEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let platform = html_escape::encode_text(&entry.platform);
            format!(
                r#"<div class="social-card">
  <div><i class="{icon}"></i> <strong style="text-transform:capitalize">{platform}</strong></div>
  <div class="meta"><a href="{href}" target="_blank" rel="noopener">{text}</a></div>
  <img class="qr" src="{qr}" alt="QR for {alt}">
</div>"#,
                icon = entry.icon,
                platform = platform,
                href = html_escape::encode_double_quoted_attribute(&entry.profile_url),
                text = html_escape::encode_text(&entry.profile_url),
                qr = html_escape::encode_double_quoted_attribute(&entry.qr_url),
                alt = html_escape::encode_double_quoted_attribute(&entry.platform),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct SocialWidget {
    qr_endpoint: String,
}

impl SocialWidget {
    pub fn new(qr_endpoint: impl Into<String>) -> Self {
        Self {
            qr_endpoint: qr_endpoint.into(),
        }
    }
}

impl Default for SocialWidget {
    fn default() -> Self {
        Self::new(DEFAULT_QR_ENDPOINT)
    }
}

#[async_trait]
impl Widget for SocialWidget {
    fn name(&self) -> &'static str {
        "social"
    }

    fn surface_id(&self) -> &'static str {
        SOCIAL_SURFACE
    }

    async fn render(&self, surface: &dyn Surface, ctx: &RenderContext<'_>) {
        let entries = social_entries(&ctx.site.social, &self.qr_endpoint);
        tracing::debug!("🔗 Rendering {} social cards", entries.len());
        surface.render(&render_social(&entries));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn social(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_x_handle_resolves_and_encodes_qr() {
        let entries = social_entries(&social(json!({"x": "handle"})), DEFAULT_QR_ENDPOINT);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].profile_url, "https://x.com/handle");
        assert_eq!(
            entries[0].qr_url,
            "https://api.qrserver.com/v1/create-qr-code/?size=400x400&data=https%3A%2F%2Fx.com%2Fhandle"
        );
        assert_eq!(entries[0].icon, "fa-brands fa-x-twitter");
    }

    #[test]
    fn test_qr_data_encodes_everything_but_unreserved() {
        assert_eq!(
            qr_code_url("https://qr.example.com/", "https://linktr.ee/c_o.a~st-(al)!*'"),
            "https://qr.example.com/?size=400x400&data=https%3A%2F%2Flinktr.ee%2Fc_o.a~st-%28al%29%21%2A%27"
        );
    }

    #[test]
    fn test_blank_and_non_string_handles_are_filtered() {
        let entries = social_entries(
            &social(json!({
                "tiktok": "",
                "instagram": "   ",
                "youtube": null,
                "facebook": 42,
                "threads": "coastal"
            })),
            DEFAULT_QR_ENDPOINT,
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].platform, "threads");
        assert_eq!(entries[0].profile_url, "https://www.threads.net/@coastal");
    }

    #[test]
    fn test_unknown_platform_uses_raw_value() {
        let entries = social_entries(
            &social(json!({"mastodon": "https://mastodon.social/@coastal"})),
            DEFAULT_QR_ENDPOINT,
        );

        assert_eq!(entries[0].profile_url, "https://mastodon.social/@coastal");
        assert_eq!(entries[0].icon, FALLBACK_ICON);
    }

    #[test]
    fn test_platform_url_rules() {
        assert_eq!(Platform::TikTok.profile_url("c"), "https://www.tiktok.com/@c");
        assert_eq!(Platform::Discord.profile_url("https://discord.gg/abc"), "https://discord.gg/abc");
        assert_eq!(Platform::Email.profile_url("hi@example.com"), "mailto:hi@example.com");
        assert_eq!(Platform::Linktree.profile_url("coastal"), "https://linktr.ee/coastal");
        assert_eq!(Platform::from_key("X"), None);
    }

    #[test]
    fn test_render_preserves_configuration_order() {
        let entries = social_entries(
            &social(json!({"youtube": "@coastal", "email": "hi@example.com", "x": "coastal"})),
            DEFAULT_QR_ENDPOINT,
        );
        let html = render_social(&entries);

        let youtube = html.find("https://www.youtube.com/@coastal").unwrap();
        let email = html.find("mailto:hi@example.com").unwrap();
        let x = html.find("https://x.com/coastal").unwrap();
        assert!(youtube < email && email < x);
        assert_eq!(html.matches(r#"<div class="social-card">"#).count(), 3);
        assert!(html.contains(r#"alt="QR for email""#));
    }
}
