use crate::core::site_config::parse_site_config;
use crate::core::{SiteConfig, SiteConfigSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("site-widgets/", env!("CARGO_PKG_VERSION"));

/// 所有上游呼叫共用的 HTTP client；timeout 避免元件永遠停在載入中
pub fn build_client(request_timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// 透過 HTTP 取得站台設定 JSON
pub struct HttpSiteConfig {
    client: Client,
    url: String,
}

impl HttpSiteConfig {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SiteConfigSource for HttpSiteConfig {
    async fn load(&self) -> Result<SiteConfig> {
        tracing::debug!("Fetching site configuration from: {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        tracing::debug!("Site configuration response status: {}", response.status());
        let bytes = response.bytes().await?;
        parse_site_config(&bytes)
    }
}
