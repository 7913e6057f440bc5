pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "site-widgets")]
#[command(about = "Render the site page: branding, weather, tides, news and social widgets")]
pub struct CliConfig {
    /// Path to the TOML tool configuration (defaults apply if the file is absent)
    #[arg(short, long, default_value = "site-widgets.toml")]
    pub config: String,

    /// Override site.config_source (JSON path or URL)
    #[arg(long)]
    pub site_config: Option<String>,

    /// Override output.path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the rendered page to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取 TOML 設定並套用命令列覆蓋
    pub fn resolve(&self) -> crate::utils::error::Result<toml_config::ToolConfig> {
        let mut config = if std::path::Path::new(&self.config).exists() {
            tracing::info!("📁 Loading configuration from: {}", self.config);
            toml_config::ToolConfig::from_file(&self.config)?
        } else {
            tracing::info!("📁 {} not found, using defaults", self.config);
            toml_config::ToolConfig::default()
        };

        if let Some(source) = &self.site_config {
            tracing::info!("🔧 Site configuration overridden to: {}", source);
            config.site.config_source = source.clone();
        }
        if let Some(output) = &self.output {
            tracing::info!("🔧 Output path overridden to: {}", output);
            config.output.path = output.clone();
        }

        Ok(config)
    }
}
