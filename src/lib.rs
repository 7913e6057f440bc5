pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::page::HtmlPage;
pub use app::site::{build_bootstrap, publish, render_page};
pub use config::{cli::LocalStorage, toml_config::ToolConfig};
pub use core::bootstrap::SiteBootstrap;
pub use utils::error::{Result, SiteError};
