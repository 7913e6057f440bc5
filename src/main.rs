use clap::Parser;
use site_widgets::utils::{logger, validation::Validate};
use site_widgets::{publish, render_page, CliConfig, LocalStorage, SiteError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting site-widgets");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    let page = match render_page(&config).await {
        Ok(page) => page,
        Err(e) => fail(e),
    };

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - page printed to stdout");
        println!("{}", page.to_html());
        return Ok(());
    }

    let storage = LocalStorage::new(config.output.path.clone());
    match publish(&page, &storage, &config.output.filename).await {
        Ok(_) => {
            let output_file = config.output_file();
            tracing::info!("✅ Site rendered successfully!");
            tracing::info!("📁 Output saved to: {}", output_file);
            println!("✅ Site rendered successfully!");
            println!("📁 Output saved to: {}", output_file);
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: SiteError) -> ! {
    tracing::error!(
        "❌ Site render failed: {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
