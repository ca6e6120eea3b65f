use anyhow::{Context, Result};
use clap::Parser;
use daily_push::core::config::AppConfig;
use daily_push::worker::{compose_only, make_message, run_daily};
use tracing::{error, info};

/// Post today's weather, poem, image and to-dos to Telegram.
#[derive(Debug, Parser)]
#[command(name = "daily-push", version)]
struct Cli {
    /// Compose and print the message without delivering it
    #[arg(long)]
    dry_run: bool,

    /// Weather city code, overrides WEATHER_CITY_CODE
    #[arg(long)]
    city_code: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    daily_push::setup_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env()
        .map_err(|e| {
            error!("Config error: {}", e);
            e
        })?
        .with_city_code(cli.city_code);

    if cli.dry_run {
        let digest = compose_only(&config).await.context("dry run failed")?;
        println!("{}", make_message(&digest.fragments));
        if let Some(url) = digest.image_url() {
            println!("\nimage: {url}");
        }
        return Ok(());
    }

    let report = run_daily(&config).await.context("daily run failed")?;
    info!("Telegram response: {:?}", report.telegram);
    info!("Webhook response: {:?}", report.webhook);
    Ok(())
}
