/// daily-push - a scheduled job that posts a daily digest to Telegram.
///
/// One run fetches the weather and a poem line, has an image generated for
/// the poem, optionally adds a TianAPI daily quote and today's Todoist tasks,
/// joins everything into one message and delivers it to a Telegram chat and
/// an optional webhook.
///
/// # Architecture
///
/// The run is a straight sequence of independent steps:
/// - `clients` for each upstream API and delivery target
/// - `ai` for image generation over an ordered provider list (Bing, `OpenAI`)
/// - `worker` to compose the message and deliver it
///
/// Every remote step degrades to a fixed fallback text on failure; only a
/// missing mandatory setting stops the run, before any network I/O.
///
/// # Example
///
/// ```no_run
/// use daily_push::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     daily_push::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let report = daily_push::worker::run_daily(&config).await?;
///     println!("telegram: {:?}", report.telegram);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod clients;
pub mod core;
pub mod errors;
pub mod worker;

pub use errors::DailyError;

/// Configure structured JSON logging.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls keep the first subscriber.
///
/// # Example
///
/// ```
/// daily_push::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
