use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::Clients;
use super::compose::compose_digest;
use super::deliver::deliver_digest;
use crate::core::config::AppConfig;
use crate::core::models::{DailyDigest, RunReport};
use crate::errors::DailyError;

/// Composes the digest without delivering it (`--dry-run`).
///
/// # Errors
///
/// Only client construction can fail.
pub async fn compose_only(config: &AppConfig) -> Result<DailyDigest, DailyError> {
    let run_id = Uuid::new_v4();
    async {
        info!("Dry run started, delivery is skipped");
        let clients = Clients::from_config(config)?;
        Ok::<DailyDigest, DailyError>(compose_digest(config, &clients).await)
    }
    .instrument(info_span!("daily_dry_run", %run_id))
    .await
}

/// One complete daily run: compose, then deliver.
///
/// # Errors
///
/// Only client construction can fail; every remote step degrades to a fallback.
pub async fn run_daily(config: &AppConfig) -> Result<RunReport, DailyError> {
    let run_id = Uuid::new_v4();
    async {
        info!("Main started...");
        let clients = Clients::from_config(config)?;
        let digest = compose_digest(config, &clients).await;
        let report = deliver_digest(config, &clients, &digest).await;
        info!(
            "Run finished (telegram_ok={}, webhook_ok={})",
            report.telegram.is_some(),
            report.webhook.is_some()
        );
        Ok::<RunReport, DailyError>(report)
    }
    .instrument(info_span!("daily_run", %run_id))
    .await
}
