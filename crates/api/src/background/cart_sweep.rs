//! Periodic removal of idle cart sessions from PostgreSQL.
//!
//! Carts untouched for longer than the session TTL are already invisible to
//! readers; this job reclaims their rows.

use std::time::Duration;

use bazaar_db::store::PgStore;
use tokio_util::sync::CancellationToken;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(store: PgStore, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Cart session sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cart session sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match store.sweep_idle_carts().await {
                    Ok(0) => tracing::debug!("Cart sweep: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Cart sweep: purged idle sessions"),
                    Err(e) => tracing::error!(error = %e, "Cart sweep failed"),
                }
            }
        }
    }
}
