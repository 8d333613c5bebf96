use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::{db_interaction::sweep_expired, telemetry::spawn_blocking_with_tracing, utils::DbPool};

const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// Daily batch transition of stale confirmed reservations to "completed".
// Spawned once from main; the task dies with the process. A failing tick
// is logged and the ticker keeps going.
pub fn spawn_expiry_sweeper(pool: DbPool) -> JoinHandle<()>{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            ticker.tick().await;

            let pool = pool.clone();
            let conn = match spawn_blocking_with_tracing(move || pool.get()).await {
                Ok(Ok(conn)) => conn,
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Failed to get connection for the reservation sweep");
                    continue;
                },
                Err(e) => {
                    tracing::error!(error = %e, "Threadpool error during the reservation sweep");
                    continue;
                }
            };

            match sweep_expired(conn, Utc::now().date_naive()).await {
                Ok(count) => tracing::info!(retired = count, "Reservation sweep finished"),
                Err(e) => tracing::error!(error = ?e, "Reservation sweep failed")
            }
        }
    })
}
