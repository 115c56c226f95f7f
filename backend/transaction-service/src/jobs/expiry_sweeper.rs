/// Pending Transaction Expiry Job
///
/// Every tick, transactions still `pending` 30 minutes after creation are
/// moved to `failed` in one bulk update.
///
/// The predicate is computed from wall-clock age on each run, so nothing about
/// sweep progress is persisted: a restart just means the next tick catches up.
/// Transitions only go `pending -> failed`.
use crate::db::{SweepOutcome, TransactionRepository};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use resilience::with_timeout_result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub const STALE_AFTER_MINUTES: i64 = 30;

/// Run a single sweep as of `now`, bounded by `store_timeout`
pub async fn sweep_once(
    repo: &dyn TransactionRepository,
    now: DateTime<Utc>,
    store_timeout: Duration,
) -> AppResult<SweepOutcome> {
    let cutoff = now - chrono::Duration::minutes(STALE_AFTER_MINUTES);
    let outcome = with_timeout_result(store_timeout, repo.expire_pending(cutoff, now)).await?;

    info!(
        event = "pending_transactions_expired",
        %cutoff,
        matched = outcome.matched,
        modified = outcome.modified
    );
    Ok(outcome)
}

/// Sweep on a fixed interval until the shutdown channel fires
///
/// A failed run is logged and the loop keeps going.
pub async fn run_expiry_sweeper(
    repo: Arc<dyn TransactionRepository>,
    every: Duration,
    store_timeout: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting transaction expiry sweeper (interval: {}s)", every.as_secs());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = sweep_once(repo.as_ref(), Utc::now(), store_timeout).await {
                    error!("Transaction expiry sweep failed: {}", e);
                }
            }
            _ = shutdown.recv() => {
                info!("Transaction expiry sweeper stopping");
                break;
            }
        }
    }
}
