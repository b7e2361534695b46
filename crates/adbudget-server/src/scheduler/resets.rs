//! Job wrappers around the period-boundary reset transactions.
//!
//! The schedule fires these hourly; the resets themselves no-op unless the
//! local wall-clock is at the period boundary, so a drifted or restarted
//! scheduler cannot double-reset or reset at the wrong hour.

use std::sync::Arc;

use chrono::Local;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use adbudget_core::JobSchedule;
use adbudget_db::ResetOutcome;

/// Register the daily spend reset job (fires hourly, acts at local hour 0).
pub(super) async fn register_daily_reset_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    schedule: &JobSchedule,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);
    let cron = schedule.daily_reset_cron.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pool = Arc::clone(&pool);

        Box::pin(async move {
            match adbudget_db::reset_daily_spends(&pool, Local::now()).await {
                Ok(ResetOutcome::Skipped) => {
                    tracing::debug!("daily reset: outside hour 0, skipping");
                }
                Ok(ResetOutcome::Completed { campaigns, brands }) => {
                    tracing::info!(campaigns, brands, "daily reset: spend counters zeroed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "daily reset: run failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered daily reset job");
    Ok(())
}

/// Register the monthly spend reset job (fires hourly, acts on local day 1,
/// hour 0).
pub(super) async fn register_monthly_reset_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    schedule: &JobSchedule,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);
    let cron = schedule.monthly_reset_cron.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pool = Arc::clone(&pool);

        Box::pin(async move {
            match adbudget_db::reset_monthly_spends(&pool, Local::now()).await {
                Ok(ResetOutcome::Skipped) => {
                    tracing::debug!("monthly reset: outside day 1 hour 0, skipping");
                }
                Ok(ResetOutcome::Completed { campaigns, brands }) => {
                    tracing::info!(campaigns, brands, "monthly reset: spend counters zeroed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "monthly reset: run failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered monthly reset job");
    Ok(())
}
