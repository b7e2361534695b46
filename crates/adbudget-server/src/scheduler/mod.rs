//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the four
//! recurring budget-enforcement jobs. The cadence comes from the
//! [`JobSchedule`](adbudget_core::JobSchedule) table in config rather than
//! constants at the job sites; the reset jobs additionally guard on local
//! wall-clock inside the reset itself, so firing them hourly is safe.

mod enforcement;
mod resets;

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Registers all recurring enforcement jobs and starts the scheduler.
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<adbudget_core::AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    let schedule = &config.schedule;

    enforcement::register_budget_check_job(&scheduler, pool.clone(), schedule).await?;
    enforcement::register_dayparting_job(&scheduler, pool.clone(), schedule).await?;
    resets::register_daily_reset_job(&scheduler, pool.clone(), schedule).await?;
    resets::register_monthly_reset_job(&scheduler, pool, schedule).await?;

    scheduler.start().await?;
    Ok(scheduler)
}
