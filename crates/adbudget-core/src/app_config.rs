use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Cron cadence for the four recurring jobs.
///
/// Supplied to the scheduler at startup rather than hard-coded at the job
/// sites; every entry is a 6-field cron expression (seconds first).
/// The reset entries fire hourly and the job bodies themselves guard on
/// local wall-clock, so an aggressive cadence here is harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSchedule {
    pub budget_check_cron: String,
    pub dayparting_cron: String,
    pub daily_reset_cron: String,
    pub monthly_reset_cron: String,
}

impl Default for JobSchedule {
    fn default() -> Self {
        Self {
            budget_check_cron: "0 * * * * *".to_string(),
            dayparting_cron: "0 */15 * * * *".to_string(),
            daily_reset_cron: "0 0 * * * *".to_string(),
            monthly_reset_cron: "0 0 * * * *".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub campaigns_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub schedule: JobSchedule,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("campaigns_path", &self.campaigns_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("schedule", &self.schedule)
            .finish()
    }
}
