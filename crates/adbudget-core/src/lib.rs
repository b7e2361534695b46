pub mod app_config;
pub mod budget;
pub mod campaigns;
pub mod config;
pub mod daypart;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, JobSchedule};
pub use budget::{should_be_active, BudgetSnapshot};
pub use campaigns::{load_campaigns, BrandSeed, CampaignSeed, CampaignsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use daypart::within_window;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read campaigns file {path}: {source}")]
    CampaignsFileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse campaigns file: {0}")]
    CampaignsFileParse(#[from] serde_yaml::Error),
    #[error("invalid campaigns config: {0}")]
    Validation(String),
}
