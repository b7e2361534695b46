use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One campaign under a brand in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSeed {
    pub name: String,
    #[serde(default)]
    pub allowed_start_hour: i16,
    #[serde(default = "default_end_hour")]
    pub allowed_end_hour: i16,
}

fn default_end_hour() -> i16 {
    23
}

/// A brand with its budgets and campaigns in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSeed {
    pub name: String,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
    #[serde(default)]
    pub campaigns: Vec<CampaignSeed>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignsFile {
    pub brands: Vec<BrandSeed>,
}

/// Load and validate the brand/campaign seed configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_campaigns(path: &Path) -> Result<CampaignsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CampaignsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CampaignsFile = serde_yaml::from_str(&content)?;

    validate_campaigns(&file)?;

    Ok(file)
}

fn validate_campaigns(file: &CampaignsFile) -> Result<(), ConfigError> {
    let mut seen_brands = HashSet::new();

    for brand in &file.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if !seen_brands.insert(brand.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }

        if brand.daily_budget < Decimal::ZERO || brand.monthly_budget < Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has a negative budget",
                brand.name
            )));
        }

        let mut seen_campaigns = HashSet::new();
        for campaign in &brand.campaigns {
            if campaign.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' has a campaign with an empty name",
                    brand.name
                )));
            }

            if !seen_campaigns.insert(campaign.name.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate campaign name '{}' under brand '{}'",
                    campaign.name, brand.name
                )));
            }

            for (label, hour) in [
                ("allowed_start_hour", campaign.allowed_start_hour),
                ("allowed_end_hour", campaign.allowed_end_hour),
            ] {
                if !(0..=23).contains(&hour) {
                    return Err(ConfigError::Validation(format!(
                        "campaign '{}' has {label} {hour}; must be 0-23",
                        campaign.name
                    )));
                }
            }
        }
    }

    Ok(())
}
