//! Offline unit tests for adbudget-db pool configuration and row types.
//! These tests do not require a live database connection.

use adbudget_db::{BrandRow, CampaignBudgetRow, PoolConfig, ResetOutcome, SpendLogRow};
use adbudget_core::{AppConfig, Environment, JobSchedule};
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        campaigns_path: PathBuf::from("./config/campaigns.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        schedule: JobSchedule::default(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`BrandRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn brand_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = BrandRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        name: "Acme".to_string(),
        daily_budget: Decimal::from(100),
        monthly_budget: Decimal::from(1000),
        current_daily_spend: Decimal::ZERO,
        current_monthly_spend: Decimal::ZERO,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.name, "Acme");
    assert_eq!(row.current_daily_spend, Decimal::ZERO);
    assert_eq!(row.current_monthly_spend, Decimal::ZERO);
}

/// The joined campaign/brand view maps onto a decision snapshot without
/// reordering any figure.
#[test]
fn campaign_budget_row_snapshot_maps_fields() {
    use uuid::Uuid;

    let row = CampaignBudgetRow {
        id: 7_i64,
        public_id: Uuid::new_v4(),
        name: "Spring Sale".to_string(),
        is_active: true,
        total_spend_today: Decimal::new(2550, 2),
        total_spend_month: Decimal::from(300),
        allowed_start_hour: 9,
        allowed_end_hour: 17,
        brand_name: "Acme".to_string(),
        daily_budget: Decimal::from(100),
        monthly_budget: Decimal::from(1000),
        brand_daily_spend: Decimal::from(40),
        brand_monthly_spend: Decimal::from(400),
    };

    let snapshot = row.snapshot();
    assert_eq!(snapshot.campaign_spend_today, Decimal::new(2550, 2));
    assert_eq!(snapshot.campaign_spend_month, Decimal::from(300));
    assert_eq!(snapshot.brand_daily_spend, Decimal::from(40));
    assert_eq!(snapshot.brand_monthly_spend, Decimal::from(400));
    assert_eq!(snapshot.daily_budget, Decimal::from(100));
    assert_eq!(snapshot.monthly_budget, Decimal::from(1000));
    assert!(snapshot.strictly_under());
}

#[test]
fn spend_log_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = SpendLogRow {
        id: 3_i64,
        public_id: Uuid::new_v4(),
        campaign_id: 7_i64,
        amount: Decimal::new(1999, 2),
        created_at: Utc::now(),
    };

    assert_eq!(row.campaign_id, 7);
    assert_eq!(row.amount, Decimal::new(1999, 2));
}

#[test]
fn reset_outcome_distinguishes_skip_from_completion() {
    assert_eq!(ResetOutcome::Skipped, ResetOutcome::Skipped);
    assert_ne!(
        ResetOutcome::Skipped,
        ResetOutcome::Completed {
            campaigns: 0,
            brands: 0
        }
    );
}
