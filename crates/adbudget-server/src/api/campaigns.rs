//! Read views over campaigns with optional active/brand filters.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct CampaignItem {
    pub public_id: Uuid,
    pub name: String,
    pub brand_id: i64,
    pub is_active: bool,
    pub total_spend_today: Decimal,
    pub total_spend_month: Decimal,
    pub allowed_start_hour: i16,
    pub allowed_end_hour: i16,
}

impl From<adbudget_db::CampaignRow> for CampaignItem {
    fn from(row: adbudget_db::CampaignRow) -> Self {
        Self {
            public_id: row.public_id,
            name: row.name,
            brand_id: row.brand_id,
            is_active: row.is_active,
            total_spend_today: row.total_spend_today,
            total_spend_month: row.total_spend_month,
            allowed_start_hour: row.allowed_start_hour,
            allowed_end_hour: row.allowed_end_hour,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct CampaignFilter {
    pub active: Option<bool>,
    pub brand: Option<Uuid>,
}

pub(in crate::api) async fn list_campaigns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(filter): Query<CampaignFilter>,
) -> Result<Json<ApiResponse<Vec<CampaignItem>>>, ApiError> {
    let campaigns = adbudget_db::list_campaigns(&state.pool, filter.active, filter.brand)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = campaigns.into_iter().map(CampaignItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
