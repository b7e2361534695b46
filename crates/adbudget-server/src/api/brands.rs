//! Read views over brands: budget figures plus current aggregate spend.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct BrandItem {
    pub public_id: Uuid,
    pub name: String,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
    pub current_daily_spend: Decimal,
    pub current_monthly_spend: Decimal,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct BrandDetail {
    #[serde(flatten)]
    pub brand: BrandItem,
    pub campaigns: Vec<super::campaigns::CampaignItem>,
}

impl From<adbudget_db::BrandRow> for BrandItem {
    fn from(row: adbudget_db::BrandRow) -> Self {
        Self {
            public_id: row.public_id,
            name: row.name,
            daily_budget: row.daily_budget,
            monthly_budget: row.monthly_budget,
            current_daily_spend: row.current_daily_spend,
            current_monthly_spend: row.current_monthly_spend,
        }
    }
}

pub(in crate::api) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandItem>>>, ApiError> {
    let brands = adbudget_db::list_brands(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = brands.into_iter().map(BrandItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(in crate::api) async fn get_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(public_id): Path<Uuid>,
) -> Result<Json<ApiResponse<BrandDetail>>, ApiError> {
    let brand = adbudget_db::get_brand_by_public_id(&state.pool, public_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no such brand"))?;

    let campaigns = adbudget_db::list_campaigns(&state.pool, None, Some(public_id))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .into_iter()
        .map(super::campaigns::CampaignItem::from)
        .collect();

    Ok(Json(ApiResponse {
        data: BrandDetail {
            brand: BrandItem::from(brand),
            campaigns,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
