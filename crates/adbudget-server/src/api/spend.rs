//! Spend journal views and the spend intake endpoint.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct SpendLogItem {
    pub public_id: Uuid,
    pub campaign_id: i64,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<adbudget_db::SpendLogRow> for SpendLogItem {
    fn from(row: adbudget_db::SpendLogRow) -> Self {
        Self {
            public_id: row.public_id,
            campaign_id: row.campaign_id,
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct SpendLogFilter {
    pub campaign: Option<Uuid>,
    pub limit: Option<i64>,
}

pub(in crate::api) async fn list_spend_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(filter): Query<SpendLogFilter>,
) -> Result<Json<ApiResponse<Vec<SpendLogItem>>>, ApiError> {
    let limit = normalize_limit(filter.limit);
    let logs = adbudget_db::list_spend_logs(&state.pool, filter.campaign, limit)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = logs.into_iter().map(SpendLogItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct RecordSpendBody {
    pub campaign_id: Uuid,
    pub amount: Decimal,
}

pub(in crate::api) async fn record_spend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RecordSpendBody>,
) -> Result<Json<ApiResponse<SpendLogItem>>, ApiError> {
    let log = adbudget_db::record_spend(&state.pool, body.campaign_id, body.amount)
        .await
        .map_err(|e| match e {
            adbudget_db::DbError::NotFound => {
                ApiError::new(req_id.0.clone(), "not_found", "no such campaign")
            }
            other => map_db_error(req_id.0.clone(), &other),
        })?;

    Ok(Json(ApiResponse {
        data: SpendLogItem::from(log),
        meta: ResponseMeta::new(req_id.0),
    }))
}
