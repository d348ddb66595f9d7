use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use planner_core::calendar::YearMonth;
use planner_core::models::{Assignment, PlanEntry};
use serde::{Deserialize, Serialize};

use super::{blocking, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub plan: Option<Vec<PlanEntry>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavePlanResponse {
    pub status: String,
    pub message: String,
}

/// GET /api/copy_previous_month/{year}/{month}
pub async fn copy_previous_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let month = YearMonth::new(year, month)?;
    let db = state.db.clone();
    let previous = blocking(move || db.copy_previous_month(month)).await?;
    tracing::debug!(%month, copied = previous.len(), "previous month loaded");
    Ok(Json(previous))
}

/// POST /api/save_plan: replace the whole plan of one month.
pub async fn save_plan(
    State(state): State<AppState>,
    payload: Result<Json<SavePlanRequest>, JsonRejection>,
) -> Result<Json<SavePlanResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid plan payload: {}", e.body_text())))?;

    let (Some(year), Some(month), Some(plan)) = (request.year, request.month, request.plan) else {
        return Err(ApiError::BadRequest("Incomplete data received.".into()));
    };
    let month = YearMonth::new(year, month)?;

    let db = state.db.clone();
    let saved = blocking(move || db.replace_month(month, &plan)).await?;

    Ok(Json(SavePlanResponse {
        status: "success".into(),
        message: format!(
            "{saved} assignments saved for {}/{}.",
            month.month_name(),
            month.year()
        ),
    }))
}
