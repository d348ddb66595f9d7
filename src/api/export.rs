use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use planner_core::calendar::YearMonth;

use super::{ApiError, AppState};
use crate::export::{MonthExporter, XLSX_CONTENT_TYPE};

/// GET /export_excel/{year}/{month}: the month's schedule as an xlsx
/// attachment.
pub async fn export_excel(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Response, ApiError> {
    let month = YearMonth::new(year, month)?;
    let generated_at = Local::now().naive_local();

    let exported = tokio::task::spawn_blocking(move || {
        MonthExporter::new(&state.db, &state.export).export(month, generated_at)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    let disposition = format!("attachment; filename=\"{}\"", exported.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}
