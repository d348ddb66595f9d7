use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use planner_core::calendar::{month_grid, YearMonth};
use planner_core::projection::by_day;

use super::{blocking, ApiError, AppState};
use crate::views::{month_href, CalendarPage};

/// GET /: jump to the current month.
pub async fn index() -> Redirect {
    let today = YearMonth::from_date(Local::now().date_naive());
    Redirect::to(&month_href(today))
}

/// GET /{year}/{month}: the month editor. Months outside 1-12 redirect
/// to the equivalent month of the neighbouring year.
pub async fn month_view(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i64)>,
) -> Result<Response, ApiError> {
    let normalized = YearMonth::normalize(year, month)?;
    if i64::from(normalized.month()) != month {
        return Ok(Redirect::to(&month_href(normalized)).into_response());
    }

    let db = state.db.clone();
    let (clients, assignments, planned) = blocking(move || {
        Ok((
            db.list_clients()?,
            db.assignments_for(normalized)?,
            db.months_with_plans()?,
        ))
    })
    .await?;

    let plan_json = serde_json::to_string(&by_day(&assignments))
        .map_err(|e| ApiError::Internal(e.into()))?;
    let page = CalendarPage::new(&month_grid(normalized), clients, plan_json, &planned);
    Ok(Html(page.render()?).into_response())
}
