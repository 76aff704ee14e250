//! Statistics handlers
//!
//! Aggregation happens in SQL; the dashboard only renders the result.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{DailyRevenue, StatsSummary};
use shared::util::{DAY_MILLIS, now_millis};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::{AppError, AppResult};

const DEFAULT_SUMMARY_DAYS: i64 = 30;
const DEFAULT_DAILY_DAYS: i64 = 7;
const MAX_DAILY_DAYS: i64 = 90;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Inclusive lower bound, UTC milliseconds
    pub from: Option<i64>,
    /// Exclusive upper bound, UTC milliseconds
    pub to: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub days: Option<i64>,
}

/// Resolve the summary window, defaulting to the trailing 30 days
fn summary_range(query: &SummaryQuery, now: i64) -> AppResult<(i64, i64)> {
    for (field, value) in [("from", query.from), ("to", query.to)] {
        if let Some(v) = value
            && v < 0
        {
            return Err(AppError::validation(format!("{field} must not be negative"))
                .with_detail("field", field)
                .with_detail(field, v));
        }
    }

    let to = query.to.unwrap_or(now);
    let from = query
        .from
        .unwrap_or_else(|| to.saturating_sub(DEFAULT_SUMMARY_DAYS * DAY_MILLIS).max(0));
    if from > to {
        return Err(AppError::validation("from must not be after to")
            .with_detail("from", from)
            .with_detail("to", to));
    }
    Ok((from, to))
}

fn daily_days(query: &DailyQuery) -> AppResult<i64> {
    let days = query.days.unwrap_or(DEFAULT_DAILY_DAYS);
    if !(1..=MAX_DAILY_DAYS).contains(&days) {
        return Err(
            AppError::validation(format!("days must be between 1 and {MAX_DAILY_DAYS}"))
                .with_detail("days", days),
        );
    }
    Ok(days)
}

/// GET /api/stats/summary?from=&to=
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<StatsSummary>> {
    let (from, to) = summary_range(&query, now_millis())?;
    let summary = stats::summary(state.pool(), &user.business_id, from, to).await?;
    Ok(Json(summary))
}

/// GET /api/stats/daily?days=
pub async fn daily(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<Vec<DailyRevenue>>> {
    let days = daily_days(&query)?;
    let series = stats::daily(state.pool(), &user.business_id, days, now_millis()).await?;
    Ok(Json(series))
}
