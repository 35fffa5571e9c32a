use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Datelike, Utc};
use common::DashboardSummary;
use compute::error::ComputeError;
use compute::summary::share_percentage;
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use crate::handlers::households::require_household;
use crate::schemas::{ApiResponse, AppState, DashboardQuery, ErrorResponse};

/// Get the monthly dashboard of a household
///
/// Aggregates the month's transactions into totals, a per-category
/// breakdown and a cumulative spending track, and relates the
/// budget-relevant expenses to the month's budget.
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/dashboard",
    params(
        ("household_id" = i32, Path, description = "Household ID"),
        DashboardQuery
    ),
    responses(
        (status = 200, description = "Monthly summary and budget status", body = ApiResponse<DashboardSummary>),
        (status = 400, description = "Invalid year or month", body = ErrorResponse),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardSummary>>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    debug!("Building dashboard for household {} for {}-{:02}", household_id, year, month);

    require_household(&state, household_id).await?;

    let summary = match compute::monthly_summary(&state.db, &state.calculator, household_id, year, month)
        .await
    {
        Ok(summary) => summary,
        Err(ComputeError::Month(m)) => {
            warn!("Rejecting invalid month: {}", m);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "INVALID_MONTH",
                    format!("'{}' is not a valid calendar month", m),
                )),
            ));
        }
        Err(e) => {
            error!("Failed to aggregate month: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to build dashboard")),
            ));
        }
    };

    let budget = compute::fetch::budget_for_month(&state.db, household_id, year, month)
        .await
        .map_err(|e| {
            error!("Failed to fetch budget: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to build dashboard")),
            )
        })?;

    let monthly_budget = budget.map(|b| b.amount).unwrap_or(Decimal::ZERO);
    let budget_remaining = monthly_budget - summary.budget_relevant_expenses;
    let budget_percentage = share_percentage(summary.budget_relevant_expenses, monthly_budget);

    info!(
        "Dashboard for household {} {}-{:02}: spent {} of {}",
        household_id, year, month, summary.budget_relevant_expenses, monthly_budget
    );

    Ok(Json(ApiResponse {
        data: DashboardSummary {
            year,
            month,
            monthly_budget,
            budget_remaining,
            budget_percentage,
            summary,
        },
        message: "Dashboard built successfully".to_string(),
        success: true,
    }))
}
