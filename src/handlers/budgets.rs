use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::parse_month_key;
use model::entities::budget;
use rust_decimal::Decimal;
use sea_orm::{sea_query::OnConflict, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::changes::{ChangeEvent, ChangedEntity};
use crate::handlers::households::require_household;
use crate::schemas::{ApiResponse, AppState, BudgetQuery, ErrorResponse};

/// Request structure for setting a monthly budget
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetBudgetRequest {
    pub household_id: i32,
    /// Month key in YYYY-MM format
    pub month: String,
    /// Non-negative spending limit
    pub amount: Decimal,
}

/// Response structure for budget operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BudgetResponse {
    pub id: i32,
    pub household_id: i32,
    pub month: String,
    pub amount: Decimal,
}

impl From<budget::Model> for BudgetResponse {
    fn from(model: budget::Model) -> Self {
        Self {
            id: model.id,
            household_id: model.household_id,
            month: model.month,
            amount: model.amount,
        }
    }
}

/// Set the budget of a household for a month
///
/// Setting a month that already has a budget replaces its amount.
#[utoipa::path(
    post,
    path = "/api/v1/budgets",
    request_body = SetBudgetRequest,
    responses(
        (status = 200, description = "Budget set successfully", body = ApiResponse<BudgetResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "budgets"
)]
#[instrument(skip(state))]
pub async fn set_budget(
    State(state): State<AppState>,
    Json(request): Json<SetBudgetRequest>,
) -> Result<Json<ApiResponse<BudgetResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Setting budget of {} for household {} month {}",
        request.amount, request.household_id, request.month
    );

    let Some((year, month)) = parse_month_key(&request.month) else {
        warn!("Rejecting malformed month key: {:?}", request.month);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_MONTH",
                format!("Month must be in YYYY-MM format, got '{}'", request.month),
            )),
        ));
    };

    if request.amount < Decimal::ZERO {
        warn!("Rejecting negative budget amount: {}", request.amount);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_AMOUNT",
                "Budget amount must not be negative",
            )),
        ));
    }

    require_household(&state, request.household_id).await?;

    let new_budget = budget::ActiveModel {
        household_id: Set(request.household_id),
        month: Set(request.month.clone()),
        amount: Set(request.amount),
        ..Default::default()
    };
    let upsert = budget::Entity::insert(new_budget).on_conflict(
        OnConflict::columns([budget::Column::HouseholdId, budget::Column::Month])
            .update_column(budget::Column::Amount)
            .to_owned(),
    );
    if let Err(e) = upsert.exec(&state.db).await {
        error!("Failed to set budget: {}", e);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to set budget")),
        ));
    }

    // Re-read so the response carries the row ID, whether inserted or updated
    let stored = compute::fetch::budget_for_month(&state.db, request.household_id, year, month)
        .await
        .map_err(|e| {
            error!("Failed to read back budget: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to set budget")),
            )
        })?;
    let Some(stored) = stored else {
        error!(
            "Budget row missing after upsert for household {} month {}",
            request.household_id, request.month
        );
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to set budget")),
        ));
    };

    info!(
        "Budget set for household {} month {}: {}",
        stored.household_id, stored.month, stored.amount
    );
    state.changes.publish(ChangeEvent {
        household_id: stored.household_id,
        entity: ChangedEntity::Budget,
    });

    Ok(Json(ApiResponse {
        data: BudgetResponse::from(stored),
        message: "Budget set successfully".to_string(),
        success: true,
    }))
}

/// Get the budget of a household for a month
///
/// Returns `null` data when no budget is set for the month.
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/budget",
    params(
        ("household_id" = i32, Path, description = "Household ID"),
        BudgetQuery
    ),
    responses(
        (status = 200, description = "Budget for the month (null when unset)", body = ApiResponse<Option<BudgetResponse>>),
        (status = 400, description = "Malformed month key", body = ErrorResponse),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "budgets"
)]
#[instrument(skip(state))]
pub async fn get_budget(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Query(query): Query<BudgetQuery>,
) -> Result<Json<ApiResponse<Option<BudgetResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching budget for household {} month {}", household_id, query.month);

    let Some((year, month)) = parse_month_key(&query.month) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_MONTH",
                format!("Month must be in YYYY-MM format, got '{}'", query.month),
            )),
        ));
    };

    require_household(&state, household_id).await?;

    match compute::fetch::budget_for_month(&state.db, household_id, year, month).await {
        Ok(budget) => Ok(Json(ApiResponse {
            data: budget.map(BudgetResponse::from),
            message: "Budget retrieved successfully".to_string(),
            success: true,
        })),
        Err(e) => {
            error!("Failed to fetch budget: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch budget")),
            ))
        }
    }
}
