use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use model::entities::{category, transaction};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::changes::{ChangeEvent, ChangedEntity};
use crate::handlers::households::require_household;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, TransactionListQuery};

/// Request structure for recording a transaction
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub household_id: i32,
    /// The member recording the transaction
    pub user_id: i32,
    /// "income" or "expense"
    pub kind: String,
    /// Strictly positive amount
    pub amount: Decimal,
    pub description: String,
    pub category_id: Option<i32>,
    /// Calendar date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Response structure for transaction operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub household_id: i32,
    pub user_id: i32,
    pub kind: String,
    pub amount: Decimal,
    pub description: String,
    pub category_id: Option<i32>,
    pub date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            household_id: model.household_id,
            user_id: model.user_id,
            kind: model.kind.as_str().to_string(),
            amount: model.amount,
            description: model.description,
            category_id: model.category_id,
            date: model.date,
            created_at: model.created_at,
        }
    }
}

/// Record a new transaction
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Household or category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[instrument(skip(state))]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!(
        "Recording transaction of {} in household {}",
        request.amount, request.household_id
    );

    let kind = transaction::TransactionKind::parse(&request.kind).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_KIND",
                format!(
                    "Unknown transaction kind '{}', expected 'income' or 'expense'",
                    request.kind
                ),
            )),
        )
    })?;

    if request.amount <= Decimal::ZERO {
        warn!("Rejecting non-positive amount: {}", request.amount);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_AMOUNT",
                "Transaction amount must be strictly positive",
            )),
        ));
    }

    require_household(&state, request.household_id).await?;

    // A category must belong to the same household as the transaction
    if let Some(category_id) = request.category_id {
        let found = category::Entity::find_by_id(category_id)
            .filter(category::Column::HouseholdId.eq(request.household_id))
            .one(&state.db)
            .await
            .map_err(|e| {
                error!("Failed to look up category: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("ERROR", "Failed to record transaction")),
                )
            })?;
        if found.is_none() {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "CATEGORY_NOT_FOUND",
                    format!(
                        "Category {} not found in household {}",
                        category_id, request.household_id
                    ),
                )),
            ));
        }
    }

    let new_transaction = transaction::ActiveModel {
        household_id: Set(request.household_id),
        user_id: Set(request.user_id),
        kind: Set(kind),
        amount: Set(request.amount),
        description: Set(request.description.clone()),
        category_id: Set(request.category_id),
        date: Set(request.date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_transaction.insert(&state.db).await {
        Ok(created) => {
            info!("Transaction recorded successfully with ID: {}", created.id);
            state.changes.publish(ChangeEvent {
                household_id: created.household_id,
                entity: ChangedEntity::Transaction,
            });
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: TransactionResponse::from(created),
                    message: "Transaction recorded successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(e) => {
            error!("Failed to record transaction: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to record transaction")),
            ))
        }
    }
}

/// List the transactions of a household
///
/// Ordered by date descending, then by insertion time descending.
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/transactions",
    params(
        ("household_id" = i32, Path, description = "Household ID"),
        TransactionListQuery
    ),
    responses(
        (status = 200, description = "List of transactions", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching transactions for household: {}", household_id);

    require_household(&state, household_id).await?;

    let mut select = transaction::Entity::find()
        .filter(transaction::Column::HouseholdId.eq(household_id))
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::CreatedAt);
    if let Some(start) = query.start_date {
        select = select.filter(transaction::Column::Date.gte(start));
    }
    if let Some(end) = query.end_date {
        select = select.filter(transaction::Column::Date.lte(end));
    }

    match select.all(&state.db).await {
        Ok(transactions) => {
            info!(
                "Retrieved {} transactions for household {}",
                transactions.len(),
                household_id
            );
            Ok(Json(ApiResponse {
                data: transactions.into_iter().map(TransactionResponse::from).collect(),
                message: "Transactions retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to fetch transactions: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch transactions")),
            ))
        }
    }
}

/// Get a single transaction by ID
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{transaction_id}",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction found", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i32>,
) -> Result<Json<ApiResponse<TransactionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching transaction: {}", transaction_id);

    match transaction::Entity::find_by_id(transaction_id).one(&state.db).await {
        Ok(Some(t)) => Ok(Json(ApiResponse {
            data: TransactionResponse::from(t),
            message: "Transaction retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "TRANSACTION_NOT_FOUND",
                format!("Transaction with ID {} not found", transaction_id),
            )),
        )),
        Err(e) => {
            error!("Failed to fetch transaction: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch transaction")),
            ))
        }
    }
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i32>,
) -> Result<Json<ApiResponse<TransactionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Deleting transaction: {}", transaction_id);

    let existing = transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to look up transaction: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to delete transaction")),
            )
        })?;
    let Some(existing) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "TRANSACTION_NOT_FOUND",
                format!("Transaction with ID {} not found", transaction_id),
            )),
        ));
    };

    let household_id = existing.household_id;
    let snapshot = existing.clone();
    match existing.delete(&state.db).await {
        Ok(_) => {
            info!("Transaction {} deleted successfully", transaction_id);
            state.changes.publish(ChangeEvent {
                household_id,
                entity: ChangedEntity::Transaction,
            });
            Ok(Json(ApiResponse {
                data: TransactionResponse::from(snapshot),
                message: "Transaction deleted successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to delete transaction: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to delete transaction")),
            ))
        }
    }
}
