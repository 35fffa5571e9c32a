use chrono::NaiveDate;
use common::{BudgetTrackPoint, CategorySlice, DashboardSummary, MonthlySummary};
use compute::summary::MonthlySummaryCalculator;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::changes::ChangeFeed;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Change feed notifying subscribers about record mutations
    pub changes: ChangeFeed,
    /// Aggregator with the injected fixed-cost classification table
    pub calculator: MonthlySummaryCalculator,
}

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Year to aggregate (defaults to the current year)
    pub year: Option<i32>,
    /// Month to aggregate, 1-12 (defaults to the current month)
    pub month: Option<u32>,
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// Only include transactions on or after this date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Only include transactions on or before this date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryListQuery {
    /// Restrict to one kind: "income" or "expense"
    pub kind: Option<String>,
}

/// Query parameters for fetching a budget
#[derive(Debug, Deserialize, IntoParams)]
pub struct BudgetQuery {
    /// Month key in YYYY-MM format
    pub month: String,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::households::create_household,
        crate::handlers::households::get_household,
        crate::handlers::households::get_household_members,
        crate::handlers::households::add_household_member,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::create_category,
        crate::handlers::categories::seed_default_categories,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::get_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::budgets::get_budget,
        crate::handlers::budgets::set_budget,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::events::household_events,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MonthlySummary,
            CategorySlice,
            BudgetTrackPoint,
            DashboardSummary,
            crate::changes::ChangeEvent,
            crate::changes::ChangedEntity,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::households::CreateHouseholdRequest,
            crate::handlers::households::AddMemberRequest,
            crate::handlers::households::HouseholdResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::budgets::SetBudgetRequest,
            crate::handlers::budgets::BudgetResponse,
            ApiResponse<crate::handlers::users::UserResponse>,
            ApiResponse<Vec<crate::handlers::users::UserResponse>>,
            ApiResponse<crate::handlers::households::HouseholdResponse>,
            ApiResponse<crate::handlers::categories::CategoryResponse>,
            ApiResponse<Vec<crate::handlers::categories::CategoryResponse>>,
            ApiResponse<crate::handlers::transactions::TransactionResponse>,
            ApiResponse<Vec<crate::handlers::transactions::TransactionResponse>>,
            ApiResponse<crate::handlers::budgets::BudgetResponse>,
            ApiResponse<Option<crate::handlers::budgets::BudgetResponse>>,
            ApiResponse<DashboardSummary>,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "households", description = "Household management"),
        (name = "categories", description = "Transaction categories"),
        (name = "transactions", description = "Income and expense records"),
        (name = "budgets", description = "Monthly budgets"),
        (name = "dashboard", description = "Monthly summary and budget track"),
        (name = "events", description = "Change notifications"),
    ),
    info(
        title = "Hauskasse API",
        description = "Household finance tracker - shared transactions, monthly budgets, and spending dashboards",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
