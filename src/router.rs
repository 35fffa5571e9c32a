use crate::handlers::{
    budgets::{get_budget, set_budget},
    categories::{create_category, get_categories, seed_default_categories},
    dashboard::get_dashboard,
    events::household_events,
    health::health_check,
    households::{add_household_member, create_household, get_household, get_household_members},
    transactions::{create_transaction, delete_transaction, get_transaction, get_transactions},
    users::{create_user, get_users},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        // Household routes
        .route("/api/v1/households", post(create_household))
        .route("/api/v1/households/:household_id", get(get_household))
        .route("/api/v1/households/:household_id/members", get(get_household_members))
        .route("/api/v1/households/:household_id/members", post(add_household_member))
        // Category routes
        .route("/api/v1/households/:household_id/categories", get(get_categories))
        .route("/api/v1/households/:household_id/categories", post(create_category))
        .route(
            "/api/v1/households/:household_id/categories/defaults",
            post(seed_default_categories),
        )
        // Transaction routes
        .route("/api/v1/transactions", post(create_transaction))
        .route("/api/v1/transactions/:transaction_id", get(get_transaction))
        .route("/api/v1/transactions/:transaction_id", delete(delete_transaction))
        .route(
            "/api/v1/households/:household_id/transactions",
            get(get_transactions),
        )
        // Budget routes
        .route("/api/v1/budgets", post(set_budget))
        .route("/api/v1/households/:household_id/budget", get(get_budget))
        // Dashboard and change feed
        .route("/api/v1/households/:household_id/dashboard", get(get_dashboard))
        .route("/api/v1/households/:household_id/events", get(household_events))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
