use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::entities::category::{self, CategoryKind};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::handlers::households::require_household;
use crate::schemas::{ApiResponse, AppState, CategoryListQuery, ErrorResponse};

/// Categories created for every new household, matching the default set
/// users expect out of the box.
const DEFAULT_CATEGORIES: &[(&str, CategoryKind, &str, &str)] = &[
    ("groceries", CategoryKind::Expense, "#FF6B6B", "basket"),
    ("transport", CategoryKind::Expense, "#4ECDC4", "car"),
    ("entertainment", CategoryKind::Expense, "#45B7D1", "game-controller"),
    ("utilities", CategoryKind::Expense, "#FFA07A", "flash"),
    ("healthcare", CategoryKind::Expense, "#98D8C8", "medical"),
    ("shopping", CategoryKind::Expense, "#F7DC6F", "bag"),
    ("restaurant", CategoryKind::Expense, "#BB8FCE", "restaurant"),
    ("education", CategoryKind::Expense, "#85C1E9", "school"),
    ("other_expense", CategoryKind::Expense, "#B0B0B0", "ellipsis-horizontal"),
    ("salary", CategoryKind::Income, "#52C41A", "cash"),
    ("freelance", CategoryKind::Income, "#1890FF", "laptop"),
    ("investment", CategoryKind::Income, "#722ED1", "trending-up"),
    ("business", CategoryKind::Income, "#13C2C2", "business"),
    ("gift", CategoryKind::Income, "#EB2F96", "gift"),
    ("other_income", CategoryKind::Income, "#52C41A", "add-circle"),
];

/// Request structure for creating a category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// "income" or "expense"
    pub kind: String,
    /// Hex color used in dashboard charts, e.g. "#FF6B6B"
    pub color: String,
    /// Icon identifier for clients
    pub icon: String,
}

/// Response structure for category operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub household_id: i32,
    pub name: String,
    pub kind: String,
    pub color: String,
    pub icon: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            household_id: model.household_id,
            name: model.name,
            kind: model.kind.as_str().to_string(),
            color: model.color,
            icon: model.icon,
        }
    }
}

/// Inserts the default category set for a household.
/// Does nothing when the household already has categories.
pub(crate) async fn seed_for_household(db: &DbConn, household_id: i32) -> Result<u64, DbErr> {
    let existing = category::Entity::find()
        .filter(category::Column::HouseholdId.eq(household_id))
        .count(db)
        .await?;
    if existing > 0 {
        debug!(
            "Household {} already has {} categories, skipping defaults",
            household_id, existing
        );
        return Ok(0);
    }

    let models = DEFAULT_CATEGORIES.iter().map(|(name, kind, color, icon)| {
        category::ActiveModel {
            household_id: Set(household_id),
            name: Set((*name).to_string()),
            kind: Set(*kind),
            color: Set((*color).to_string()),
            icon: Set((*icon).to_string()),
            ..Default::default()
        }
    });
    category::Entity::insert_many(models).exec(db).await?;
    info!(
        "Seeded {} default categories for household {}",
        DEFAULT_CATEGORIES.len(),
        household_id
    );
    Ok(DEFAULT_CATEGORIES.len() as u64)
}

/// Get the categories of a household
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/categories",
    params(
        ("household_id" = i32, Path, description = "Household ID"),
        CategoryListQuery
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 400, description = "Invalid kind filter", body = ErrorResponse),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching categories for household: {}", household_id);

    require_household(&state, household_id).await?;

    let kind_filter = match query.kind.as_deref() {
        None => None,
        Some(raw) => match CategoryKind::parse(raw) {
            Some(kind) => Some(kind),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "INVALID_KIND",
                        format!("Unknown category kind '{}', expected 'income' or 'expense'", raw),
                    )),
                ));
            }
        },
    };

    let mut select = category::Entity::find()
        .filter(category::Column::HouseholdId.eq(household_id))
        .order_by_asc(category::Column::Name);
    if let Some(kind) = kind_filter {
        select = select.filter(category::Column::Kind.eq(kind));
    }

    match select.all(&state.db).await {
        Ok(categories) => {
            info!("Retrieved {} categories for household {}", categories.len(), household_id);
            Ok(Json(ApiResponse {
                data: categories.into_iter().map(CategoryResponse::from).collect(),
                message: "Categories retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to fetch categories: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch categories")),
            ))
        }
    }
}

/// Create a new category in a household
#[utoipa::path(
    post,
    path = "/api/v1/households/{household_id}/categories",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 409, description = "Category name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!("Creating category '{}' in household {}", request.name, household_id);

    require_household(&state, household_id).await?;

    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_NAME", "Category name must not be empty")),
        ));
    }
    let kind = CategoryKind::parse(&request.kind).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "INVALID_KIND",
                format!(
                    "Unknown category kind '{}', expected 'income' or 'expense'",
                    request.kind
                ),
            )),
        )
    })?;

    let new_category = category::ActiveModel {
        household_id: Set(household_id),
        name: Set(request.name.clone()),
        kind: Set(kind),
        color: Set(request.color.clone()),
        icon: Set(request.icon.clone()),
        ..Default::default()
    };

    match new_category.insert(&state.db).await {
        Ok(created) => {
            info!("Category created successfully with ID: {}", created.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: CategoryResponse::from(created),
                    message: "Category created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Category '{}' already exists in household {}", request.name, household_id);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "DUPLICATE_CATEGORY",
                    format!("A category named '{}' already exists", request.name),
                )),
            ))
        }
        Err(e) => {
            error!("Failed to create category: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to create category")),
            ))
        }
    }
}

/// Seed the default category set for a household
#[utoipa::path(
    post,
    path = "/api/v1/households/{household_id}/categories/defaults",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    responses(
        (status = 200, description = "Defaults seeded (or already present)", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn seed_default_categories(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Seeding default categories for household: {}", household_id);

    require_household(&state, household_id).await?;

    let inserted = seed_for_household(&state.db, household_id).await.map_err(|e| {
        error!("Failed to seed default categories: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to seed default categories")),
        )
    })?;

    let categories = category::Entity::find()
        .filter(category::Column::HouseholdId.eq(household_id))
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to fetch categories: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch categories")),
            )
        })?;

    let message = if inserted > 0 {
        format!("Seeded {} default categories", inserted)
    } else {
        "Household already has categories".to_string()
    };
    Ok(Json(ApiResponse {
        data: categories.into_iter().map(CategoryResponse::from).collect(),
        message,
        success: true,
    }))
}
