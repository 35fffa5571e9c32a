use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use model::entities::{household, household_member, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::handlers::categories;
use crate::handlers::users::UserResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request structure for creating a new household
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateHouseholdRequest {
    /// Display name of the household
    pub name: String,
    /// User who creates the household; becomes its first member
    pub owner_id: i32,
}

/// Request structure for adding a member to a household
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: i32,
}

/// Response structure for household operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseholdResponse {
    pub id: i32,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<household::Model> for HouseholdResponse {
    fn from(model: household::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

/// Create a new household
///
/// The owner becomes the first member and the household is seeded with
/// the default category set.
#[utoipa::path(
    post,
    path = "/api/v1/households",
    request_body = CreateHouseholdRequest,
    responses(
        (status = 201, description = "Household created successfully", body = ApiResponse<HouseholdResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "households"
)]
#[instrument(skip(state))]
pub async fn create_household(
    State(state): State<AppState>,
    Json(request): Json<CreateHouseholdRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HouseholdResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!("Creating household: {}", request.name);

    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_NAME", "Household name must not be empty")),
        ));
    }

    let owner = user::Entity::find_by_id(request.owner_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to look up owner: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to create household")),
            )
        })?;
    if owner.is_none() {
        warn!("Owner {} does not exist", request.owner_id);
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "USER_NOT_FOUND",
                format!("User with ID {} not found", request.owner_id),
            )),
        ));
    }

    let new_household = household::ActiveModel {
        name: Set(request.name.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = match new_household.insert(&state.db).await {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to create household: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to create household")),
            ));
        }
    };

    let membership = household_member::ActiveModel {
        household_id: Set(created.id),
        user_id: Set(request.owner_id),
    };
    if let Err(e) = membership.insert(&state.db).await {
        error!("Failed to add owner as member: {}", e);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to create household")),
        ));
    }

    if let Err(e) = categories::seed_for_household(&state.db, created.id).await {
        error!("Failed to seed default categories: {}", e);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to create household")),
        ));
    }

    info!("Household created successfully with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: HouseholdResponse::from(created),
            message: "Household created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get a household by ID
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    responses(
        (status = 200, description = "Household found", body = ApiResponse<HouseholdResponse>),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "households"
)]
#[instrument(skip(state))]
pub async fn get_household(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
) -> Result<Json<ApiResponse<HouseholdResponse>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching household: {}", household_id);

    match household::Entity::find_by_id(household_id).one(&state.db).await {
        Ok(Some(h)) => Ok(Json(ApiResponse {
            data: HouseholdResponse::from(h),
            message: "Household retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "HOUSEHOLD_NOT_FOUND",
                format!("Household with ID {} not found", household_id),
            )),
        )),
        Err(e) => {
            error!("Failed to fetch household: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch household")),
            ))
        }
    }
}

/// Get all members of a household
#[utoipa::path(
    get,
    path = "/api/v1/households/{household_id}/members",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    responses(
        (status = 200, description = "List of household members", body = ApiResponse<Vec<UserResponse>>),
        (status = 404, description = "Household not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "households"
)]
#[instrument(skip(state))]
pub async fn get_household_members(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Fetching members of household: {}", household_id);

    require_household(&state, household_id).await?;

    let members = household_member::Entity::find()
        .filter(household_member::Column::HouseholdId.eq(household_id))
        .find_also_related(user::Entity)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to fetch members: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch members")),
            )
        })?;

    let users: Vec<UserResponse> = members
        .into_iter()
        .filter_map(|(_, user)| user.map(UserResponse::from))
        .collect();

    info!("Retrieved {} members for household {}", users.len(), household_id);
    Ok(Json(ApiResponse {
        data: users,
        message: "Members retrieved successfully".to_string(),
        success: true,
    }))
}

/// Add a user to a household
#[utoipa::path(
    post,
    path = "/api/v1/households/{household_id}/members",
    params(
        ("household_id" = i32, Path, description = "Household ID")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 404, description = "Household or user not found", body = ErrorResponse),
        (status = 409, description = "User is already a member", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "households"
)]
#[instrument(skip(state))]
pub async fn add_household_member(
    State(state): State<AppState>,
    Path(household_id): Path<i32>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<UserResponse>>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!("Adding user {} to household {}", request.user_id, household_id);

    require_household(&state, household_id).await?;

    let user_exists = user::Entity::find_by_id(request.user_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to add member")),
            )
        })?;
    if user_exists.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "USER_NOT_FOUND",
                format!("User with ID {} not found", request.user_id),
            )),
        ));
    }

    let already_member = household_member::Entity::find_by_id((household_id, request.user_id))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to check membership: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to add member")),
            )
        })?;
    if already_member.is_some() {
        warn!("User {} is already a member of household {}", request.user_id, household_id);
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                "ALREADY_MEMBER",
                format!("User {} is already a member of this household", request.user_id),
            )),
        ));
    }

    let membership = household_member::ActiveModel {
        household_id: Set(household_id),
        user_id: Set(request.user_id),
    };
    if let Err(e) = membership.insert(&state.db).await {
        error!("Failed to add member: {}", e);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("ERROR", "Failed to add member")),
        ));
    }

    info!("User {} added to household {}", request.user_id, household_id);

    let members = household_member::Entity::find()
        .filter(household_member::Column::HouseholdId.eq(household_id))
        .find_also_related(user::Entity)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to fetch members: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to fetch members")),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: members
                .into_iter()
                .filter_map(|(_, user)| user.map(UserResponse::from))
                .collect(),
            message: "Member added successfully".to_string(),
            success: true,
        }),
    ))
}

/// Returns 404 unless the household exists.
pub(crate) async fn require_household(
    state: &AppState,
    household_id: i32,
) -> Result<household::Model, (StatusCode, Json<ErrorResponse>)> {
    match household::Entity::find_by_id(household_id).one(&state.db).await {
        Ok(Some(h)) => Ok(h),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "HOUSEHOLD_NOT_FOUND",
                format!("Household with ID {} not found", household_id),
            )),
        )),
        Err(e) => {
            error!("Failed to look up household: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("ERROR", "Failed to look up household")),
            ))
        }
    }
}
