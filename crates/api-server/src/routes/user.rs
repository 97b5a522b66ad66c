use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use domain::{CreateUserInput, DomainError, UserPatch, UserRole};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::authorize;
use crate::response::{envelope, AppError};
use crate::{validate, AppState};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

fn parse_role(value: &str) -> Result<UserRole, DomainError> {
    UserRole::from_str(value)
        .ok_or_else(|| DomainError::ValidationError("role is not a valid user role".into()))
}

/// GET /user. Admin only.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    if let Some(id) = &query.id {
        validate::id("id", id)?;
    }
    let (skip, limit) = validate::page(query.skip, query.limit)?;

    let (users, count) = state
        .app
        .user_service
        .list_users(query.id.as_deref(), skip, limit)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Users fetched successfully",
        Some(json!({ "users": users, "count": count })),
    ))
}

/// POST /user. Admin only; no team is generated for users created this way.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    validate::name("firstName", &payload.first_name)?;
    validate::name("lastName", &payload.last_name)?;
    validate::email(&payload.email)?;
    validate::password(&payload.password)?;
    let role = parse_role(&payload.role)?;

    let user = state
        .app
        .user_service
        .create_user(CreateUserInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            role,
        })
        .await?;

    info!("created user {}", user.id);
    Ok(envelope(
        StatusCode::CREATED,
        "User created successfully",
        Some(user),
    ))
}

/// PUT /user. Admin only.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    validate::id("id", &payload.id)?;
    if let Some(first_name) = &payload.first_name {
        validate::name("firstName", first_name)?;
    }
    if let Some(last_name) = &payload.last_name {
        validate::name("lastName", last_name)?;
    }
    if let Some(email) = &payload.email {
        validate::email(email)?;
    }
    if let Some(password) = &payload.password {
        validate::password(password)?;
    }

    let user = state
        .app
        .user_service
        .update_user(
            &payload.id,
            UserPatch {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                password: payload.password,
                role: payload.role.as_deref().map(parse_role).transpose()?,
            },
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "User updated successfully",
        Some(user),
    ))
}

/// DELETE /user?id=... Admin only; soft delete.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;
    validate::id("id", &query.id)?;

    state.app.user_service.delete_user(&query.id).await?;

    info!("deleted user {}", query.id);
    Ok(envelope::<()>(
        StatusCode::OK,
        "User deleted successfully",
        None,
    ))
}
