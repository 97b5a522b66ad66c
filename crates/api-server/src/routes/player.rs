use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use domain::{
    CreatePlayerInput, DomainError, PlayerPatch, PlayerRole, UserRole,
};
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
pub struct CreatePlayerRequest {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub country: String,
    pub age: i32,
    pub market_value: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
    pub market_value: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

fn parse_role(value: &str) -> Result<PlayerRole, DomainError> {
    PlayerRole::from_str(value)
        .ok_or_else(|| DomainError::ValidationError("role is not a valid player role".into()))
}

/// GET /player. Admin-only paged list, optionally narrowed to an id.
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

    let (players, count) = state
        .app
        .player_service
        .list_players(query.id.as_deref(), skip, limit)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Players fetched successfully",
        Some(json!({ "players": players, "count": count })),
    ))
}

/// POST /player. Admin only.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    validate::name("firstName", &payload.first_name)?;
    validate::name("lastName", &payload.last_name)?;
    validate::country(&payload.country)?;
    validate::age(payload.age)?;
    validate::market_value(payload.market_value)?;
    let role = parse_role(&payload.role)?;

    let player = state
        .app
        .player_service
        .create_player(CreatePlayerInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            role,
            country: payload.country,
            age: payload.age,
            market_value: payload.market_value,
        })
        .await?;

    info!("created player {}", player.id);
    Ok(envelope(
        StatusCode::CREATED,
        "Player created successfully",
        Some(player),
    ))
}

/// PUT /player. Users may retouch names and country on their own behalf;
/// role, age and market value stay admin territory.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Response, AppError> {
    let principal = authorize(&state, &headers, &[UserRole::User, UserRole::Admin]).await?;

    validate::id("id", &payload.id)?;
    if let Some(first_name) = &payload.first_name {
        validate::name("firstName", first_name)?;
    }
    if let Some(last_name) = &payload.last_name {
        validate::name("lastName", last_name)?;
    }
    if let Some(country) = &payload.country {
        validate::country(country)?;
    }
    if let Some(age) = payload.age {
        validate::age(age)?;
    }
    if let Some(market_value) = payload.market_value {
        validate::market_value(market_value)?;
    }

    let patch = PlayerPatch {
        first_name: payload.first_name,
        last_name: payload.last_name,
        country: payload.country,
        role: payload.role.as_deref().map(parse_role).transpose()?,
        age: payload.age,
        market_value: payload.market_value,
    };

    if patch.touches_restricted_fields() && !principal.is_admin() {
        return Err(DomainError::Unauthorized.into());
    }

    let player = state.app.player_service.update_player(&payload.id, patch).await?;

    Ok(envelope(
        StatusCode::OK,
        "Player updated successfully",
        Some(player),
    ))
}

/// DELETE /player?id=... Admin only; soft delete.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;
    validate::id("id", &query.id)?;

    state.app.player_service.delete_player(&query.id).await?;

    info!("deleted player {}", query.id);
    Ok(envelope::<()>(
        StatusCode::OK,
        "Player deleted successfully",
        None,
    ))
}
