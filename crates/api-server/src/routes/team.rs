use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use domain::{CreateTeamInput, TeamPatch, UserRole};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::authorize;
use crate::response::{envelope, AppError};
use crate::{validate, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub players: Vec<String>,
    pub balance_amount: i64,
    pub user: String,
    #[serde(default)]
    pub transfer: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub id: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub players: Option<Vec<String>>,
    pub balance_amount: Option<i64>,
    pub user: Option<String>,
    #[serde(default)]
    pub transfer: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

/// GET /team. Paged list, optionally narrowed to a team id or an owner.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::User, UserRole::Admin]).await?;

    if let Some(id) = &query.id {
        validate::id("id", id)?;
    }
    if let Some(user_id) = &query.user_id {
        validate::id("userId", user_id)?;
    }
    let (skip, limit) = validate::page(query.skip, query.limit)?;

    let (teams, count) = state
        .app
        .team_service
        .list_teams(query.id.as_deref(), query.user_id.as_deref(), skip, limit)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Teams fetched successfully",
        Some(json!({ "teams": teams, "count": count })),
    ))
}

/// POST /team. Admin only.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    validate::name("name", &payload.name)?;
    validate::country(&payload.country)?;
    validate::balance(payload.balance_amount)?;
    validate::id("user", &payload.user)?;
    for player_id in &payload.players {
        validate::id("players", player_id)?;
    }

    let team = state
        .app
        .team_service
        .create_team(CreateTeamInput {
            name: payload.name,
            country: payload.country,
            players: payload.players,
            balance_amount: payload.balance_amount,
            user: payload.user,
            transfer: payload.transfer,
        })
        .await?;

    info!("created team {}", team.id);
    Ok(envelope(
        StatusCode::CREATED,
        "Team created successfully",
        Some(team),
    ))
}

/// PUT /team. Admin only.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateTeamRequest>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;

    validate::id("id", &payload.id)?;
    if let Some(name) = &payload.name {
        validate::name("name", name)?;
    }
    if let Some(country) = &payload.country {
        validate::country(country)?;
    }
    if let Some(balance) = payload.balance_amount {
        validate::balance(balance)?;
    }
    if let Some(user) = &payload.user {
        validate::id("user", user)?;
    }
    if let Some(players) = &payload.players {
        for player_id in players {
            validate::id("players", player_id)?;
        }
    }

    let team = state
        .app
        .team_service
        .update_team(
            &payload.id,
            TeamPatch {
                name: payload.name,
                country: payload.country,
                players: payload.players,
                balance_amount: payload.balance_amount,
                user: payload.user,
                transfer: payload.transfer,
            },
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Team updated successfully",
        Some(team),
    ))
}

/// DELETE /team?id=... Admin only; the roster is released on the way out.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;
    validate::id("id", &query.id)?;

    state.app.team_service.delete_team(&query.id).await?;

    info!("deleted team {}", query.id);
    Ok(envelope::<()>(
        StatusCode::OK,
        "Team deleted successfully",
        None,
    ))
}
