use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use domain::{MarketSearchFilters, UserRole};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::authorize;
use crate::response::{envelope, AppError};
use crate::{validate, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub id: Option<String>,
    pub min_asking_price: Option<i64>,
    pub max_asking_price: Option<i64>,
    pub player_name: Option<String>,
    pub country: Option<String>,
    pub team_name: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlayerRequest {
    pub player_id: String,
    pub asking_price: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransferRequest {
    pub player_id: String,
    pub destination_team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

/// GET /transfer. Market search over the open listings, newest first.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::User, UserRole::Admin]).await?;

    if let Some(id) = &query.id {
        validate::id("id", id)?;
    }
    let (skip, limit) = validate::page(query.skip, query.limit)?;

    let filters = MarketSearchFilters {
        id: query.id,
        min_asking_price: query.min_asking_price,
        max_asking_price: query.max_asking_price,
        player_name: query.player_name,
        country: query.country,
        team_name: query.team_name,
    };

    let (transfers, count) = state.app.market_service.search(filters, skip, limit).await?;

    Ok(envelope(
        StatusCode::OK,
        "Transfers fetched successfully",
        Some(json!({ "transfers": transfers, "count": count })),
    ))
}

/// POST /transfer. Puts a player on the market.
pub async fn list_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ListPlayerRequest>,
) -> Result<Response, AppError> {
    let principal = authorize(&state, &headers, &[UserRole::User, UserRole::Admin]).await?;

    validate::id("playerId", &payload.player_id)?;
    validate::asking_price(payload.asking_price)?;

    let listing = state
        .app
        .market_service
        .list_player(&payload.player_id, payload.asking_price, &principal)
        .await?;

    info!("listed player {} at {}", payload.player_id, payload.asking_price);
    Ok(envelope(
        StatusCode::CREATED,
        "Player listed successfully",
        Some(listing),
    ))
}

/// POST /transfer/execute. Moves the listed player to the buying team,
/// settles the asking price on both sides and closes the listing.
pub async fn execute(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ExecuteTransferRequest>,
) -> Result<Response, AppError> {
    let principal = authorize(&state, &headers, &[UserRole::User, UserRole::Admin]).await?;

    validate::id("playerId", &payload.player_id)?;
    if let Some(team_id) = &payload.destination_team_id {
        validate::id("destinationTeamId", team_id)?;
    }

    state
        .app
        .transfer_service
        .execute_transfer(
            &payload.player_id,
            &principal,
            payload.destination_team_id.as_deref(),
        )
        .await?;

    info!("transferred player {}", payload.player_id);
    Ok(envelope::<()>(
        StatusCode::OK,
        "Transfer completed successfully",
        None,
    ))
}

/// DELETE /transfer?id=... Admin only; withdraws a listing.
pub async fn delist(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, AppError> {
    authorize(&state, &headers, &[UserRole::Admin]).await?;
    validate::id("id", &query.id)?;

    state.app.market_service.delist(&query.id).await?;

    info!("withdrew listing {}", query.id);
    Ok(envelope::<()>(
        StatusCode::OK,
        "Transfer deleted successfully",
        None,
    ))
}
