use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use domain::SignUpInput;
use serde::Deserialize;
use tracing::info;

use crate::response::{envelope, AppError};
use crate::{validate, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub refresh_token: String,
}

/// POST /iam/signup. Registers the user and hands back their freshly
/// generated squad together with an open session.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Response, AppError> {
    validate::name("firstName", &payload.first_name)?;
    validate::name("lastName", &payload.last_name)?;
    validate::email(&payload.email)?;
    validate::password(&payload.password)?;

    let signed_in = state
        .app
        .auth_service
        .sign_up(SignUpInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    info!("registered user {}", signed_in.user.id);
    Ok(envelope(
        StatusCode::CREATED,
        "Signed up successfully",
        Some(signed_in),
    ))
}

/// POST /iam/signin.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Response, AppError> {
    validate::email(&payload.email)?;
    validate::password(&payload.password)?;

    let signed_in = state
        .app
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Signed in successfully",
        Some(signed_in),
    ))
}

/// POST /iam/update-session. Rotates the token pair off a refresh token.
pub async fn update_session(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<Response, AppError> {
    let signed_in = state
        .app
        .auth_service
        .refresh_session(&payload.refresh_token)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        "Session updated successfully",
        Some(signed_in),
    ))
}
