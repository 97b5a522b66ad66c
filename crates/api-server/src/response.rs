use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use domain::DomainError;
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{ statusCode, message, data? }`.
pub fn envelope<T: Serialize>(status: StatusCode, message: &str, data: Option<T>) -> Response {
    let body = match data {
        Some(data) => json!({
            "statusCode": status.as_u16(),
            "message": message,
            "data": data,
        }),
        None => json!({
            "statusCode": status.as_u16(),
            "message": message,
        }),
    };
    (status, Json(body)).into_response()
}

/// Handler error type; every `DomainError` maps to a stable code and an
/// HTTP status, and renders as `{ statusCode, error, message }`.
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError(error)
    }
}

fn status_of(error: &DomainError) -> StatusCode {
    match error {
        DomainError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        DomainError::Unauthorized => StatusCode::FORBIDDEN,
        DomainError::InvalidId(_)
        | DomainError::InvalidPlayerId
        | DomainError::InvalidTeamId
        | DomainError::InvalidUserId
        | DomainError::PlayerNotTransferable => StatusCode::NOT_FOUND,
        DomainError::PlayerAlreadyRostered
        | DomainError::PlayerAlreadyListed
        | DomainError::EmailAlreadyRegistered => StatusCode::CONFLICT,
        DomainError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let body = json!({
            "statusCode": status.as_u16(),
            "error": self.0.code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        assert_eq!(
            status_of(&DomainError::AuthenticationFailed),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(&DomainError::Unauthorized), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(&DomainError::PlayerNotTransferable),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(&DomainError::PlayerAlreadyListed),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(&DomainError::InsufficientFunds),
            StatusCode::BAD_REQUEST
        );
    }
}
