use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid player id")]
    InvalidPlayerId,

    #[error("Invalid team id")]
    InvalidTeamId,

    #[error("Invalid user id")]
    InvalidUserId,

    #[error("Player is already associated with a team")]
    PlayerAlreadyRostered,

    #[error("Player is already on the transfer market")]
    PlayerAlreadyListed,

    #[error("Player is not on the transfer market")]
    PlayerNotTransferable,

    #[error("Destination team id is required for admin transfers")]
    TeamIdRequired,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("No account for this email")]
    InvalidEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token is invalid or expired")]
    InvalidRefreshToken,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl DomainError {
    /// Stable machine-readable code surfaced in error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::ValidationError(_) => "VALIDATION_ERROR",
            DomainError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            DomainError::Unauthorized => "UNAUTHORIZED",
            DomainError::InvalidId(_) => "INVALID_ID",
            DomainError::InvalidPlayerId => "INVALID_PLAYER_ID",
            DomainError::InvalidTeamId => "INVALID_TEAM_ID",
            DomainError::InvalidUserId => "INVALID_USER_ID",
            DomainError::PlayerAlreadyRostered => "PLAYER_ASSOCIATED_WITH_TEAM",
            DomainError::PlayerAlreadyListed => "PLAYER_ALREADY_TRANSFERABLE",
            DomainError::PlayerNotTransferable => "PLAYER_NOT_TRANSFERABLE",
            DomainError::TeamIdRequired => "TEAM_ID_REQUIRED",
            DomainError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            DomainError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            DomainError::InvalidEmail => "INVALID_EMAIL",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            DomainError::RepositoryError(_) => "REPOSITORY_ERROR",
        }
    }
}
