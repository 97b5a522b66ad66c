pub mod sqlite_listing_repository;
pub mod sqlite_player_repository;
pub mod sqlite_session_repository;
pub mod sqlite_team_repository;
pub mod sqlite_user_repository;

pub use sqlite_listing_repository::SqliteListingRepository;
pub use sqlite_player_repository::SqlitePlayerRepository;
pub use sqlite_session_repository::SqliteSessionRepository;
pub use sqlite_team_repository::SqliteTeamRepository;
pub use sqlite_user_repository::SqliteUserRepository;

use domain::DomainError;

pub(crate) fn repo_err<E: std::fmt::Display>(error: E) -> DomainError {
    DomainError::RepositoryError(error.to_string())
}
