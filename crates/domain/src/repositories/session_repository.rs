use crate::entities::Session;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Persistence port for sign-in sessions (access + refresh token pairs).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> Result<Session, DomainError>;
    async fn find_by_access_token(&self, token: &str) -> Result<Option<Session>, DomainError>;
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Session>, DomainError>;
    async fn update(&self, session: &Session) -> Result<Session, DomainError>;
}
