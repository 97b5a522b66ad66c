use crate::entities::User;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Persistence port for user accounts. Emails are stored lowercased, so
/// `find_by_email` expects an already-lowercased value.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<User>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn save(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
