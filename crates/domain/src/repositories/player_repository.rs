use crate::entities::Player;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Persistence port for players. Soft-deleted rows are invisible to every
/// method here.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, DomainError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Player>, DomainError>;
    /// Ids of players whose first or last name matches `name` exactly and/or
    /// whose country matches; both filters combine with AND.
    async fn find_ids_matching(
        &self,
        name: Option<&str>,
        country: Option<&str>,
    ) -> Result<Vec<String>, DomainError>;
    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Player>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn save(&self, player: &Player) -> Result<Player, DomainError>;
    async fn update(&self, player: &Player) -> Result<Player, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
