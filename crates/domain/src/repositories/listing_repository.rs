use crate::entities::TransferListing;
use crate::errors::DomainError;
use async_trait::async_trait;

/// AND-combined search criteria for market listings. `player_ids` and
/// `team_ids` act like `$in` clauses; `None` means "no constraint", while
/// `Some(vec![])` matches nothing (an upstream name lookup found no one).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSearchCriteria {
    pub id: Option<String>,
    pub min_asking_price: Option<i64>,
    pub max_asking_price: Option<i64>,
    pub player_ids: Option<Vec<String>>,
    pub team_ids: Option<Vec<String>>,
}

/// Persistence port for transfer-market listings.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<TransferListing>, DomainError>;
    async fn find_active_by_player(
        &self,
        player_id: &str,
    ) -> Result<Option<TransferListing>, DomainError>;
    /// Matching listings, newest first.
    async fn search(
        &self,
        criteria: &ListingSearchCriteria,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TransferListing>, DomainError>;
    async fn count(&self, criteria: &ListingSearchCriteria) -> Result<i64, DomainError>;
    async fn save(&self, listing: &TransferListing) -> Result<TransferListing, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
