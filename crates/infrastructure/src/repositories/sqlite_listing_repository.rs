use crate::database::{transfer_listings, SqlitePool};
use crate::repositories::repo_err;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, ListingRepository, ListingSearchCriteria, TransferListing};

#[derive(Queryable, Debug)]
struct ListingModel {
    id: String,
    player_id: String,
    team_id: Option<String>,
    asking_price: i64,
    #[allow(dead_code)]
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = transfer_listings)]
struct NewListingModel {
    id: String,
    player_id: String,
    team_id: Option<String>,
    asking_price: i64,
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<ListingModel> for TransferListing {
    fn from(model: ListingModel) -> Self {
        TransferListing {
            id: model.id,
            player: model.player_id,
            team: model.team_id,
            asking_price: model.asking_price,
            created_at: model.created_at.and_utc(),
            updated_at: model.updated_at.and_utc(),
        }
    }
}

impl From<&TransferListing> for NewListingModel {
    fn from(listing: &TransferListing) -> Self {
        NewListingModel {
            id: listing.id.clone(),
            player_id: listing.player.clone(),
            team_id: listing.team.clone(),
            asking_price: listing.asking_price,
            deleted: false,
            created_at: listing.created_at.naive_utc(),
            updated_at: listing.updated_at.naive_utc(),
        }
    }
}

type BoxedQuery<'a> = transfer_listings::BoxedQuery<'a, diesel::sqlite::Sqlite>;

fn apply_criteria(criteria: &ListingSearchCriteria) -> BoxedQuery<'static> {
    let mut query = transfer_listings::table
        .filter(transfer_listings::deleted.eq(false))
        .into_boxed();

    if let Some(id) = &criteria.id {
        query = query.filter(transfer_listings::id.eq(id.clone()));
    }
    if let Some(min) = criteria.min_asking_price {
        query = query.filter(transfer_listings::asking_price.ge(min));
    }
    if let Some(max) = criteria.max_asking_price {
        query = query.filter(transfer_listings::asking_price.le(max));
    }
    if let Some(player_ids) = &criteria.player_ids {
        query = query.filter(transfer_listings::player_id.eq_any(player_ids.clone()));
    }
    if let Some(team_ids) = &criteria.team_ids {
        query = query.filter(transfer_listings::team_id.eq_any(
            team_ids.iter().cloned().map(Some).collect::<Vec<_>>(),
        ));
    }

    query
}

pub struct SqliteListingRepository {
    pool: SqlitePool,
}

impl SqliteListingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for SqliteListingRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<TransferListing>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            transfer_listings::table
                .filter(transfer_listings::id.eq(id))
                .filter(transfer_listings::deleted.eq(false))
                .first::<ListingModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_active_by_player(
        &self,
        player_id: &str,
    ) -> Result<Option<TransferListing>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let player_id = player_id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            transfer_listings::table
                .filter(transfer_listings::player_id.eq(player_id))
                .filter(transfer_listings::deleted.eq(false))
                .first::<ListingModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn search(
        &self,
        criteria: &ListingSearchCriteria,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TransferListing>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let criteria = criteria.clone();

        let rows = tokio::task::spawn_blocking(move || {
            apply_criteria(&criteria)
                .order(transfer_listings::created_at.desc())
                .offset(skip)
                .limit(limit)
                .load::<ListingModel>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, criteria: &ListingSearchCriteria) -> Result<i64, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let criteria = criteria.clone();

        tokio::task::spawn_blocking(move || {
            apply_criteria(&criteria).count().get_result::<i64>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)
    }

    async fn save(&self, listing: &TransferListing) -> Result<TransferListing, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let model = NewListingModel::from(listing);
        let saved = listing.clone();

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(transfer_listings::table)
                .values(&model)
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(saved)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        tokio::task::spawn_blocking(move || {
            diesel::update(transfer_listings::table.filter(transfer_listings::id.eq(id)))
                .set(transfer_listings::deleted.eq(true))
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(())
    }
}
