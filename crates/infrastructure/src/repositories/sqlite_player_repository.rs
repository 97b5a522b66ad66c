use crate::database::{players, SqlitePool};
use crate::repositories::repo_err;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Player, PlayerRepository, PlayerRole};

// Database model - separate from the domain entity
#[derive(Queryable, AsChangeset, Debug)]
#[diesel(table_name = players)]
struct PlayerModel {
    id: String,
    first_name: String,
    last_name: String,
    role: String,
    country: String,
    age: i32,
    market_value: i64,
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = players)]
struct NewPlayerModel {
    id: String,
    first_name: String,
    last_name: String,
    role: String,
    country: String,
    age: i32,
    market_value: i64,
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<PlayerModel> for Player {
    fn from(model: PlayerModel) -> Self {
        Player {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            // unknown stored roles fall back to the schema default
            role: PlayerRole::from_str(&model.role).unwrap_or(PlayerRole::Goalkeeper),
            country: model.country,
            age: model.age,
            market_value: model.market_value,
            created_at: model.created_at.and_utc(),
            updated_at: model.updated_at.and_utc(),
        }
    }
}

impl From<&Player> for NewPlayerModel {
    fn from(player: &Player) -> Self {
        NewPlayerModel {
            id: player.id.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            role: player.role.as_str().to_string(),
            country: player.country.clone(),
            age: player.age,
            market_value: player.market_value,
            deleted: false,
            created_at: player.created_at.naive_utc(),
            updated_at: player.updated_at.naive_utc(),
        }
    }
}

pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            players::table
                .filter(players::id.eq(id))
                .filter(players::deleted.eq(false))
                .first::<PlayerModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Player>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let ids = ids.to_vec();

        let rows = tokio::task::spawn_blocking(move || {
            players::table
                .filter(players::id.eq_any(ids))
                .filter(players::deleted.eq(false))
                .load::<PlayerModel>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_ids_matching(
        &self,
        name: Option<&str>,
        country: Option<&str>,
    ) -> Result<Vec<String>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let name = name.map(|n| n.to_string());
        let country = country.map(|c| c.to_string());

        let ids = tokio::task::spawn_blocking(move || {
            let mut query = players::table
                .filter(players::deleted.eq(false))
                .into_boxed();

            if let Some(name) = name {
                query = query.filter(
                    players::first_name
                        .eq(name.clone())
                        .or(players::last_name.eq(name)),
                );
            }
            if let Some(country) = country {
                query = query.filter(players::country.eq(country));
            }

            query.select(players::id).load::<String>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(ids)
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Player>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        let rows = tokio::task::spawn_blocking(move || {
            players::table
                .filter(players::deleted.eq(false))
                .order(players::created_at.desc())
                .offset(skip)
                .limit(limit)
                .load::<PlayerModel>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        tokio::task::spawn_blocking(move || {
            players::table
                .filter(players::deleted.eq(false))
                .count()
                .get_result::<i64>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)
    }

    async fn save(&self, player: &Player) -> Result<Player, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let model = NewPlayerModel::from(player);
        let saved = player.clone();

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(players::table)
                .values(&model)
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(saved)
    }

    async fn update(&self, player: &Player) -> Result<Player, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let mut updated = player.clone();
        updated.updated_at = chrono::Utc::now();

        let id = updated.id.clone();
        let first_name = updated.first_name.clone();
        let last_name = updated.last_name.clone();
        let role = updated.role.as_str().to_string();
        let country = updated.country.clone();
        let age = updated.age;
        let market_value = updated.market_value;
        let updated_at = updated.updated_at.naive_utc();

        tokio::task::spawn_blocking(move || {
            diesel::update(players::table.filter(players::id.eq(id)))
                .set((
                    players::first_name.eq(first_name),
                    players::last_name.eq(last_name),
                    players::role.eq(role),
                    players::country.eq(country),
                    players::age.eq(age),
                    players::market_value.eq(market_value),
                    players::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        tokio::task::spawn_blocking(move || {
            diesel::update(players::table.filter(players::id.eq(id)))
                .set(players::deleted.eq(true))
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(())
    }
}
