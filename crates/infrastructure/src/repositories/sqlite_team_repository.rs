use crate::database::{team_players, teams, SqlitePool};
use crate::repositories::repo_err;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use domain::{DomainError, Team, TeamRepository};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Queryable, Debug)]
struct TeamModel {
    id: String,
    name: String,
    country: String,
    user_id: Option<String>,
    total_cost: i64,
    balance_amount: i64,
    #[allow(dead_code)]
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = teams)]
struct NewTeamModel {
    id: String,
    name: String,
    country: String,
    user_id: Option<String>,
    total_cost: i64,
    balance_amount: i64,
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = team_players)]
struct NewRosterRow {
    team_id: String,
    player_id: String,
    position: i32,
}

impl TeamModel {
    fn into_team(self, players: Vec<String>) -> Team {
        Team {
            id: self.id,
            name: self.name,
            country: self.country,
            players,
            user: self.user_id,
            total_cost: self.total_cost,
            balance_amount: self.balance_amount,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        }
    }
}

impl From<&Team> for NewTeamModel {
    fn from(team: &Team) -> Self {
        NewTeamModel {
            id: team.id.clone(),
            name: team.name.clone(),
            country: team.country.clone(),
            user_id: team.user.clone(),
            total_cost: team.total_cost,
            balance_amount: team.balance_amount,
            deleted: false,
            created_at: team.created_at.naive_utc(),
            updated_at: team.updated_at.naive_utc(),
        }
    }
}

fn roster_of(conn: &mut Conn, team_id: &str) -> QueryResult<Vec<String>> {
    team_players::table
        .filter(team_players::team_id.eq(team_id))
        .order(team_players::position.asc())
        .select(team_players::player_id)
        .load::<String>(conn)
}

fn roster_rows(team: &Team) -> Vec<NewRosterRow> {
    team.players
        .iter()
        .enumerate()
        .map(|(position, player_id)| NewRosterRow {
            team_id: team.id.clone(),
            player_id: player_id.clone(),
            position: position as i32,
        })
        .collect()
}

fn hydrate(conn: &mut Conn, models: Vec<TeamModel>) -> QueryResult<Vec<Team>> {
    let mut out = Vec::with_capacity(models.len());
    for model in models {
        let roster = roster_of(conn, &model.id)?;
        out.push(model.into_team(roster));
    }
    Ok(out)
}

pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        let result = tokio::task::spawn_blocking(move || -> QueryResult<Option<Team>> {
            let model = teams::table
                .filter(teams::id.eq(id))
                .filter(teams::deleted.eq(false))
                .first::<TeamModel>(&mut conn)
                .optional()?;
            match model {
                Some(model) => {
                    let roster = roster_of(&mut conn, &model.id)?;
                    Ok(Some(model.into_team(roster)))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let user_id = user_id.to_string();

        let result = tokio::task::spawn_blocking(move || -> QueryResult<Option<Team>> {
            let model = teams::table
                .filter(teams::user_id.eq(user_id))
                .filter(teams::deleted.eq(false))
                .first::<TeamModel>(&mut conn)
                .optional()?;
            match model {
                Some(model) => {
                    let roster = roster_of(&mut conn, &model.id)?;
                    Ok(Some(model.into_team(roster)))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result)
    }

    async fn find_holding_player(&self, player_id: &str) -> Result<Option<Team>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let player_id = player_id.to_string();

        let result = tokio::task::spawn_blocking(move || -> QueryResult<Option<Team>> {
            let team_ids = team_players::table
                .filter(team_players::player_id.eq(player_id))
                .select(team_players::team_id)
                .load::<String>(&mut conn)?;

            let model = teams::table
                .filter(teams::id.eq_any(team_ids))
                .filter(teams::deleted.eq(false))
                .first::<TeamModel>(&mut conn)
                .optional()?;
            match model {
                Some(model) => {
                    let roster = roster_of(&mut conn, &model.id)?;
                    Ok(Some(model.into_team(roster)))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result)
    }

    async fn find_teams_holding_any(
        &self,
        player_ids: &[String],
        excluding_user: Option<&str>,
    ) -> Result<Vec<Team>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let player_ids = player_ids.to_vec();
        let excluding_user = excluding_user.map(|u| u.to_string());

        let result = tokio::task::spawn_blocking(move || -> QueryResult<Vec<Team>> {
            let team_ids = team_players::table
                .filter(team_players::player_id.eq_any(player_ids))
                .select(team_players::team_id)
                .distinct()
                .load::<String>(&mut conn)?;

            let mut query = teams::table
                .filter(teams::id.eq_any(team_ids))
                .filter(teams::deleted.eq(false))
                .into_boxed();

            // unowned teams still count as holders, hence the IS NULL arm
            if let Some(user) = excluding_user {
                query = query.filter(teams::user_id.ne(user).or(teams::user_id.is_null()));
            }

            let models = query.load::<TeamModel>(&mut conn)?;
            hydrate(&mut conn, models)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result)
    }

    async fn find_ids_by_name(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            teams::table
                .filter(teams::name.eq(name))
                .filter(teams::deleted.eq(false))
                .select(teams::id)
                .load::<String>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Team>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        let result = tokio::task::spawn_blocking(move || -> QueryResult<Vec<Team>> {
            let models = teams::table
                .filter(teams::deleted.eq(false))
                .order(teams::created_at.desc())
                .offset(skip)
                .limit(limit)
                .load::<TeamModel>(&mut conn)?;
            hydrate(&mut conn, models)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        tokio::task::spawn_blocking(move || {
            teams::table
                .filter(teams::deleted.eq(false))
                .count()
                .get_result::<i64>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)
    }

    async fn save(&self, team: &Team) -> Result<Team, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let model = NewTeamModel::from(team);
        let rows = roster_rows(team);
        let saved = team.clone();

        tokio::task::spawn_blocking(move || -> QueryResult<()> {
            diesel::insert_into(teams::table)
                .values(&model)
                .execute(&mut conn)?;
            diesel::insert_into(team_players::table)
                .values(&rows)
                .execute(&mut conn)?;
            Ok(())
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(saved)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let mut updated = team.clone();
        updated.updated_at = chrono::Utc::now();

        let rows = roster_rows(&updated);
        let id = updated.id.clone();
        let name = updated.name.clone();
        let country = updated.country.clone();
        let user_id = updated.user.clone();
        let total_cost = updated.total_cost;
        let balance_amount = updated.balance_amount;
        let updated_at = updated.updated_at.naive_utc();

        tokio::task::spawn_blocking(move || -> QueryResult<()> {
            diesel::update(teams::table.filter(teams::id.eq(id.clone())))
                .set((
                    teams::name.eq(name),
                    teams::country.eq(country),
                    teams::user_id.eq(user_id),
                    teams::total_cost.eq(total_cost),
                    teams::balance_amount.eq(balance_amount),
                    teams::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)?;

            // roster replacement is wholesale
            diesel::delete(team_players::table.filter(team_players::team_id.eq(id)))
                .execute(&mut conn)?;
            diesel::insert_into(team_players::table)
                .values(&rows)
                .execute(&mut conn)?;
            Ok(())
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> QueryResult<()> {
            diesel::update(teams::table.filter(teams::id.eq(id.clone())))
                .set(teams::deleted.eq(true))
                .execute(&mut conn)?;
            // release the roster so the players become assignable again
            diesel::delete(team_players::table.filter(team_players::team_id.eq(id)))
                .execute(&mut conn)?;
            Ok(())
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(())
    }
}
