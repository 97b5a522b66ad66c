use crate::database::{sessions, SqlitePool};
use crate::repositories::repo_err;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Session, SessionRepository};

#[derive(Queryable, Debug)]
struct SessionModel {
    id: String,
    user_id: String,
    access_token: String,
    refresh_token: String,
    access_valid_till: NaiveDateTime,
    refresh_valid_till: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
struct NewSessionModel {
    id: String,
    user_id: String,
    access_token: String,
    refresh_token: String,
    access_valid_till: NaiveDateTime,
    refresh_valid_till: NaiveDateTime,
}

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            id: model.id,
            user: model.user_id,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            access_valid_till: model.access_valid_till.and_utc(),
            refresh_valid_till: model.refresh_valid_till.and_utc(),
        }
    }
}

impl From<&Session> for NewSessionModel {
    fn from(session: &Session) -> Self {
        NewSessionModel {
            id: session.id.clone(),
            user_id: session.user.clone(),
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            access_valid_till: session.access_valid_till.naive_utc(),
            refresh_valid_till: session.refresh_valid_till.naive_utc(),
        }
    }
}

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn save(&self, session: &Session) -> Result<Session, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let model = NewSessionModel::from(session);
        let saved = session.clone();

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(sessions::table)
                .values(&model)
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(saved)
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let token = token.to_string();

        let result = tokio::task::spawn_blocking(move || {
            sessions::table
                .filter(sessions::access_token.eq(token))
                .first::<SessionModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let token = token.to_string();

        let result = tokio::task::spawn_blocking(move || {
            sessions::table
                .filter(sessions::refresh_token.eq(token))
                .first::<SessionModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, session: &Session) -> Result<Session, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let updated = session.clone();

        let id = updated.id.clone();
        let access_valid_till = updated.access_valid_till.naive_utc();
        let refresh_valid_till = updated.refresh_valid_till.naive_utc();

        tokio::task::spawn_blocking(move || {
            diesel::update(sessions::table.filter(sessions::id.eq(id)))
                .set((
                    sessions::access_valid_till.eq(access_valid_till),
                    sessions::refresh_valid_till.eq(refresh_valid_till),
                ))
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(updated)
    }
}
