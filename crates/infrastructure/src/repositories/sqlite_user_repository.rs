use crate::database::{users, SqlitePool};
use crate::repositories::repo_err;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, User, UserRepository, UserRole};

#[derive(Queryable, Debug)]
struct UserModel {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    password_digest: String,
    #[allow(dead_code)]
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    password_digest: String,
    deleted: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            role: UserRole::from_str(&model.role).unwrap_or(UserRole::User),
            password_digest: model.password_digest,
            created_at: model.created_at.and_utc(),
            updated_at: model.updated_at.and_utc(),
        }
    }
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        NewUserModel {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            password_digest: user.password_digest.clone(),
            deleted: false,
            created_at: user.created_at.naive_utc(),
            updated_at: user.updated_at.naive_utc(),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let id = id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::id.eq(id))
                .filter(users::deleted.eq(false))
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let email = email.to_string();

        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::email.eq(email))
                .filter(users::deleted.eq(false))
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        let rows = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::deleted.eq(false))
                .order(users::created_at.desc())
                .offset(skip)
                .limit(limit)
                .load::<UserModel>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;

        tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::deleted.eq(false))
                .count()
                .get_result::<i64>(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let model = NewUserModel::from(user);
        let saved = user.clone();

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(users::table)
                .values(&model)
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(saved)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self.pool.get().map_err(repo_err)?;
        let mut updated = user.clone();
        updated.updated_at = chrono::Utc::now();

        let id = updated.id.clone();
        let first_name = updated.first_name.clone();
        let last_name = updated.last_name.clone();
        let email = updated.email.clone();
        let role = updated.role.as_str().to_string();
        let password_digest = updated.password_digest.clone();
        let updated_at = updated.updated_at.naive_utc();

        tokio::task::spawn_blocking(move || {
            diesel::update(users::table.filter(users::id.eq(id)))
                .set((
                    users::first_name.eq(first_name),
                    users::last_name.eq(last_name),
                    users::email.eq(email),
                    users::role.eq(role),
                    users::password_digest.eq(password_digest),
                    users::updated_at.eq(updated_at),
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
            diesel::update(users::table.filter(users::id.eq(id)))
                .set(users::deleted.eq(true))
                .execute(&mut conn)
        })
        .await
        .map_err(repo_err)?
        .map_err(repo_err)?;

        Ok(())
    }
}
