use crate::entities::{User, UserRole};
use crate::errors::DomainError;
use crate::password;
use crate::repositories::UserRepository;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

/// Admin-facing user CRUD. Password changes re-hash here, never in storage.
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn create_user(&self, input: CreateUserInput) -> Result<User, DomainError> {
        let email = input.email.to_lowercase();

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let user = User::new(
            input.first_name,
            input.last_name,
            email,
            input.role,
            password::hash(&input.password),
        );
        user.validate()?;

        self.user_repository.save(&user).await
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        if let Some(email) = patch.email {
            let email = email.to_lowercase();
            if email != user.email {
                if self.user_repository.find_by_email(&email).await?.is_some() {
                    return Err(DomainError::EmailAlreadyRegistered);
                }
                user.email = email;
            }
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(new_password) = patch.password {
            user.password_digest = password::hash(&new_password);
        }

        user.validate()?;

        self.user_repository.update(&user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        self.user_repository.delete(id).await
    }

    pub async fn list_users(
        &self,
        id: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), DomainError> {
        if let Some(id) = id {
            let users: Vec<User> =
                self.user_repository.find_by_id(id).await?.into_iter().collect();
            let count = users.len() as i64;
            return Ok((users, count));
        }

        let users = self.user_repository.find_page(skip, limit).await?;
        let count = self.user_repository.count().await?;
        Ok((users, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::default()))
    }

    fn input() -> CreateUserInput {
        CreateUserInput {
            first_name: "Iris".to_string(),
            last_name: "Vale".to_string(),
            email: "iris@example.com".to_string(),
            password: "secret1".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn create_hashes_the_password() {
        let service = service();
        let user = service.create_user(input()).await.unwrap();
        assert_ne!(user.password_digest, "secret1");
        assert!(password::verify("secret1", &user.password_digest));
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let service = service();
        service.create_user(input()).await.unwrap();
        assert!(matches!(
            service.create_user(input()).await,
            Err(DomainError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn password_change_rehashes() {
        let service = service();
        let user = service.create_user(input()).await.unwrap();

        let updated = service
            .update_user(
                &user.id,
                UserPatch {
                    password: Some("secret2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(password::verify("secret2", &updated.password_digest));
        assert!(!password::verify("secret1", &updated.password_digest));
    }

    #[tokio::test]
    async fn email_change_checks_uniqueness() {
        let service = service();
        let first = service.create_user(input()).await.unwrap();
        let mut other = input();
        other.email = "other@example.com".to_string();
        service.create_user(other).await.unwrap();

        let err = service
            .update_user(
                &first.id,
                UserPatch {
                    email: Some("OTHER@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(err, Err(DomainError::EmailAlreadyRegistered)));
    }

    #[tokio::test]
    async fn delete_then_read_misses() {
        let service = service();
        let user = service.create_user(input()).await.unwrap();
        service.delete_user(&user.id).await.unwrap();

        let (found, count) = service.list_users(Some(&user.id), 0, 10).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(count, 0);
    }
}
