use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{RegisterRequest, UpdateUser, User, UserFilter, UserResponse};
use crate::repository::UserRepository;

/// Hard cap on page size regardless of what the client asks for
const MAX_PAGE_SIZE: usize = 100;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

// Manual impl: the derive would require `R: Clone`, but only the Arc is cloned
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user with password hashing
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::EmailTaken);
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = User::new(input.email, input.name, password_hash);

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Get a user by ID
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// List users with filters
    #[instrument(skip(self, filter))]
    pub async fn list_users(&self, mut filter: UserFilter) -> UserResult<Vec<UserResponse>> {
        filter.limit = filter.limit.min(MAX_PAGE_SIZE);

        let users = self.repository.list(filter).await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Update a user
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        // Get existing user
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        // Check for duplicate email if email is being changed
        if let Some(ref new_email) = input.email {
            if new_email.to_lowercase() != user.email.to_lowercase()
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::EmailTaken);
            }
        }

        user.apply_update(input);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Delete a user, returning the deleted record
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(user.into())
    }

    /// Verify user credentials (for login)
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        // Verify password; a wrong password reads the same as an unknown email
        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn register_input() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "Password123".to_string(),
            name: "Alice".to_string(),
        }
    }

    /// Produce a real argon2 hash without touching any repository
    fn hash_for(password: &str) -> String {
        UserService::new(MockUserRepository::new())
            .hash_password(password)
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_email_exists()
            .with(mockall::predicate::eq("alice@example.com"))
            .returning(|_| Ok(false));
        mock_repo.expect_create().returning(Ok);

        let service = UserService::new(mock_repo);
        let response = service.register(register_input()).await.unwrap();

        assert_eq!(response.email, "alice@example.com");
        assert_eq!(response.name, "Alice");
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(true));

        let service = UserService::new(mock_repo);
        let result = service.register(register_input()).await;

        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_verify_credentials_accepts_correct_password() {
        let user = User::new(
            "alice@example.com".to_string(),
            "Alice".to_string(),
            hash_for("Password123"),
        );

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(mock_repo);
        let response = service
            .verify_credentials("alice@example.com", "Password123")
            .await
            .unwrap();

        assert_eq!(response.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_wrong_password() {
        let user = User::new(
            "alice@example.com".to_string(),
            "Alice".to_string(),
            hash_for("Password123"),
        );

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(mock_repo);
        let result = service
            .verify_credentials("alice@example.com", "WrongPassword")
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service
            .verify_credentials("ghost@example.com", "Password123")
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let user = User::new(
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        );
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo
            .expect_email_exists()
            .with(mockall::predicate::eq("bob@example.com"))
            .returning(|_| Ok(true));

        let service = UserService::new(mock_repo);
        let result = service
            .update_user(
                user_id,
                UpdateUser {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_delete_user_returns_deleted_record() {
        let user = User::new(
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        );
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(user_id))
            .returning(|_| Ok(true));

        let service = UserService::new(mock_repo);
        let response = service.delete_user(user_id).await.unwrap();

        assert_eq!(response.id, user_id);
        assert_eq!(response.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.delete_user(Uuid::now_v7()).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_caps_limit() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter| filter.limit == MAX_PAGE_SIZE)
            .returning(|_| Ok(vec![]));

        let service = UserService::new(mock_repo);
        let users = service
            .list_users(UserFilter {
                limit: 5000,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(users.is_empty());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let service = UserService::new(MockUserRepository::new());

        let hash = service.hash_password("Password123").unwrap();
        assert_ne!(hash, "Password123");
        assert!(service.verify_password("Password123", &hash).unwrap());
        assert!(!service.verify_password("Password124", &hash).unwrap());
    }
}
