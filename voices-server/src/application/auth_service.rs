use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{
    LoginRequest, RegisterRequest, UpdateProfileRequest, User, validate_password,
};

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AuthService<R> {
    // Verified against when the email is unknown so that lookups take the
    // same time as a real password check.
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = self.hash_password(&req.password)?;

        self.repo
            .create_user(NewUser {
                name: req.name,
                email: req.email,
                password_hash,
            })
            .await
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let creds = match self.repo.find_by_email(&req.email).await? {
            Some(creds) => creds,
            None => {
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &creds.password_hash)?;

        Ok(creds.user)
    }

    pub(crate) async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        validate_password(new_password)?;

        let creds = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;

        self.verify_password(current_password, &creds.password_hash)
            .map_err(|err| match err {
                DomainError::InvalidCredentials => DomainError::CurrentPasswordMismatch,
                other => other,
            })?;

        let password_hash = self.hash_password(new_password)?;
        let updated = self.repo.update_password(user_id, &password_hash).await?;
        if !updated {
            return Err(DomainError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let req = req.validate()?;

        self.repo
            .update_profile(user_id, &req.name, &req.email)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }

    pub(crate) async fn user_info(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .map(|creds| creds.user)
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};

    #[derive(Clone, Default)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        stored_credentials: Arc<Mutex<Option<UserCredentials>>>,
        create_fails_duplicate: Arc<Mutex<bool>>,
        password_updates: Arc<Mutex<Vec<(i64, String)>>>,
    }

    impl FakeUserRepo {
        fn set_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .stored_credentials
                .lock()
                .expect("credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            if *self
                .create_fails_duplicate
                .lock()
                .expect("duplicate flag mutex poisoned")
            {
                return Err(DomainError::AlreadyExists("Email already exists".to_string()));
            }
            let user = sample_user(1, &input.name, &input.email);
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(user)
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .stored_credentials
                .lock()
                .expect("credentials mutex poisoned")
                .clone())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .stored_credentials
                .lock()
                .expect("credentials mutex poisoned")
                .clone())
        }

        async fn update_profile(
            &self,
            id: i64,
            name: &str,
            email: &str,
        ) -> Result<Option<User>, DomainError> {
            Ok(Some(sample_user(id, name, email)))
        }

        async fn update_password(
            &self,
            id: i64,
            password_hash: &str,
        ) -> Result<bool, DomainError> {
            self.password_updates
                .lock()
                .expect("password updates mutex poisoned")
                .push((id, password_hash.to_string()));
            Ok(true)
        }

        async fn total_users(&self) -> Result<i64, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn register_hashes_password_before_storing() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone());

        let req = RegisterRequest {
            name: "  Alice  ".to_string(),
            email: "  ALICE@Example.com  ".to_string(),
            password: "secret".to_string(),
        };

        let user = service.register(req).await.expect("register must succeed");
        assert_eq!(user.email, "alice@example.com");

        let created = repo.take_created_input().expect("create_user must be called");
        assert_eq!(created.name, "Alice");
        assert_eq!(created.email, "alice@example.com");
        assert_ne!(created.password_hash, "secret");
        assert!(created.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn register_propagates_duplicate_email() {
        let repo = FakeUserRepo::default();
        *repo
            .create_fails_duplicate
            .lock()
            .expect("duplicate flag mutex poisoned") = true;
        let service = AuthService::new(repo);

        let req = RegisterRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        };

        let err = service.register(req).await.expect_err("register must fail");
        match err {
            DomainError::AlreadyExists(message) => assert_eq!(message, "Email already exists"),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_is_generic_for_missing_user_and_wrong_password() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone());

        // Unknown email.
        repo.set_credentials(None);
        let missing = service
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .expect_err("login must fail");

        // Known email, wrong password.
        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "Alice", "alice@example.com"),
            password_hash: hash,
        }));
        let wrong = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .expect_err("login must fail");

        assert!(matches!(missing, DomainError::InvalidCredentials));
        assert!(matches!(wrong, DomainError::InvalidCredentials));
        assert_eq!(missing.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn login_returns_user_for_valid_credentials() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(7, "Alice", "alice@example.com"),
            password_hash: hash,
        }));

        let user = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .expect("login must succeed");
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn change_password_rejects_wrong_current_password() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone());

        let hash = service
            .hash_password("old-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "Alice", "alice@example.com"),
            password_hash: hash,
        }));

        let err = service
            .change_password(1, "not-the-old-password", "new-password")
            .await
            .expect_err("change must fail");
        assert!(matches!(err, DomainError::CurrentPasswordMismatch));
        assert!(repo
            .password_updates
            .lock()
            .expect("password updates mutex poisoned")
            .is_empty());
    }

    #[tokio::test]
    async fn change_password_stores_new_hash() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone());

        let hash = service
            .hash_password("old-password")
            .expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "Alice", "alice@example.com"),
            password_hash: hash,
        }));

        service
            .change_password(1, "old-password", "new-password")
            .await
            .expect("change must succeed");

        let updates = repo
            .password_updates
            .lock()
            .expect("password updates mutex poisoned");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 1);
        assert!(updates[0].1.starts_with("$argon2id$"));
    }

    fn sample_user(id: i64, name: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
