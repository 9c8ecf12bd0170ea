//! In-memory identity provider for the CLI and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::provider::{AuthError, IdentityProvider, User};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    password_hash: Vec<u8>,
    user: User,
}

/// Email/password accounts kept in process memory. Google sign-in is not
/// available.
#[derive(Default)]
pub struct LocalIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    next_uid: AtomicU64,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account without going through an `AuthService`, so no
    /// user-facing notification is raised.
    pub fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.lock();
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let uid = self.next_uid.fetch_add(1, Ordering::Relaxed);
        let user = User {
            uid: format!("local-{uid}"),
            email: Some(email.clone()),
            display_name: None,
        };
        accounts.insert(
            email,
            Account {
                password_hash: hash_password(password),
                user: user.clone(),
            },
        );
        Ok(user)
    }
}

fn hash_password(password: &str) -> Vec<u8> {
    Sha256::digest(password.as_bytes()).to_vec()
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail),
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email)?;
        let accounts = self.accounts.lock();
        match accounts.get(&email) {
            Some(account) if account.password_hash == hash_password(password) => {
                Ok(account.user.clone())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.register(email, password)
    }

    async fn sign_in_with_google(&self) -> Result<User, AuthError> {
        Err(AuthError::Provider(
            "Google sign-in is not available for local accounts".into(),
        ))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn update_display_name(
        &self,
        user: &User,
        display_name: &str,
    ) -> Result<User, AuthError> {
        let mut accounts = self.accounts.lock();
        let account = accounts
            .values_mut()
            .find(|a| a.user.uid == user.uid)
            .ok_or_else(|| AuthError::Provider(format!("unknown user {}", user.uid)))?;
        account.user.display_name = Some(display_name.to_string());
        Ok(account.user.clone())
    }
}
