//! Identity provider contract.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("An account with this email already exists.")]
    EmailInUse,
    #[error("Password should be at least 6 characters.")]
    WeakPassword,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("{0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up_with_email(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_in_with_google(&self) -> Result<User, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn update_display_name(&self, user: &User, display_name: &str)
        -> Result<User, AuthError>;
}
