//! Auth state tracking and user-facing notifications.

use std::sync::Arc;

use portal_common::{NotificationKind, NotificationSink};
use tokio::sync::watch;
use tracing::{info, warn};

use super::local::LocalIdentityProvider;
use super::provider::{AuthError, IdentityProvider, User};

/// Observable auth state used for route gating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<AuthState>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Sets `loading` for the lifetime of one provider call.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<AuthState>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, notifier: Arc<dyn NotificationSink>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            provider,
            notifier,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|s| s.user = user);
    }

    fn report_failure(&self, context: &str, err: &AuthError, fallback: &str) {
        warn!("{context} error: {err}");
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            fallback
        } else {
            message.as_str()
        };
        self.notifier.notify(message, NotificationKind::Error);
    }

    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let _loading = LoadingGuard::start(&self.state);
        match self.provider.sign_in_with_email(email, password).await {
            Ok(user) => {
                info!(uid = %user.uid, "Signed in with email");
                self.set_user(Some(user.clone()));
                self.notifier
                    .notify("Successfully signed in!", NotificationKind::Success);
                Ok(user)
            }
            Err(e) => {
                self.report_failure("Email sign-in", &e, "Sign-in failed. Please try again.");
                Err(e)
            }
        }
    }

    /// Register a new account. The display name defaults to the local part
    /// of the email address.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, AuthError> {
        if password != confirm_password {
            let err = AuthError::PasswordMismatch;
            self.notifier.notify(&err.to_string(), NotificationKind::Error);
            return Err(err);
        }

        let _loading = LoadingGuard::start(&self.state);
        let display_name = email.split('@').next().unwrap_or_default().trim();
        let result = match self.provider.sign_up_with_email(email, password).await {
            Ok(user) => self.provider.update_display_name(&user, display_name).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(user) => {
                info!(uid = %user.uid, "Account created");
                self.set_user(Some(user.clone()));
                self.notifier
                    .notify("Account created successfully!", NotificationKind::Success);
                Ok(user)
            }
            Err(e) => {
                self.report_failure(
                    "Email sign-up",
                    &e,
                    "Account creation failed. Please try again.",
                );
                Err(e)
            }
        }
    }

    pub async fn sign_in_with_google(&self) -> Result<User, AuthError> {
        let _loading = LoadingGuard::start(&self.state);
        match self.provider.sign_in_with_google().await {
            Ok(user) => {
                info!(uid = %user.uid, "Signed in with Google");
                self.set_user(Some(user.clone()));
                self.notifier
                    .notify("Successfully signed in with Google!", NotificationKind::Success);
                Ok(user)
            }
            Err(e) => {
                warn!("Google sign-in error: {e}");
                self.notifier.notify(
                    "Google Sign-In failed. Please try again.",
                    NotificationKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Sign out. Failures are reported to the sink only.
    pub async fn logout(&self) {
        let _loading = LoadingGuard::start(&self.state);
        match self.provider.sign_out().await {
            Ok(()) => {
                self.set_user(None);
                self.notifier
                    .notify("Successfully signed out!", NotificationKind::Success);
            }
            Err(e) => {
                warn!("Logout error: {e}");
                self.notifier
                    .notify("Logout failed. Please try again.", NotificationKind::Error);
            }
        }
    }
}

/// Sign in against a fresh in-memory provider. The account is created
/// quietly first, so the user only sees the sign-in outcome.
pub async fn sign_in_local(
    notifier: Arc<dyn NotificationSink>,
    email: &str,
    password: &str,
) -> Result<(AuthService, User), AuthError> {
    let provider = Arc::new(LocalIdentityProvider::new());
    if let Err(e) = provider.register(email, password) {
        warn!("Local account setup error: {e}");
        notifier.notify(&e.to_string(), NotificationKind::Error);
        return Err(e);
    }

    let auth = AuthService::new(provider, notifier);
    let user = auth.sign_in_with_email(email, password).await?;
    Ok((auth, user))
}

/// Name used in greetings: first word of the display name, else the email
/// local part, else "User".
pub fn display_first_name(user: &User) -> String {
    user.display_name
        .as_deref()
        .and_then(|name| name.split_whitespace().next())
        .or_else(|| {
            user.email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
        })
        .unwrap_or("User")
        .to_string()
}
