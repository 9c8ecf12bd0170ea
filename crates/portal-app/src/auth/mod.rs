//! Sign-in flow on top of an external identity provider.
//!
//! The provider does the actual authentication; `AuthService` tracks the
//! signed-in user, exposes a loading flag for route gating, and reports
//! every outcome to the notification sink.

mod local;
mod provider;
mod service;

pub use local::LocalIdentityProvider;
pub use provider::{AuthError, IdentityProvider, User};
pub use service::{display_first_name, sign_in_local, AuthService, AuthState};
