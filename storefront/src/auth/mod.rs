//! Authentication and session persistence.
//!
//! Thin collaborators of the storefront: a login/registration backend
//! ([`AuthClient`]) and a [`SessionManager`] that owns the signed-in user.

pub mod client;
pub mod error;
pub mod session;

pub use client::{
    AuthClient, DEMO_EMAIL, DEMO_PASSWORD, HttpAuthClient, LoginForm, MockAuthClient,
    RegisterForm,
};
pub use error::{AuthError, SessionError};
pub use session::{
    FileSessionStorage, LoginError, MemorySessionStorage, SESSION_KEY, SessionManager,
    SessionStorage,
};
