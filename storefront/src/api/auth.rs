//! Login, registration and session endpoints.
//!
//! - POST /login - authenticate and persist the session
//! - POST /register - create an account (does not log in)
//! - POST /logout - clear the session
//! - GET /session - the signed-in user, if any

use crate::auth::{LoginForm, RegisterForm};
use crate::error::AppError;
use crate::server::AppState;
use crate::types::User;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

/// Response after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The signed-in user
    pub user: User,
    /// Where the client should go next
    pub redirect: String,
}

/// Response after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Success message
    pub message: String,
    /// The login page; registering does not sign in
    pub redirect: String,
}

/// Current session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The signed-in user, `null` when signed out
    pub user: Option<User>,
}

/// Log in.
///
/// # Errors
///
/// Returns 401 with the backend's message if the credentials are rejected.
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .sessions
        .login(state.auth.as_ref(), &form.email, &form.password)
        .await?;

    Ok(Json(LoginResponse {
        user,
        redirect: form.redirect_target().to_string(),
    }))
}

/// Register a new account.
///
/// # Errors
///
/// Returns 422 if the form is invalid, 401 if the backend rejects it.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    form.validate()?;
    state
        .auth
        .register(&form.name, &form.email, &form.password)
        .await?;
    tracing::info!(email = %form.email, backend = state.auth.name(), "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created, please log in".to_string(),
            redirect: "/login".to_string(),
        }),
    ))
}

/// Log out.
///
/// # Errors
///
/// Returns 500 if the persisted session cannot be removed.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the current session.
pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.sessions.current().await,
    })
}
