//! Authentication backends.
//!
//! [`MockAuthClient`] accepts a single demo account. [`HttpAuthClient`] forwards to two
//! JSON endpoints and trusts any 2xx answer.

use crate::auth::error::{AuthError, Result};
use crate::types::User;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Email of the demo account accepted by [`MockAuthClient`]
pub const DEMO_EMAIL: &str = "usuario@ejemplo.com";

/// Password of the demo account
pub const DEMO_PASSWORD: &str = "contraseña";

/// Future returned by [`AuthClient`] methods
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Credentials submitted by the login form
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginForm {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Where to go after a successful login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl LoginForm {
    /// Post-login target, `/` unless a local path was given
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        self.redirect
            .as_deref()
            .filter(|target| target.starts_with('/') && !target.starts_with("//"))
            .unwrap_or("/")
    }
}

/// Data submitted by the registration form
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegisterForm {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Repeated password
    pub confirm_password: String,
}

impl RegisterForm {
    /// Check the form before anything is sent
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for an empty field and
    /// [`AuthError::PasswordMismatch`] if the passwords differ.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingField(field));
            }
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Login and registration backend
pub trait AuthClient: Send + Sync {
    /// Authenticate and return the session user
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, User>;

    /// Create an account; does not log in
    fn register<'a>(&'a self, name: &'a str, email: &'a str, password: &'a str) -> AuthFuture<'a, ()>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// In-process backend with one demo account and simulated latency
#[derive(Clone, Debug)]
pub struct MockAuthClient {
    latency: Duration,
}

impl MockAuthClient {
    /// Create a mock backend answering after `latency`
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl AuthClient for MockAuthClient {
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, User> {
        Box::pin(async move {
            tokio::time::sleep(self.latency).await;
            if email == DEMO_EMAIL && password == DEMO_PASSWORD {
                Ok(User {
                    id: "1".to_string(),
                    name: "Usuario Demo".to_string(),
                    email: DEMO_EMAIL.to_string(),
                    token: None,
                })
            } else {
                Err(AuthError::InvalidCredentials)
            }
        })
    }

    fn register<'a>(&'a self, name: &'a str, email: &'a str, _password: &'a str) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            tokio::time::sleep(self.latency).await;
            tracing::debug!(%name, %email, "Mock registration accepted");
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Optional fields of a successful response
#[derive(Debug, Default, Deserialize)]
struct SuccessBody {
    id: Option<serde_json::Value>,
    name: Option<String>,
    username: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Backend calling remote login and registration endpoints
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    client: Client,
    login_url: String,
    register_url: String,
}

impl HttpAuthClient {
    /// Create a client for the two endpoints, bounding each call by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        login_url: impl Into<String>,
        register_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            login_url: login_url.into(),
            register_url: register_url.into(),
        })
    }

    /// POST `body` and return the response text of a 2xx answer
    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B, fallback: &str) -> Result<String> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let error_body = serde_json::from_str::<ErrorBody>(&text).ok();

        if status.is_success() {
            // A 2xx answer only succeeds when its body carries no `error`.
            match error_body {
                Some(ErrorBody {
                    message,
                    error: Some(error),
                }) => {
                    let message = message.unwrap_or(error);
                    tracing::warn!(%url, status = status.as_u16(), %message, "Auth endpoint reported an error");
                    return Err(AuthError::Rejected { message });
                }
                _ => return Ok(text),
            }
        }

        let message = error_body
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(%url, status = status.as_u16(), %message, "Auth endpoint rejected request");
        Err(AuthError::Rejected { message })
    }
}

fn id_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

impl AuthClient for HttpAuthClient {
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, User> {
        Box::pin(async move {
            let text = self
                .post(&self.login_url, &LoginRequest { email, password }, "Login failed")
                .await?;

            // Empty or unexpected bodies still count as success.
            let body: SuccessBody = serde_json::from_str(&text).unwrap_or_default();
            let name = body
                .name
                .or(body.username)
                .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

            Ok(User {
                id: body.id.map_or_else(|| email.to_string(), id_to_string),
                name,
                email: email.to_string(),
                token: body.token,
            })
        })
    }

    fn register<'a>(&'a self, name: &'a str, email: &'a str, password: &'a str) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            let request = RegisterRequest {
                username: name,
                email,
                password,
            };
            self.post(&self.register_url, &request, "Registration failed")
                .await
                .map(|_| ())
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
