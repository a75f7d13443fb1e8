//! Login, registration and logout as driven from the account screens.

use std::time::Duration;

use weatherhub_auth::Session;
use weatherhub_client::{ApiClient, ApiResult, AuthToken, ClientError};
use weatherhub_core::{AppError, UiConfig};

use crate::forms::{LoginForm, RegisterForm};
use crate::navigation::Route;
use crate::notice::Notice;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Navigation scheduled after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success { notice: Notice, redirect: Redirect },
    Failure { notice: Notice },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn notice(&self) -> &Notice {
        match self {
            Self::Success { notice, .. } | Self::Failure { notice } => notice,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthFlow {
    client: ApiClient,
    notice_lifetime: Duration,
}

impl AuthFlow {
    pub fn new(client: ApiClient, ui: &UiConfig) -> Self {
        Self {
            client,
            notice_lifetime: Duration::from_millis(ui.auth_notice_ms),
        }
    }

    fn session(&self) -> &Session {
        self.client.session()
    }

    fn failure(&self, message: impl Into<String>) -> AuthOutcome {
        AuthOutcome::Failure {
            notice: Notice::error(message, self.notice_lifetime),
        }
    }

    /// Sign in and, on success, store the credential and identity marker.
    pub async fn login(&self, form: &LoginForm) -> AuthOutcome {
        if let Err(e) = form.validate() {
            return self.failure(e.to_string());
        }

        match self.client.signin(&form.email, &form.password).await {
            Ok(ApiResult::Success(AuthToken { token })) => {
                if let Err(e) = self.remember(&token, &form.email) {
                    tracing::error!("Failed to store session: {}", e);
                    return self.failure(AppError::from(e).user_message());
                }
                tracing::info!("Signed in as {}", form.email);
                AuthOutcome::Success {
                    notice: Notice::success("Login successful!"),
                    redirect: Redirect {
                        route: Route::Home,
                        after: LOGIN_REDIRECT_DELAY,
                    },
                }
            }
            Ok(result) => self.failure(result.error_message().unwrap_or(LOGIN_FAILED)),
            Err(e) => self.rejected("Login", &e, LOGIN_FAILED),
        }
    }

    /// Register a new account. Nothing is stored; the user is sent to the
    /// login screen afterwards.
    pub async fn register(&self, form: &RegisterForm) -> AuthOutcome {
        if let Err(e) = form.validate() {
            return self.failure(e.to_string());
        }

        match self.client.signup(&form.email, &form.password).await {
            Ok(ApiResult::Success(_)) => {
                tracing::info!("Registered {}", form.email);
                AuthOutcome::Success {
                    notice: Notice::success("Registration successful! Please login."),
                    redirect: Redirect {
                        route: Route::Login,
                        after: REGISTER_REDIRECT_DELAY,
                    },
                }
            }
            Ok(result) => self.failure(result.error_message().unwrap_or(REGISTRATION_FAILED)),
            Err(e) => self.rejected("Registration", &e, REGISTRATION_FAILED),
        }
    }

    /// Clear local state. The server signout call is best-effort: its
    /// failures are logged and never stop the local logout.
    pub async fn logout(&self) -> Redirect {
        match self.client.signout().await {
            Ok(ApiResult::Success(_)) => tracing::debug!("Server acknowledged signout"),
            Ok(result) => tracing::warn!(
                "Signout refused: {}",
                result.error_message().unwrap_or("no message")
            ),
            Err(e) => tracing::warn!("Signout error: {}", e),
        }

        if let Err(e) = self.session().logout() {
            tracing::error!("Failed to clear session: {}", e);
        }

        Redirect {
            route: Route::Login,
            after: Duration::ZERO,
        }
    }

    fn remember(&self, token: &str, email: &str) -> Result<(), weatherhub_core::StorageError> {
        self.session().set_token(token)?;
        self.session().set_user(email)
    }

    fn rejected(&self, action: &str, err: &ClientError, fallback: &str) -> AuthOutcome {
        tracing::error!("{} error: {}", action, err);
        self.failure(err.server_message().unwrap_or(fallback))
    }
}
