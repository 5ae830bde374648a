//! Authentication routes: registration, login, current user.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use validator::Validate;

use crate::error::{error_response, internal_error, validation_error};
use crate::{AppState, middleware::AuthUser};
use bolso_core::auth::{hash_password, validate_password_strength, verify_password};
use bolso_db::UserRepository;
use bolso_shared::AppError;
use bolso_shared::auth::{LoginResponse, UserInfo};

/// Creates the public authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the authentication routes that require a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterPayload {
    /// User email.
    #[validate(email)]
    pub email: String,
    /// User password.
    pub password: String,
    /// User full name.
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginPayload {
    /// User email.
    #[validate(email)]
    pub email: String,
    /// User password.
    pub password: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/auth/register` - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    if let Err(e) = validate_password_strength(&payload.password) {
        return validation_error(e.to_string());
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return error_response(&AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Failed to check email");
            return internal_error();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let user = match user_repo
        .create(&payload.email, &password_hash, &payload.full_name)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User registered");

    // Welcome email is best-effort: failures are logged, never surfaced.
    let email_service = state.email_service.clone();
    let to_email = user.email.clone();
    let to_name = user.full_name.clone();
    tokio::spawn(async move {
        if let Err(e) = email_service.send_welcome_email(&to_email, &to_name).await {
            warn!(error = %e, "Failed to send welcome email");
        }
    });

    let access_token = match state.jwt_service.generate_access_token(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return internal_error();
        }
    };

    (
        StatusCode::CREATED,
        Json(LoginResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
                full_name: user.full_name,
            },
            access_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

/// POST `/auth/login` - Authenticate and issue an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid_credentials(),
        Err(e) => {
            error!(error = %e, "Failed to find user");
            return internal_error();
        }
    };

    if !user.is_active {
        return invalid_credentials();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => {
            error!(error = %e, "Failed to verify password");
            return internal_error();
        }
    }

    let access_token = match state.jwt_service.generate_access_token(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");

    (
        StatusCode::OK,
        Json(LoginResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
                full_name: user.full_name,
            },
            access_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

/// GET `/auth/me` - Current authenticated user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(json!({
                "id": user.id,
                "email": user.email,
                "full_name": user.full_name,
                "is_active": user.is_active
            })),
        )
            .into_response(),
        Ok(None) => error_response(&AppError::Unauthorized(
            "Account no longer exists".to_string(),
        )),
        Err(e) => {
            error!(error = %e, "Failed to load user");
            internal_error()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// The same response for a missing account, an inactive account, and a
/// wrong password, so probing reveals nothing.
fn invalid_credentials() -> axum::response::Response {
    error_response(&AppError::Unauthorized(
        "Email or password is incorrect".to_string(),
    ))
}
