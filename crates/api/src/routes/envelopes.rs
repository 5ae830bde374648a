//! Envelope management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{error_response, internal_error, validation_error};
use crate::{AppState, middleware::AuthUser};
use bolso_core::envelope::EnvelopeKind;
use bolso_db::repositories::envelope::{
    CreateEnvelopeInput, EnvelopeError, EnvelopeRepository, UpdateEnvelopeInput,
};
use bolso_db::{ShareRepository, entities::envelopes};
use bolso_shared::AppError;

/// Creates the envelope routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/envelopes", get(list_envelopes))
        .route("/envelopes", post(create_envelope))
        .route("/envelopes/{id}", put(update_envelope))
        .route("/envelopes/{id}", delete(delete_envelope))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating an envelope.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EnvelopePayload {
    /// Envelope name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Percentage (0-100) or amount in centavos, per `kind`.
    pub value: i64,
    /// Envelope kind: percentage or monetary.
    pub kind: String,
}

/// Serializes an envelope row for API responses.
fn envelope_json(envelope: &envelopes::Model) -> serde_json::Value {
    json!({
        "id": envelope.id,
        "user_id": envelope.user_id,
        "name": &envelope.name,
        "value": envelope.value,
        "kind": &envelope.kind,
        "is_global": envelope.is_global,
        "is_deletable": envelope.is_deletable,
    })
}

fn parse_kind(s: &str) -> Option<EnvelopeKind> {
    s.parse().ok()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/envelopes` - List envelopes visible to the caller.
///
/// Returns global envelopes plus the caller's own, ordered by name.
/// Listing does not expand through shared-account access.
async fn list_envelopes(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = EnvelopeRepository::new((*state.db).clone());

    match repo.list_for_user(auth.user_id()).await {
        Ok(list) => {
            let response: Vec<serde_json::Value> = list.iter().map(envelope_json).collect();
            (StatusCode::OK, Json(json!({ "envelopes": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list envelopes");
            error_response(&AppError::from(e))
        }
    }
}

/// POST `/envelopes` - Create a personal envelope.
async fn create_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<EnvelopePayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    let Some(kind) = parse_kind(&payload.kind) else {
        return validation_error("Envelope kind must be one of: percentage, monetary");
    };

    let repo = EnvelopeRepository::new((*state.db).clone());
    let input = CreateEnvelopeInput {
        name: payload.name,
        value: payload.value,
        kind,
    };

    match repo.create(auth.user_id(), input).await {
        Ok(envelope) => {
            info!(
                user_id = %auth.user_id(),
                envelope_id = %envelope.id,
                name = %envelope.name,
                "Envelope created"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            (StatusCode::CREATED, Json(envelope_json(&envelope))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create envelope");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT `/envelopes/{id}` - Update an envelope within the caller's scope.
async fn update_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnvelopePayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    let Some(kind) = parse_kind(&payload.kind) else {
        return validation_error("Envelope kind must be one of: percentage, monetary");
    };

    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = EnvelopeRepository::new((*state.db).clone());
    let input = UpdateEnvelopeInput {
        name: payload.name,
        value: payload.value,
        kind,
    };

    match repo.update(&scope, id, input).await {
        Ok(envelope) => {
            info!(
                user_id = %auth.user_id(),
                envelope_id = %id,
                "Envelope updated"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            (StatusCode::OK, Json(envelope_json(&envelope))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update envelope");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE `/envelopes/{id}` - Delete an envelope within the caller's scope.
async fn delete_envelope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = EnvelopeRepository::new((*state.db).clone());

    match repo.delete(&scope, id).await {
        Ok(()) => {
            info!(
                user_id = %auth.user_id(),
                envelope_id = %id,
                "Envelope deleted"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            StatusCode::NO_CONTENT.into_response()
        }
        Err(e @ EnvelopeError::NotDeletable(_)) => {
            info!(
                user_id = %auth.user_id(),
                envelope_id = %id,
                "Refused to delete permanent envelope"
            );
            error_response(&AppError::from(e))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete envelope");
            error_response(&AppError::from(e))
        }
    }
}
