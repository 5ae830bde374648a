//! Recurring payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{error_response, internal_error, validation_error};
use crate::{AppState, middleware::AuthUser};
use bolso_core::recurring::{next_occurrence, occurrences_between};
use bolso_db::repositories::recurring::{
    CreateRecurringPaymentInput, RecurringPaymentRepository,
};
use bolso_db::{ShareRepository, entities::recurring_payments};
use bolso_shared::AppError;
use bolso_shared::types::Money;

/// Creates the recurring payment routes (requires auth middleware to be
/// applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recurring-payments", get(list_recurring))
        .route("/recurring-payments", post(create_recurring))
        .route("/recurring-payments/due", get(list_due))
        .route("/recurring-payments/{id}", delete(deactivate_recurring))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a recurring payment.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateRecurringPayload {
    /// Envelope the payment draws from.
    pub envelope_id: Uuid,
    /// Free-form description.
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Amount as entered by the user.
    pub amount: String,
    /// Scheduled day of month (1-31).
    #[validate(range(min = 1, max = 31))]
    pub day_of_month: i16,
}

fn recurring_json(payment: &recurring_payments::Model) -> serde_json::Value {
    let amount = Money::from_centavos(payment.amount_centavos);
    let today = chrono::Utc::now().date_naive();
    let next_due = next_occurrence(today, u32::try_from(payment.day_of_month).unwrap_or(1));

    json!({
        "id": payment.id,
        "user_id": payment.user_id,
        "envelope_id": payment.envelope_id,
        "description": &payment.description,
        "amount_centavos": payment.amount_centavos,
        "amount_formatted": amount.format_brl(),
        "day_of_month": payment.day_of_month,
        "next_due": next_due,
        "is_active": payment.is_active,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/recurring-payments` - List active recurring payments across the
/// caller's accessible owners.
async fn list_recurring(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = RecurringPaymentRepository::new((*state.db).clone());

    match repo.list_active(&scope).await {
        Ok(list) => {
            let response: Vec<serde_json::Value> = list.iter().map(recurring_json).collect();
            (
                StatusCode::OK,
                Json(json!({ "recurring_payments": response })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list recurring payments");
            error_response(&AppError::from(e))
        }
    }
}

/// POST `/recurring-payments` - Create a recurring payment.
async fn create_recurring(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRecurringPayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = RecurringPaymentRepository::new((*state.db).clone());
    let input = CreateRecurringPaymentInput {
        envelope_id: payload.envelope_id,
        description: payload.description,
        amount: Money::parse(&payload.amount),
        day_of_month: payload.day_of_month,
    };

    match repo.create(&scope, input).await {
        Ok(payment) => {
            info!(
                user_id = %auth.user_id(),
                recurring_payment_id = %payment.id,
                "Recurring payment created"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            (StatusCode::CREATED, Json(recurring_json(&payment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create recurring payment");
            error_response(&AppError::from(e))
        }
    }
}

/// Query parameters for the due listing window.
#[derive(Debug, Deserialize)]
pub struct DueQuery {
    /// Window start (inclusive). Defaults to today.
    pub from: Option<chrono::NaiveDate>,
    /// Window end (inclusive). Defaults to 30 days after `from`.
    pub to: Option<chrono::NaiveDate>,
}

/// GET `/recurring-payments/due` - Payments falling due within a window.
async fn list_due(
    State(state): State<AppState>,
    auth: AuthUser,
    axum::extract::Query(query): axum::extract::Query<DueQuery>,
) -> impl IntoResponse {
    let from = query
        .from
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let to = query
        .to
        .unwrap_or_else(|| from + chrono::Days::new(30));

    if to < from {
        return validation_error("Window end must not precede its start");
    }

    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = RecurringPaymentRepository::new((*state.db).clone());

    match repo.list_active(&scope).await {
        Ok(list) => {
            let due: Vec<serde_json::Value> = list
                .iter()
                .flat_map(|payment| {
                    let day = u32::try_from(payment.day_of_month).unwrap_or(1);
                    occurrences_between(from, to, day)
                        .into_iter()
                        .map(|date| {
                            let amount = Money::from_centavos(payment.amount_centavos);
                            json!({
                                "recurring_payment_id": payment.id,
                                "description": &payment.description,
                                "amount_centavos": payment.amount_centavos,
                                "amount_formatted": amount.format_brl(),
                                "due_on": date,
                            })
                        })
                        .collect::<Vec<_>>()
                })
                .collect();

            (
                StatusCode::OK,
                Json(json!({ "from": from, "to": to, "due": due })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list due payments");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE `/recurring-payments/{id}` - Deactivate a recurring payment.
async fn deactivate_recurring(
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

    let repo = RecurringPaymentRepository::new((*state.db).clone());

    match repo.deactivate(&scope, id).await {
        Ok(()) => {
            info!(
                user_id = %auth.user_id(),
                recurring_payment_id = %id,
                "Recurring payment deactivated"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to deactivate recurring payment");
            error_response(&AppError::from(e))
        }
    }
}
