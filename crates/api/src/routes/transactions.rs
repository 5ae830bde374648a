//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{error_response, internal_error, validation_error};
use crate::{AppState, middleware::AuthUser};
use bolso_core::ledger::{TransactionKind, TransactionStatus};
use bolso_db::repositories::transaction::{CreateTransactionInput, TransactionRepository};
use bolso_db::{ShareRepository, UserRepository, entities::transactions};
use bolso_shared::AppError;
use bolso_shared::types::{Money, PageRequest};

/// Creates the transaction routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a transaction.
///
/// `amount` is free-form user input; everything except ASCII digits is
/// discarded, so `"1.234,56"` and `"123456"` both mean 123456 centavos.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTransactionPayload {
    /// Envelope the amount is allocated against.
    pub envelope_id: Uuid,
    /// Free-form description.
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Amount as entered by the user.
    pub amount: String,
    /// Transaction kind: income or expense.
    pub kind: String,
    /// Settlement status: pending or cleared. Defaults to pending.
    pub status: Option<String>,
    /// Date the transaction occurred. Defaults to today.
    pub occurred_on: Option<NaiveDate>,
}

fn transaction_json(transaction: &transactions::Model) -> serde_json::Value {
    let amount = Money::from_centavos(transaction.amount_centavos);
    json!({
        "id": transaction.id,
        "user_id": transaction.user_id,
        "envelope_id": transaction.envelope_id,
        "description": &transaction.description,
        "amount_centavos": transaction.amount_centavos,
        "amount_formatted": amount.format_brl(),
        "kind": &transaction.kind,
        "status": &transaction.status,
        "occurred_on": transaction.occurred_on,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List transactions across the caller's accessible
/// owners, newest first, paginated.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list(&scope, &page).await {
        Ok(result) => {
            let items: Vec<serde_json::Value> = result.items.iter().map(transaction_json).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "transactions": items,
                    "page": result.page,
                    "per_page": result.per_page,
                    "total": result.total,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            error_response(&AppError::from(e))
        }
    }
}

/// POST `/transactions` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionPayload>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e.to_string());
    }

    let Ok(kind) = payload.kind.parse::<TransactionKind>() else {
        return validation_error("Transaction kind must be one of: income, expense");
    };

    let status = match payload.status.as_deref() {
        None => TransactionStatus::Pending,
        Some(s) => match s.parse::<TransactionStatus>() {
            Ok(status) => status,
            Err(_) => {
                return validation_error("Transaction status must be one of: pending, cleared");
            }
        },
    };

    let shares = ShareRepository::new((*state.db).clone());
    let scope = match shares.resolve_scope(auth.user_id()).await {
        Ok(scope) => scope,
        Err(e) => {
            error!(error = %e, "Failed to resolve access scope");
            return internal_error();
        }
    };

    let amount = Money::parse(&payload.amount);
    let occurred_on = payload
        .occurred_on
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        envelope_id: payload.envelope_id,
        description: payload.description,
        amount,
        kind,
        status,
        occurred_on,
    };

    match repo.create(&scope, input).await {
        Ok(transaction) => {
            info!(
                user_id = %auth.user_id(),
                transaction_id = %transaction.id,
                envelope_id = %transaction.envelope_id,
                "Transaction recorded"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            notify_transaction_recorded(&state, auth.user_id(), &transaction);

            (StatusCode::CREATED, Json(transaction_json(&transaction))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE `/transactions/{id}` - Delete a transaction within the caller's
/// scope.
async fn delete_transaction(
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

    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(&scope, id).await {
        Ok(()) => {
            info!(
                user_id = %auth.user_id(),
                transaction_id = %id,
                "Transaction deleted"
            );
            state
                .views
                .revalidate(&format!("/dashboard/{}", auth.user_id()));

            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            error_response(&AppError::from(e))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Sends the transaction-recorded email without blocking the response.
///
/// Delivery failures are logged and swallowed.
fn notify_transaction_recorded(
    state: &AppState,
    user_id: Uuid,
    transaction: &transactions::Model,
) {
    let db = state.db.clone();
    let email_service = state.email_service.clone();
    let description = transaction.description.clone();
    let amount = Money::from_centavos(transaction.amount_centavos);

    tokio::spawn(async move {
        let user_repo = UserRepository::new((*db).clone());
        let user = match user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Failed to load user for notification");
                return;
            }
        };

        if let Err(e) = email_service
            .send_transaction_recorded(&user.email, &user.full_name, &description, amount)
            .await
        {
            warn!(error = %e, "Failed to send transaction email");
        }
    });
}
