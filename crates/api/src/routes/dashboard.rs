//! Dashboard read model: monthly summary and envelope allocation.
//!
//! Responses are cached in the [`crate::ViewCache`] keyed by view path;
//! every envelope and transaction mutation revalidates the caller's path.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Datelike;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::error::{internal_error, validation_error};
use crate::{AppState, middleware::AuthUser};
use bolso_core::envelope::{Envelope, allocate};
use bolso_core::ledger::{spend_by_envelope, summarize};
use bolso_db::{EnvelopeRepository, TransactionRepository};
use bolso_shared::types::Money;

/// Creates the dashboard routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Query parameters selecting the dashboard month.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Calendar year. Defaults to the current year.
    pub year: Option<i32>,
    /// Calendar month (1-12). Defaults to the current month.
    pub month: Option<u32>,
}

/// GET `/dashboard` - Monthly summary with per-envelope allocation.
///
/// The view is per-user (it does not expand through shared access) and is
/// served from the view cache when fresh.
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    if !(1..=12).contains(&month) {
        return validation_error("Month must be between 1 and 12");
    }

    let path = format!("/dashboard/{}/{year}-{month:02}", auth.user_id());
    if let Some(cached) = state.views.get(&path) {
        return (StatusCode::OK, Json((*cached).clone())).into_response();
    }

    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let envelope_repo = EnvelopeRepository::new((*state.db).clone());

    let transactions = match transaction_repo
        .list_for_month(auth.user_id(), year, month)
        .await
    {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "Failed to load transactions for dashboard");
            return internal_error();
        }
    };

    let envelopes = match envelope_repo.list_for_user(auth.user_id()).await {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "Failed to load envelopes for dashboard");
            return internal_error();
        }
    };

    let summary = summarize(transactions.iter().map(|t| {
        (
            t.kind.clone().into(),
            Money::from_centavos(t.amount_centavos),
        )
    }));

    let spent = spend_by_envelope(transactions.iter().map(|t| {
        (
            t.envelope_id,
            t.kind.clone().into(),
            Money::from_centavos(t.amount_centavos),
        )
    }));

    let domain_envelopes: Vec<Envelope> = envelopes
        .iter()
        .map(|e| Envelope {
            id: e.id,
            user_id: e.user_id,
            name: e.name.clone(),
            value: e.value,
            kind: e.kind.clone().into(),
            is_global: e.is_global,
            is_deletable: e.is_deletable,
        })
        .collect();

    let allocations: Vec<serde_json::Value> = allocate(summary.income, &domain_envelopes)
        .into_iter()
        .map(|allocation| {
            let spent_here = spent
                .get(&allocation.envelope_id)
                .copied()
                .unwrap_or(Money::ZERO);
            let remaining = allocation
                .planned
                .checked_sub(spent_here)
                .unwrap_or(Money::ZERO);

            json!({
                "envelope_id": allocation.envelope_id,
                "name": allocation.name,
                "kind": allocation.kind,
                "planned_centavos": allocation.planned.centavos(),
                "planned_formatted": allocation.planned.format_brl(),
                "spent_centavos": spent_here.centavos(),
                "spent_formatted": spent_here.format_brl(),
                "remaining_centavos": remaining.centavos(),
                "remaining_formatted": remaining.format_brl(),
            })
        })
        .collect();

    let view = json!({
        "year": year,
        "month": month,
        "income_centavos": summary.income.centavos(),
        "income_formatted": summary.income.format_brl(),
        "expenses_centavos": summary.expenses.centavos(),
        "expenses_formatted": summary.expenses.format_brl(),
        "balance_centavos": summary.balance.centavos(),
        "balance_formatted": summary.balance.format_brl(),
        "envelopes": allocations,
    });

    state.views.insert(path, view.clone());

    (StatusCode::OK, Json(view)).into_response()
}
