//! Transaction repository for ledger database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use bolso_core::access::AccessScope;
use bolso_core::ledger::{
    self, TransactionKind as CoreTransactionKind, TransactionStatus as CoreTransactionStatus,
    validate_amount, validate_description,
};
use bolso_shared::types::{Money, PageRequest, PageResponse};

use crate::entities::{
    sea_orm_active_enums::{TransactionKind, TransactionStatus},
    transactions,
};
use crate::repositories::envelope::EnvelopeRepository;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found within the caller's accessible-owner scope.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// The referenced envelope is neither global nor owned within the
    /// caller's scope.
    #[error("Envelope not accessible: {0}")]
    EnvelopeNotAccessible(Uuid),

    /// Field validation failed.
    #[error(transparent)]
    Invalid(#[from] ledger::LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for bolso_shared::AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(id) => {
                Self::NotFound(format!("Transaction not found: {id}"))
            }
            // Deliberately indistinguishable from an absent envelope
            TransactionError::EnvelopeNotAccessible(id) => {
                Self::NotFound(format!("Envelope not found: {id}"))
            }
            TransactionError::Invalid(e) => Self::Validation(e.to_string()),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Envelope the amount is allocated against.
    pub envelope_id: Uuid,
    /// Free-form description.
    pub description: String,
    /// Amount in centavos, always positive.
    pub amount: Money,
    /// Direction.
    pub kind: CoreTransactionKind,
    /// Settlement status.
    pub status: CoreTransactionStatus,
    /// Date the transaction occurred.
    pub occurred_on: NaiveDate,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a transaction for the scope's caller.
    ///
    /// The referenced envelope must be global or owned within the caller's
    /// accessible-owner scope, checked at write time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field fails validation
    /// - The envelope is outside the caller's scope
    /// - The database operation fails
    pub async fn create(
        &self,
        scope: &AccessScope,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        validate_description(&input.description)?;
        validate_amount(input.amount)?;

        let envelope_repo = EnvelopeRepository::new(self.db.clone());
        if envelope_repo
            .find_referencable(scope, input.envelope_id)
            .await?
            .is_none()
        {
            return Err(TransactionError::EnvelopeNotAccessible(input.envelope_id));
        }

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.caller()),
            envelope_id: Set(input.envelope_id),
            description: Set(input.description),
            amount_centavos: Set(input.amount.centavos()),
            kind: Set(TransactionKind::from(input.kind)),
            status: Set(TransactionStatus::from(input.status)),
            occurred_on: Set(input.occurred_on),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = transaction.insert(&self.db).await?;
        Ok(model)
    }

    /// Lists transactions across the caller's accessible owners, newest
    /// first, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: &AccessScope,
        page: &PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let filter =
            transactions::Column::UserId.is_in(scope.owner_ids().iter().copied());

        let total = transactions::Entity::find()
            .filter(filter.clone())
            .count(&self.db)
            .await?;

        let items = transactions::Entity::find()
            .filter(filter)
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page, total))
    }

    /// Deletes a transaction within the caller's scope.
    ///
    /// The scope filter applies uniformly on every delete path; zero rows
    /// affected surfaces as not-found.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No transaction with `id` is owned within the caller's scope
    /// - The database operation fails
    pub async fn delete(&self, scope: &AccessScope, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.is_in(scope.owner_ids().iter().copied()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }

        Ok(())
    }

    /// Lists a user's own transactions within one calendar month.
    ///
    /// Feeds the dashboard read model, which is per-user and does not
    /// expand through shared access.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_month(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let Some(start) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Ok(vec![]);
        };
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .unwrap_or(start);

        let items = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::OccurredOn.gte(start))
            .filter(transactions::Column::OccurredOn.lt(end))
            .order_by_desc(transactions::Column::OccurredOn)
            .all(&self.db)
            .await?;

        Ok(items)
    }
}
