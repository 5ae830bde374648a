//! Recurring-payment repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use bolso_core::access::AccessScope;
use bolso_core::ledger::{self, validate_amount, validate_description};
use bolso_shared::types::Money;

use crate::entities::recurring_payments;
use crate::repositories::envelope::EnvelopeRepository;

/// Error types for recurring-payment operations.
#[derive(Debug, thiserror::Error)]
pub enum RecurringError {
    /// Recurring payment not found within the caller's scope.
    #[error("Recurring payment not found: {0}")]
    NotFound(Uuid),

    /// The referenced envelope is neither global nor owned within the
    /// caller's scope.
    #[error("Envelope not accessible: {0}")]
    EnvelopeNotAccessible(Uuid),

    /// Scheduled day outside 1-31.
    #[error("Day of month must be between 1 and 31, got {0}")]
    InvalidDayOfMonth(i16),

    /// Field validation failed.
    #[error(transparent)]
    Invalid(#[from] ledger::LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RecurringError> for bolso_shared::AppError {
    fn from(err: RecurringError) -> Self {
        match err {
            RecurringError::NotFound(id) => {
                Self::NotFound(format!("Recurring payment not found: {id}"))
            }
            RecurringError::EnvelopeNotAccessible(id) => {
                Self::NotFound(format!("Envelope not found: {id}"))
            }
            RecurringError::InvalidDayOfMonth(day) => {
                Self::Validation(format!("Day of month must be between 1 and 31, got {day}"))
            }
            RecurringError::Invalid(e) => Self::Validation(e.to_string()),
            RecurringError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a recurring payment.
#[derive(Debug, Clone)]
pub struct CreateRecurringPaymentInput {
    /// Envelope the payment draws from.
    pub envelope_id: Uuid,
    /// Free-form description.
    pub description: String,
    /// Amount in centavos, always positive.
    pub amount: Money,
    /// Scheduled day (1-31), clamped to month end when due.
    pub day_of_month: i16,
}

/// Recurring-payment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RecurringPaymentRepository {
    db: DatabaseConnection,
}

impl RecurringPaymentRepository {
    /// Creates a new recurring-payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a recurring payment for the scope's caller.
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
        input: CreateRecurringPaymentInput,
    ) -> Result<recurring_payments::Model, RecurringError> {
        validate_description(&input.description)?;
        validate_amount(input.amount)?;
        if !(1..=31).contains(&input.day_of_month) {
            return Err(RecurringError::InvalidDayOfMonth(input.day_of_month));
        }

        let envelope_repo = EnvelopeRepository::new(self.db.clone());
        if envelope_repo
            .find_referencable(scope, input.envelope_id)
            .await?
            .is_none()
        {
            return Err(RecurringError::EnvelopeNotAccessible(input.envelope_id));
        }

        let now = chrono::Utc::now().into();
        let payment = recurring_payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.caller()),
            envelope_id: Set(input.envelope_id),
            description: Set(input.description),
            amount_centavos: Set(input.amount.centavos()),
            day_of_month: Set(input.day_of_month),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = payment.insert(&self.db).await?;
        Ok(model)
    }

    /// Lists active recurring payments across the caller's accessible
    /// owners, ordered by scheduled day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<recurring_payments::Model>, RecurringError> {
        let items = recurring_payments::Entity::find()
            .filter(
                recurring_payments::Column::UserId.is_in(scope.owner_ids().iter().copied()),
            )
            .filter(recurring_payments::Column::IsActive.eq(true))
            .order_by_asc(recurring_payments::Column::DayOfMonth)
            .all(&self.db)
            .await?;

        Ok(items)
    }

    /// Deactivates a recurring payment within the caller's scope.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No active payment with `id` is owned within the caller's scope
    /// - The database operation fails
    pub async fn deactivate(&self, scope: &AccessScope, id: Uuid) -> Result<(), RecurringError> {
        let payment = recurring_payments::Entity::find_by_id(id)
            .filter(
                recurring_payments::Column::UserId.is_in(scope.owner_ids().iter().copied()),
            )
            .filter(recurring_payments::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(RecurringError::NotFound(id))?;

        let mut active: recurring_payments::ActiveModel = payment.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}
