//! Envelope repository for envelope database operations.
//!
//! Mutations are scoped through the caller's [`AccessScope`]; listing is
//! deliberately narrower (globals plus the caller's own envelopes only) —
//! shared members can edit an owner's envelopes but do not see them in
//! their own listing.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use bolso_core::access::AccessScope;
use bolso_core::envelope::{
    self, DEFAULT_ENVELOPE_NAME, EnvelopeKind as CoreEnvelopeKind, validate_name, validate_value,
};

use crate::entities::{envelopes, sea_orm_active_enums::EnvelopeKind};

/// Error types for envelope operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Envelope not found within the caller's accessible-owner scope.
    ///
    /// Covers both a truly absent row and a row owned outside the scope;
    /// the two are indistinguishable on purpose.
    #[error("Envelope not found: {0}")]
    NotFound(Uuid),

    /// An envelope with this name already exists for the owner.
    #[error("Envelope name already exists: {0}")]
    DuplicateName(String),

    /// The envelope is permanent and can never be removed.
    #[error("Envelope is not deletable: {0}")]
    NotDeletable(Uuid),

    /// Field validation failed.
    #[error(transparent)]
    Invalid(#[from] envelope::EnvelopeError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an envelope.
#[derive(Debug, Clone)]
pub struct CreateEnvelopeInput {
    /// Envelope name, unique among the owner's envelopes.
    pub name: String,
    /// Percentage (0-100) or centavos, per `kind`.
    pub value: i64,
    /// Interpretation of `value`.
    pub kind: CoreEnvelopeKind,
}

/// Input for updating an envelope.
#[derive(Debug, Clone)]
pub struct UpdateEnvelopeInput {
    /// New name.
    pub name: String,
    /// New value.
    pub value: i64,
    /// New kind.
    pub kind: CoreEnvelopeKind,
}

/// Envelope repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EnvelopeRepository {
    db: DatabaseConnection,
}

impl EnvelopeRepository {
    /// Creates a new envelope repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a personal envelope for the caller.
    ///
    /// The duplicate pre-check consults only the caller's own envelopes
    /// (not globals); the partial unique index on `(user_id, name)` closes
    /// the remaining check-then-act race, and a violation from a
    /// concurrent racer surfaces as the same `DuplicateName`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field fails validation
    /// - The caller already owns an envelope with this name
    /// - The database operation fails
    pub async fn create(
        &self,
        caller: Uuid,
        input: CreateEnvelopeInput,
    ) -> Result<envelopes::Model, EnvelopeError> {
        validate_name(&input.name)?;
        validate_value(input.kind, input.value)?;

        let existing = envelopes::Entity::find()
            .filter(envelopes::Column::UserId.eq(caller))
            .filter(envelopes::Column::Name.eq(&input.name))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(EnvelopeError::DuplicateName(input.name));
        }

        let now = chrono::Utc::now().into();
        let envelope = envelopes::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(Some(caller)),
            name: Set(input.name.clone()),
            value: Set(input.value),
            kind: Set(EnvelopeKind::from(input.kind)),
            is_global: Set(false),
            is_deletable: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        envelope.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                EnvelopeError::DuplicateName(input.name)
            } else {
                EnvelopeError::Database(e)
            }
        })
    }

    /// Lists envelopes visible to the caller: globals plus the caller's
    /// own, ordered by name ascending.
    ///
    /// Unlike mutations, listing does NOT expand through shared-account
    /// access.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, caller: Uuid) -> Result<Vec<envelopes::Model>, EnvelopeError> {
        let list = envelopes::Entity::find()
            .filter(
                envelopes::Column::IsGlobal
                    .eq(true)
                    .or(envelopes::Column::UserId.eq(caller)),
            )
            .order_by_asc(envelopes::Column::Name)
            .all(&self.db)
            .await?;

        Ok(list)
    }

    /// Finds an envelope the scope may mutate.
    ///
    /// Global envelopes have no owner and are never mutable through this
    /// path.
    async fn find_in_scope(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<envelopes::Model, EnvelopeError> {
        envelopes::Entity::find_by_id(id)
            .filter(envelopes::Column::UserId.is_in(scope.owner_ids().iter().copied()))
            .one(&self.db)
            .await?
            .ok_or(EnvelopeError::NotFound(id))
    }

    /// Updates an envelope within the caller's scope.
    ///
    /// Name uniqueness is not pre-checked on update (unlike create); a
    /// collision is still rejected by the unique index and surfaced as
    /// `DuplicateName`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field fails validation
    /// - No envelope with `id` is owned within the caller's scope
    /// - The new name collides with another envelope of the same owner
    /// - The database operation fails
    pub async fn update(
        &self,
        scope: &AccessScope,
        id: Uuid,
        input: UpdateEnvelopeInput,
    ) -> Result<envelopes::Model, EnvelopeError> {
        validate_name(&input.name)?;
        validate_value(input.kind, input.value)?;

        let envelope = self.find_in_scope(scope, id).await?;

        let mut active: envelopes::ActiveModel = envelope.into();
        active.name = Set(input.name.clone());
        active.value = Set(input.value);
        active.kind = Set(EnvelopeKind::from(input.kind));
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                EnvelopeError::DuplicateName(input.name)
            } else {
                EnvelopeError::Database(e)
            }
        })
    }

    /// Deletes an envelope within the caller's scope.
    ///
    /// Non-deletable envelopes are refused regardless of caller; the
    /// distinction between "outside scope" and "absent" is never exposed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No envelope with `id` is owned within the caller's scope
    /// - The envelope is marked non-deletable
    /// - The database operation fails
    pub async fn delete(&self, scope: &AccessScope, id: Uuid) -> Result<(), EnvelopeError> {
        let envelope = self.find_in_scope(scope, id).await?;

        if !envelope.is_deletable {
            return Err(EnvelopeError::NotDeletable(id));
        }

        let result = envelopes::Entity::delete_many()
            .filter(envelopes::Column::Id.eq(id))
            .filter(envelopes::Column::UserId.is_in(scope.owner_ids().iter().copied()))
            .filter(envelopes::Column::IsDeletable.eq(true))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(EnvelopeError::NotFound(id));
        }

        Ok(())
    }

    /// Finds an envelope a transaction may reference: global, or owned
    /// within the scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_referencable(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<envelopes::Model>, DbErr> {
        envelopes::Entity::find_by_id(id)
            .filter(
                envelopes::Column::IsGlobal
                    .eq(true)
                    .or(envelopes::Column::UserId.is_in(scope.owner_ids().iter().copied())),
            )
            .one(&self.db)
            .await
    }

    /// Gets or creates the default global envelope ("Remuneração").
    ///
    /// Idempotent upsert guarded by the unique index on
    /// `(name) WHERE is_global`: concurrent first-use races leave exactly
    /// one row, and the loser re-reads the winner's.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn ensure_default(&self) -> Result<envelopes::Model, EnvelopeError> {
        if let Some(existing) = self.find_global_by_name(DEFAULT_ENVELOPE_NAME).await? {
            return Ok(existing);
        }

        let now = chrono::Utc::now().into();
        let envelope = envelopes::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(None),
            name: Set(DEFAULT_ENVELOPE_NAME.to_string()),
            value: Set(100),
            kind: Set(EnvelopeKind::Percentage),
            is_global: Set(true),
            is_deletable: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match envelope.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(envelope_id = %model.id, "Default envelope created");
                Ok(model)
            }
            // A concurrent first-use won the insert; read its row.
            Err(e) if is_unique_violation(&e) => self
                .find_global_by_name(DEFAULT_ENVELOPE_NAME)
                .await?
                .ok_or(EnvelopeError::Database(e)),
            Err(e) => Err(EnvelopeError::Database(e)),
        }
    }

    async fn find_global_by_name(
        &self,
        name: &str,
    ) -> Result<Option<envelopes::Model>, DbErr> {
        envelopes::Entity::find()
            .filter(envelopes::Column::IsGlobal.eq(true))
            .filter(envelopes::Column::Name.eq(name))
            .one(&self.db)
            .await
    }
}

impl From<EnvelopeError> for bolso_shared::AppError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::NotFound(id) => Self::NotFound(format!("Envelope not found: {id}")),
            EnvelopeError::DuplicateName(name) => {
                Self::Conflict(format!("An envelope named '{name}' already exists"))
            }
            EnvelopeError::NotDeletable(_) => {
                Self::Conflict("This envelope is permanent and cannot be deleted".to_string())
            }
            EnvelopeError::Invalid(e) => Self::Validation(e.to_string()),
            EnvelopeError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Whether a database error is a unique-constraint violation.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolso_shared::AppError;

    #[test]
    fn test_error_conversion_statuses() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::from(EnvelopeError::NotFound(id)).status_code(),
            404
        );
        assert_eq!(
            AppError::from(EnvelopeError::DuplicateName("Viagem".into())).status_code(),
            409
        );
        assert_eq!(
            AppError::from(EnvelopeError::NotDeletable(id)).status_code(),
            409
        );
        assert_eq!(
            AppError::from(EnvelopeError::Invalid(
                bolso_core::envelope::EnvelopeError::EmptyName
            ))
            .status_code(),
            400
        );
    }

    #[test]
    fn test_custom_db_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    }
}
