//! Account-share repository: the access resolver.
//!
//! Resolves, per request, the set of account owners a caller may act on:
//! the caller plus every owner with an `account_shares` row naming the
//! caller as member. There is deliberately no caching layer here; a
//! revoked grant must take effect on the very next request.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use bolso_core::access::AccessScope;

use crate::entities::account_shares;

/// Repository over the `account_shares` table.
///
/// The share rows themselves are written by the account-sharing feature;
/// this core only reads them. `grant`/`revoke` exist for the seeder and
/// for tests.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    db: DatabaseConnection,
}

impl ShareRepository {
    /// Creates a new share repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the accessible-owner scope for a caller.
    ///
    /// The caller is always first; granting owners follow in grant
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn resolve_scope(&self, caller: Uuid) -> Result<AccessScope, DbErr> {
        let owners: Vec<Uuid> = account_shares::Entity::find()
            .filter(account_shares::Column::MemberId.eq(caller))
            .order_by_asc(account_shares::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|share| share.owner_id)
            .collect();

        Ok(AccessScope::new(caller, owners))
    }

    /// Grants `member` access to `owner`'s records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails (including a
    /// duplicate grant).
    pub async fn grant(&self, owner: Uuid, member: Uuid) -> Result<account_shares::Model, DbErr> {
        let share = account_shares::ActiveModel {
            owner_id: Set(owner),
            member_id: Set(member),
            created_at: Set(chrono::Utc::now().into()),
        };

        share.insert(&self.db).await
    }

    /// Revokes `member`'s access to `owner`'s records.
    ///
    /// Returns whether a grant was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn revoke(&self, owner: Uuid, member: Uuid) -> Result<bool, DbErr> {
        let result = account_shares::Entity::delete_many()
            .filter(account_shares::Column::OwnerId.eq(owner))
            .filter(account_shares::Column::MemberId.eq(member))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists the members an owner has shared their account with.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_members(&self, owner: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let members = account_shares::Entity::find()
            .filter(account_shares::Column::OwnerId.eq(owner))
            .order_by_asc(account_shares::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|share| share.member_id)
            .collect();

        Ok(members)
    }
}
