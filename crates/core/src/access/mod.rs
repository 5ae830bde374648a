//! Accessible-owner scoping for shared accounts.
//!
//! Every owner-scoped mutation and query in Bolso is filtered through an
//! [`AccessScope`]: the set of account owners whose records the caller may
//! read or write. The scope is the caller plus every owner who explicitly
//! shared their account with the caller; sharing never propagates further.
//!
//! Scopes are resolved fresh on every request (no caching layer): access
//! grants must be immediately consistent, so a revoked share takes effect
//! on the very next request.

use uuid::Uuid;

/// The set of account owners a caller may act on behalf of.
///
/// Always non-empty: the caller is the first element. The remaining owners
/// keep the order in which the grants were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    owners: Vec<Uuid>,
}

impl AccessScope {
    /// Builds a scope from the caller and the owners who granted them
    /// access.
    ///
    /// The caller always comes first; duplicate grants (including a grant
    /// naming the caller) are dropped.
    #[must_use]
    pub fn new(caller: Uuid, granted_by: impl IntoIterator<Item = Uuid>) -> Self {
        let mut owners = vec![caller];
        for owner in granted_by {
            if !owners.contains(&owner) {
                owners.push(owner);
            }
        }
        Self { owners }
    }

    /// A scope containing only the caller.
    #[must_use]
    pub fn solo(caller: Uuid) -> Self {
        Self {
            owners: vec![caller],
        }
    }

    /// The calling identity.
    #[must_use]
    pub fn caller(&self) -> Uuid {
        self.owners[0]
    }

    /// All accessible owner ids, caller first.
    #[must_use]
    pub fn owner_ids(&self) -> &[Uuid] {
        &self.owners
    }

    /// Whether `owner` is within this scope.
    #[must_use]
    pub fn contains(&self, owner: Uuid) -> bool {
        self.owners.contains(&owner)
    }

    /// Whether an optional owner column is within this scope.
    ///
    /// `None` models a global record, accessible to everyone.
    #[must_use]
    pub fn permits(&self, owner: Option<Uuid>) -> bool {
        owner.is_none_or(|id| self.contains(id))
    }

    /// Number of accessible owners (at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Always false: a scope contains at least the caller.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_contains_caller_first() {
        let caller = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let scope = AccessScope::new(caller, [owner]);

        assert_eq!(scope.caller(), caller);
        assert_eq!(scope.owner_ids(), &[caller, owner]);
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn test_solo_scope() {
        let caller = Uuid::new_v4();
        let scope = AccessScope::solo(caller);

        assert_eq!(scope.owner_ids(), &[caller]);
        assert!(scope.contains(caller));
        assert!(!scope.is_empty());
    }

    #[test]
    fn test_grant_order_preserved() {
        let caller = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let scope = AccessScope::new(caller, [a, b]);

        assert_eq!(scope.owner_ids(), &[caller, a, b]);
    }

    #[test]
    fn test_duplicate_grants_dropped() {
        let caller = Uuid::new_v4();
        let a = Uuid::new_v4();
        let scope = AccessScope::new(caller, [a, a, caller]);

        assert_eq!(scope.owner_ids(), &[caller, a]);
    }

    #[test]
    fn test_contains_rejects_strangers() {
        let scope = AccessScope::solo(Uuid::new_v4());
        assert!(!scope.contains(Uuid::new_v4()));
    }

    #[test]
    fn test_permits_global_records() {
        let scope = AccessScope::solo(Uuid::new_v4());
        assert!(scope.permits(None));
        assert!(scope.permits(Some(scope.caller())));
        assert!(!scope.permits(Some(Uuid::new_v4())));
    }
}
