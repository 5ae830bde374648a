//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every owner-scoped mutation takes an
//! [`bolso_core::access::AccessScope`] resolved by [`ShareRepository`].

pub mod envelope;
pub mod recurring;
pub mod share;
pub mod transaction;
pub mod user;

pub use envelope::{
    CreateEnvelopeInput, EnvelopeError, EnvelopeRepository, UpdateEnvelopeInput,
};
pub use recurring::{CreateRecurringPaymentInput, RecurringError, RecurringPaymentRepository};
pub use share::ShareRepository;
pub use transaction::{CreateTransactionInput, TransactionError, TransactionRepository};
pub use user::UserRepository;
