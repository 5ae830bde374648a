//! `SeaORM` entity definitions.

pub mod account_shares;
pub mod envelopes;
pub mod recurring_payments;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
