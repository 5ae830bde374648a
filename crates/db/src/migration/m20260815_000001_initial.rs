//! Initial database migration.
//!
//! Creates all tables, enums, and indexes: users, account shares,
//! envelopes, transactions, and recurring payments.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNT_SHARES_SQL).await?;
        db.execute_unprepared(ENVELOPES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(RECURRING_PAYMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Envelope value interpretation
CREATE TYPE envelope_kind AS ENUM (
    'percentage',
    'monetary'
);

-- Transaction direction
CREATE TYPE transaction_kind AS ENUM (
    'income',
    'expense'
);

-- Transaction settlement status
CREATE TYPE transaction_status AS ENUM (
    'pending',
    'cleared'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACCOUNT_SHARES_SQL: &str = r"
-- A row grants member_id access to owner_id's financial records.
-- Sharing is explicit and never transitive.
CREATE TABLE account_shares (
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    member_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (owner_id, member_id),
    CONSTRAINT chk_no_self_share CHECK (owner_id <> member_id)
);

-- Scope resolution: all owners who shared with a given member
CREATE INDEX idx_account_shares_member ON account_shares(member_id, created_at);
";

const ENVELOPES_SQL: &str = r"
CREATE TABLE envelopes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    value BIGINT NOT NULL,
    kind envelope_kind NOT NULL,
    is_global BOOLEAN NOT NULL DEFAULT FALSE,
    is_deletable BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_envelope_ownership CHECK (
        (is_global AND user_id IS NULL) OR (NOT is_global AND user_id IS NOT NULL)
    ),
    CONSTRAINT chk_percentage_range CHECK (
        kind <> 'percentage' OR (value >= 0 AND value <= 100)
    ),
    CONSTRAINT chk_monetary_non_negative CHECK (
        kind <> 'monetary' OR value >= 0
    )
);

-- Closes the check-then-act duplicate-name race for personal envelopes
CREATE UNIQUE INDEX uq_envelopes_owner_name ON envelopes(user_id, name) WHERE NOT is_global;

-- Guards the idempotent bootstrap of global envelopes
CREATE UNIQUE INDEX uq_envelopes_global_name ON envelopes(name) WHERE is_global;

-- Listing: globals plus own, ordered by name
CREATE INDEX idx_envelopes_owner_name ON envelopes(user_id, name);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    envelope_id UUID NOT NULL REFERENCES envelopes(id),
    description VARCHAR(255) NOT NULL,
    amount_centavos BIGINT NOT NULL,
    kind transaction_kind NOT NULL,
    status transaction_status NOT NULL DEFAULT 'pending',
    occurred_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_amount_positive CHECK (amount_centavos > 0)
);

-- Statement listing, newest first
CREATE INDEX idx_transactions_user_date ON transactions(user_id, occurred_on DESC, created_at DESC);

-- Per-envelope spend aggregation
CREATE INDEX idx_transactions_envelope ON transactions(envelope_id);
";

const RECURRING_PAYMENTS_SQL: &str = r"
CREATE TABLE recurring_payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    envelope_id UUID NOT NULL REFERENCES envelopes(id),
    description VARCHAR(255) NOT NULL,
    amount_centavos BIGINT NOT NULL,
    day_of_month SMALLINT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_recurring_amount_positive CHECK (amount_centavos > 0),
    CONSTRAINT chk_day_of_month CHECK (day_of_month BETWEEN 1 AND 31)
);

CREATE INDEX idx_recurring_payments_user ON recurring_payments(user_id) WHERE is_active;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS recurring_payments CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS envelopes CASCADE;
DROP TABLE IF EXISTS account_shares CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS transaction_status;
DROP TYPE IF EXISTS transaction_kind;
DROP TYPE IF EXISTS envelope_kind;
";
