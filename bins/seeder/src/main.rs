//! Database seeder for Bolso development and testing.
//!
//! Seeds two test users (one sharing their account with the other), the
//! default global envelope, a few personal envelopes, and sample
//! transactions for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use bolso_core::access::AccessScope;
use bolso_core::auth::hash_password;
use bolso_core::envelope::EnvelopeKind;
use bolso_core::ledger::{TransactionKind, TransactionStatus};
use bolso_db::entities::users;
use bolso_db::repositories::envelope::CreateEnvelopeInput;
use bolso_db::repositories::transaction::CreateTransactionInput;
use bolso_db::{EnvelopeRepository, ShareRepository, TransactionRepository, UserRepository};
use bolso_shared::types::{Money, PageRequest};

/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test member ID (consistent for all seeds)
const TEST_MEMBER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = bolso_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding default envelope...");
    seed_default_envelope(&db).await;

    println!("Seeding test users...");
    seed_test_users(&db).await;

    println!("Seeding account share...");
    seed_account_share(&db).await;

    println!("Seeding envelopes...");
    seed_envelopes(&db).await;

    println!("Seeding transactions...");
    seed_transactions(&db).await;

    println!("Seeding complete!");
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

fn test_member_id() -> Uuid {
    Uuid::parse_str(TEST_MEMBER_ID).unwrap()
}

/// Seeds the non-deletable global default envelope.
async fn seed_default_envelope(db: &DatabaseConnection) {
    let repo = EnvelopeRepository::new(db.clone());
    let envelope = repo
        .ensure_default()
        .await
        .expect("Failed to ensure default envelope");
    println!("  Default envelope: {} ({})", envelope.name, envelope.id);
}

/// Seeds two test users for development.
async fn seed_test_users(db: &DatabaseConnection) {
    for (id, email, name) in [
        (test_user_id(), "ana@bolso.dev", "Ana Souza"),
        (test_member_id(), "bruno@bolso.dev", "Bruno Lima"),
    ] {
        if users::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {email} already exists, skipping...");
            continue;
        }

        let password_hash = hash_password("senha-secreta").expect("Failed to hash password");

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: sea_orm::Set(id),
            email: sea_orm::Set(email.to_string()),
            password_hash: sea_orm::Set(password_hash),
            full_name: sea_orm::Set(name.to_string()),
            is_active: sea_orm::Set(true),
            created_at: sea_orm::Set(now),
            updated_at: sea_orm::Set(now),
        };

        users::Entity::insert(user)
            .exec(db)
            .await
            .expect("Failed to insert user");
        println!("  Created user {email}");
    }
}

/// Ana shares her account with Bruno.
async fn seed_account_share(db: &DatabaseConnection) {
    let repo = ShareRepository::new(db.clone());

    let scope = repo
        .resolve_scope(test_member_id())
        .await
        .expect("Failed to resolve scope");
    if scope.contains(test_user_id()) {
        println!("  Share already exists, skipping...");
        return;
    }

    repo.grant(test_user_id(), test_member_id())
        .await
        .expect("Failed to grant share");
    println!("  Ana shared her account with Bruno");
}

/// Seeds a few personal envelopes for Ana.
async fn seed_envelopes(db: &DatabaseConnection) {
    let repo = EnvelopeRepository::new(db.clone());

    let envelopes = [
        ("Moradia", 30, EnvelopeKind::Percentage),
        ("Mercado", 20, EnvelopeKind::Percentage),
        ("Viagem", 50_000, EnvelopeKind::Monetary),
    ];

    for (name, value, kind) in envelopes {
        let result = repo
            .create(
                test_user_id(),
                CreateEnvelopeInput {
                    name: name.to_string(),
                    value,
                    kind,
                },
            )
            .await;

        match result {
            Ok(envelope) => println!("  Created envelope {}", envelope.name),
            Err(bolso_db::repositories::envelope::EnvelopeError::DuplicateName(_)) => {
                println!("  Envelope {name} already exists, skipping...");
            }
            Err(e) => panic!("Failed to create envelope {name}: {e}"),
        }
    }
}

/// Seeds sample transactions for Ana against her envelopes.
async fn seed_transactions(db: &DatabaseConnection) {
    let envelope_repo = EnvelopeRepository::new(db.clone());
    let transaction_repo = TransactionRepository::new(db.clone());

    let envelopes = envelope_repo
        .list_for_user(test_user_id())
        .await
        .expect("Failed to list envelopes");

    let default = envelopes
        .iter()
        .find(|e| e.is_global)
        .expect("Default envelope missing");
    let mercado = envelopes
        .iter()
        .find(|e| e.name == "Mercado")
        .expect("Mercado envelope missing");

    let scope = AccessScope::solo(test_user_id());

    let existing = transaction_repo
        .list(&scope, &PageRequest::default())
        .await
        .expect("Failed to list transactions");
    if existing.total > 0 {
        println!("  Transactions already seeded, skipping...");
        return;
    }

    let samples = [
        (
            default.id,
            "Salário",
            500_000,
            TransactionKind::Income,
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        ),
        (
            mercado.id,
            "Feira da semana",
            23_450,
            TransactionKind::Expense,
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        ),
        (
            mercado.id,
            "Padaria",
            4_200,
            TransactionKind::Expense,
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
        ),
    ];

    for (envelope_id, description, centavos, kind, occurred_on) in samples {
        transaction_repo
            .create(
                &scope,
                CreateTransactionInput {
                    envelope_id,
                    description: description.to_string(),
                    amount: Money::from_centavos(centavos),
                    kind,
                    status: TransactionStatus::Cleared,
                    occurred_on,
                },
            )
            .await
            .expect("Failed to create transaction");
        println!("  Created transaction {description}");
    }
}
