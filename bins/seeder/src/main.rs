//! Database seeder for local development.
//!
//! Inserts one login user, a handful of customers with invoices, and a year
//! of monthly revenue. Rows that already exist are left alone, so the seeder
//! can be re-run against a populated database.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use invoicer_core::auth::hash_password;
use invoicer_db::{
    UserRepository,
    entities::{customers, invoices, revenue},
};

const USER_NAME: &str = "User";
const USER_EMAIL: &str = "user@nextmail.com";
const USER_PASSWORD: &str = "123456";

/// (id, name, email, image)
const CUSTOMERS: [(&str, &str, &str, &str); 6] = [
    (
        "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        "76d65c26-f784-44a2-ac19-586678f7c2f2",
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

/// (customer index, amount in cents, status, date)
const INVOICES: [(usize, i32, &str, &str); 13] = [
    (0, 15_795, "pending", "2022-12-06"),
    (1, 20_348, "pending", "2022-11-14"),
    (4, 3_040, "paid", "2022-10-29"),
    (3, 44_800, "paid", "2023-09-10"),
    (5, 34_577, "pending", "2023-08-05"),
    (2, 54_246, "pending", "2023-07-16"),
    (0, 666, "pending", "2023-06-27"),
    (3, 32_545, "paid", "2023-06-09"),
    (4, 1_250, "paid", "2023-06-17"),
    (5, 8_546, "pending", "2023-06-07"),
    (1, 500, "paid", "2023-08-19"),
    (5, 8_945, "paid", "2023-06-03"),
    (2, 1_000, "paid", "2022-06-05"),
];

/// Revenue in whole dollars per month.
const REVENUE: [(&str, i32); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,invoicer=info".into()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    info!("Connecting to database");
    let db = invoicer_db::connect(&database_url, 5, 1)
        .await
        .context("Failed to connect to database")?;

    seed_user(&db).await?;
    let customer_ids = seed_customers(&db).await?;
    seed_invoices(&db, &customer_ids).await?;
    seed_revenue(&db).await?;

    info!("Seeding complete");
    Ok(())
}

async fn seed_user(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = UserRepository::new(db.clone());
    if repo.get_user(USER_EMAIL).await?.is_some() {
        info!(email = USER_EMAIL, "User already exists, skipping");
        return Ok(());
    }

    let hash = hash_password(USER_PASSWORD).context("Failed to hash seed password")?;
    repo.create(USER_NAME, USER_EMAIL, &hash).await?;
    info!(email = USER_EMAIL, "Seeded user");
    Ok(())
}

async fn seed_customers(db: &DatabaseConnection) -> anyhow::Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(CUSTOMERS.len());

    for (id, name, email, image_url) in CUSTOMERS {
        let id = Uuid::parse_str(id)?;
        ids.push(id);

        if customers::Entity::find_by_id(id).one(db).await?.is_some() {
            continue;
        }

        customers::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            image_url: Set(image_url.to_string()),
        }
        .insert(db)
        .await?;
    }

    info!(count = ids.len(), "Seeded customers");
    Ok(ids)
}

async fn seed_invoices(db: &DatabaseConnection, customer_ids: &[Uuid]) -> anyhow::Result<()> {
    // Invoices have no natural key; only seed an empty table.
    if invoices::Entity::find().one(db).await?.is_some() {
        info!("Invoices already present, skipping");
        return Ok(());
    }

    for (customer, amount, status, date) in INVOICES {
        let customer_id = customer_ids
            .get(customer)
            .copied()
            .context("Invoice refers to an unknown customer")?;

        invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            amount: Set(amount),
            status: Set(status.to_string()),
            date: Set(NaiveDate::parse_from_str(date, "%Y-%m-%d")?),
        }
        .insert(db)
        .await?;
    }

    info!(count = INVOICES.len(), "Seeded invoices");
    Ok(())
}

async fn seed_revenue(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (month, amount) in REVENUE {
        if revenue::Entity::find_by_id(month.to_string())
            .one(db)
            .await?
            .is_some()
        {
            continue;
        }

        revenue::ActiveModel {
            month: Set(month.to_string()),
            revenue: Set(amount),
        }
        .insert(db)
        .await?;
    }

    info!(count = REVENUE.len(), "Seeded revenue");
    Ok(())
}
