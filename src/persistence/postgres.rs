use std::future::Future;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::domain::customer::{Address, Customer, CustomerId, CustomerRepository, PhoneNumber};
use crate::shared::{AggregateRoot, CancellationToken, DomainEvent, UnitOfWork, serialize_event};
use crate::utils::{retry_on_transient, IsTransient};

use super::change_tracker::ChangeTracker;

// ============================================================================
// PostgreSQL Store
// ============================================================================
//
// The customer row and one outbox row per pending event are written in the
// same transaction. Either all of them are persisted, or none are.
// Publishing from the outbox is left to a separate relay.
//
// ============================================================================

const CREATE_CUSTOMERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone_number VARCHAR(20) NOT NULL,
    country VARCHAR(100) NOT NULL,
    line1 VARCHAR(100) NOT NULL,
    line2 VARCHAR(100) NOT NULL,
    city VARCHAR(40) NOT NULL,
    state VARCHAR(40) NOT NULL,
    zip_code VARCHAR(10) NOT NULL,
    active BOOLEAN NOT NULL
)";

const CREATE_OUTBOX_TABLE: &str = "CREATE TABLE IF NOT EXISTS outbox_messages (
    id UUID PRIMARY KEY,
    aggregate_id UUID NOT NULL,
    aggregate_type VARCHAR(50) NOT NULL,
    event_id UUID NOT NULL,
    event_type VARCHAR(100) NOT NULL,
    payload JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)";

impl IsTransient for sqlx::Error {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
        )
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to PostgreSQL, retrying while the database is unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.url.as_deref().context("DATABASE_URL is not set")?;
        let masked_url = config.masked_url().unwrap_or_default();

        let pool = retry_on_transient(config.connect_retry(), |attempt| {
            tracing::info!(attempt, url = %masked_url, "Connecting to PostgreSQL");
            PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout())
                .connect(url)
        })
        .await
        .into_result()
        .context("failed to connect to PostgreSQL")?;

        Ok(Self { pool })
    }

    /// Create the tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CUSTOMERS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_OUTBOX_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Open a repository and unit of work for one command invocation
    pub fn begin(&self) -> (PgCustomerRepository, PgUnitOfWork) {
        let tracker = ChangeTracker::new();
        (
            PgCustomerRepository {
                pool: self.pool.clone(),
                tracker: tracker.clone(),
            },
            PgUnitOfWork {
                pool: self.pool.clone(),
                tracker,
            },
        )
    }
}

pub struct PgCustomerRepository {
    pool: PgPool,
    tracker: ChangeTracker,
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn add(&self, customer: Customer) -> Result<()> {
        self.tracker.stage(customer).await;
        Ok(())
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let row = sqlx::query(
            "SELECT id, name, last_name, email, phone_number, country, line1, line2,
                    city, state, zip_code, active
             FROM customers
             WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?;

        row.map(customer_from_row).transpose()
    }
}

fn customer_from_row(row: PgRow) -> Result<Customer> {
    let id: Uuid = row.try_get("id")?;

    let phone: String = row.try_get("phone_number")?;
    let phone_number = PhoneNumber::create(&phone)
        .with_context(|| format!("stored customer {id} has an invalid phone number"))?;

    let line2: String = row.try_get("line2")?;
    let address = Address::create(
        row.try_get("country")?,
        row.try_get("line1")?,
        Some(line2.as_str()),
        row.try_get("city")?,
        row.try_get("state")?,
        row.try_get("zip_code")?,
    )
    .with_context(|| format!("stored customer {id} has an invalid address"))?;

    Ok(Customer::new(
        CustomerId::from_uuid(id),
        row.try_get::<String, _>("name")?,
        row.try_get::<String, _>("last_name")?,
        row.try_get::<String, _>("email")?,
        phone_number,
        address,
        row.try_get("active")?,
    ))
}

pub struct PgUnitOfWork {
    pool: PgPool,
    tracker: ChangeTracker,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(&self, cancellation: &CancellationToken) -> Result<u64> {
        let mut staged = self.tracker.take().await;
        if cancellation.is_cancelled() {
            tracing::warn!(discarded = staged.len(), "Commit cancelled before start");
            bail!("operation was cancelled");
        }
        if staged.is_empty() {
            return Ok(0);
        }

        let affected = write_then_commit(
            cancellation,
            insert_customers(&self.pool, &staged),
            |tx: Transaction<'static, Postgres>| async move {
                tx.commit().await.map_err(anyhow::Error::from)
            },
        )
        .await?;

        for customer in &mut staged {
            let events = customer.take_pending_events();
            tracing::debug!(
                customer_id = %customer.id(),
                events = events.len(),
                "Domain events stored in outbox"
            );
        }

        tracing::info!(affected, "Committed customer changes");
        Ok(affected)
    }
}

/// Run the write phase under cancellation, then commit unconditionally.
///
/// Dropping the unfinished write rolls its transaction back. Once the write
/// has finished, COMMIT is always awaited so the outcome reported to the
/// caller matches what the database did.
async fn write_then_commit<T, W, C, F>(
    cancellation: &CancellationToken,
    write: W,
    commit: C,
) -> Result<u64>
where
    W: Future<Output = Result<(T, u64)>>,
    C: FnOnce(T) -> F,
    F: Future<Output = Result<()>>,
{
    let (pending, affected) = tokio::select! {
        biased;
        _ = cancellation.cancelled() => {
            tracing::warn!("Commit cancelled, transaction rolled back");
            bail!("operation was cancelled");
        }
        written = write => written?,
    };

    commit(pending).await?;
    Ok(affected)
}

async fn insert_customers(
    pool: &PgPool,
    customers: &[Customer],
) -> Result<(Transaction<'static, Postgres>, u64)> {
    let mut tx = pool.begin().await?;
    let mut affected = 0;

    for customer in customers {
        let address = customer.address();
        let result = sqlx::query(
            "INSERT INTO customers (
                id, name, last_name, email, phone_number, country, line1, line2,
                city, state, zip_code, active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(Uuid::from(customer.id()))
        .bind(customer.name())
        .bind(customer.last_name())
        .bind(customer.email())
        .bind(customer.phone_number().as_str())
        .bind(address.country())
        .bind(address.line1())
        .bind(address.line2())
        .bind(address.city())
        .bind(address.state())
        .bind(address.zip_code())
        .bind(customer.is_active())
        .execute(&mut *tx)
        .await?;
        affected += result.rows_affected();

        for event in customer.pending_events() {
            sqlx::query(
                "INSERT INTO outbox_messages (
                    id, aggregate_id, aggregate_type, event_id, event_type, payload, created_at
                ) VALUES ($1, $2, 'Customer', $3, $4, $5::jsonb, $6)",
            )
            .bind(Uuid::new_v4())
            .bind(Uuid::from(customer.id()))
            .bind(event.event_id())
            .bind(event.event_type())
            .bind(serialize_event(event)?)
            .bind(event.occurred_at())
            .execute(&mut *tx)
            .await?;
        }
    }

    Ok((tx, affected))
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Most tests never reach the database. The round trip against a live
// PostgreSQL is ignored by default, run it with:
//
//   DATABASE_URL=postgres://... cargo test -- --ignored
//
// ============================================================================
