use envconfig::Envconfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pos_customers::config::Config;
use pos_customers::domain::customer::CustomerRepository;
use pos_customers::persistence::{InMemoryStore, PgStore};
use pos_customers::shared::UnitOfWork;
use pos_customers::{CancellationToken, CreateCustomerCommand, CreateCustomerHandler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init_from_env()?;

    // RUST_LOG overrides LOG_FILTER
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    tracing::info!("Starting point-of-sale customer service demo");

    match config.database.url {
        Some(_) => {
            let store = PgStore::connect(&config.database).await?;
            store.ensure_schema().await?;
            tracing::info!("Using PostgreSQL store");
            run_demo(|| store.begin()).await;
        }
        None => {
            let store = InMemoryStore::new();
            tracing::info!("DATABASE_URL not set, using in-memory store");
            run_demo(|| store.begin()).await;
            tracing::info!(customers = store.customers().await.len(), "In-memory store contents");
        }
    }

    tracing::info!("Demo complete");
    Ok(())
}

/// Submit a few registrations, each through its own repository and unit of work
async fn run_demo<R, U>(begin: impl Fn() -> (R, U))
where
    R: CustomerRepository,
    U: UnitOfWork,
{
    let requests = [
        sample_command("12345678", "1 Market St"),
        sample_command("123", "1 Market St"),
        sample_command("1234-5678", ""),
    ];

    for command in requests {
        let (repository, unit_of_work) = begin();
        let handler = CreateCustomerHandler::new(repository, unit_of_work);

        match handler.handle(command, &CancellationToken::new()).await {
            Ok(()) => tracing::info!("Customer registered"),
            Err(error) => tracing::warn!(
                code = error.code(),
                kind = ?error.kind(),
                status = error.status_hint(),
                description = error.description(),
                "Customer registration rejected"
            ),
        }
    }
}

fn sample_command(phone_number: &str, line1: &str) -> CreateCustomerCommand {
    CreateCustomerCommand {
        name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone_number: phone_number.to_string(),
        country: "USA".to_string(),
        line1: line1.to_string(),
        line2: None,
        city: "Arlington".to_string(),
        state: "VA".to_string(),
        zip_code: "22202".to_string(),
    }
}
