use library_api::{
    adapters::in_memory::{
        InMemoryBookRepository, InMemoryBorrowingRecordRepository, InMemoryMemberRepository,
    },
    adapters::postgres::{
        PostgresBookRepository, PostgresBorrowingRecordRepository, PostgresMemberRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::library::ServiceDependencies,
    config::{Config, StorageConfig},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Initialize adapters
    let service_deps = match &config.storage {
        StorageConfig::Postgres {
            url,
            max_connections,
        } => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            ServiceDependencies {
                book_repository: Arc::new(PostgresBookRepository::new(pool.clone())),
                member_repository: Arc::new(PostgresMemberRepository::new(pool.clone())),
                borrowing_record_repository: Arc::new(PostgresBorrowingRecordRepository::new(
                    pool,
                )),
            }
        }
        StorageConfig::InMemory => {
            tracing::warn!("DATABASE_URL is not set, using in-memory storage");

            ServiceDependencies {
                book_repository: Arc::new(InMemoryBookRepository::new()),
                member_repository: Arc::new(InMemoryMemberRepository::new()),
                borrowing_record_repository: Arc::new(InMemoryBorrowingRecordRepository::new()),
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
