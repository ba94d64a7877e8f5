use anyhow::{Context, Result};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fyyur::{config::Config, create_router, db::seed, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fyyur=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fyyur...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Connect to database
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    if config.seed_demo_data {
        seed::seed_demo_data(&db)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed demo data: {}", e))?;
    }

    let addr = config.bind_address();

    // Initialize application state
    let state = AppState::new(db);

    // Build application routes
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
