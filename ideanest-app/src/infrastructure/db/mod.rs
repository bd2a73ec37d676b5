pub mod entities;
mod evaluation_repository;

pub use evaluation_repository::EvaluationRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Applies the bundled schema. Statements are idempotent; the first one that
/// fails aborts start-up.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for statement in migration_statements() {
        if let Err(e) = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await
        {
            tracing::error!("Migration statement failed: {}", e);
            return Err(e);
        }
    }

    Ok(())
}

fn migration_statements() -> impl Iterator<Item = &'static str> {
    include_str!("../../../../migrations/001_initial.sql")
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}
