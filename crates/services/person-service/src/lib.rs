//! Person Service Library
//!
//! Persistence access layer for person records: schema, repository,
//! service operations and the CLI commands that drive them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::warn;

use common::{AppError, AppResult};

use crate::cli::Commands;
use crate::config::PersonServiceConfig;
use crate::infra::Database;
use crate::repository::PersonStore;
use crate::service::PersonManager;

/// Run a CLI command with the given configuration.
pub async fn run(command: Commands, config: PersonServiceConfig) -> AppResult<()> {
    match command {
        Commands::Migrate(args) => commands::migrate::execute(args, &config).await,
        Commands::Check => {
            let db = Database::connect_without_migrations(&config.database).await?;
            let result = db.ping().await.map_err(AppError::from);
            if result.is_ok() {
                println!("Store reachable");
            }
            close(db, result).await
        }
        Commands::Demo => {
            let (db, service) = open(&config).await?;
            let result = commands::demo::execute(&service).await;
            close(db, result).await
        }
        Commands::Person(command) => {
            let (db, service) = open(&config).await?;
            let result = commands::person::execute(command, &service).await;
            close(db, result).await
        }
    }
}

/// Connect, apply migrations and wire the service onto the connection.
async fn open(config: &PersonServiceConfig) -> AppResult<(Database, PersonManager)> {
    let db = Database::connect(&config.database).await?;
    let person_repo = Arc::new(PersonStore::new(db.get_connection()));
    Ok((db, PersonManager::new(person_repo)))
}

/// Release the connection, keeping the command's own outcome.
pub(crate) async fn close<T>(db: Database, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = db.close().await {
        warn!(error = %e, "Failed to close database connection");
    }
    result
}
