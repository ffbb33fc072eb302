//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use domain::{
    DEFAULT_QUERY_LIMIT, DEMO_EXTRA_FOOD, DEMO_QUERY_FOOD, DEMO_REMOVED_NAME, DEMO_UPDATED_AGE,
};

/// Person Service - manage person records in the store
#[derive(Parser, Debug)]
#[command(name = "person-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Verify the store is reachable
    Check,

    /// Run the scripted walkthrough of every operation
    Demo,

    #[command(flatten)]
    Person(PersonCommand),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// One subcommand per person operation
#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    /// Create one person
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: Option<i32>,
        /// Favorite food, repeatable
        #[arg(long = "food")]
        foods: Vec<String>,
    },

    /// Create many people from a JSON array file
    CreateMany {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Find every person with an exact name
    FindByName { name: String },

    /// Find the first person who likes a food
    FindByFood { food: String },

    /// Find a person by id
    FindById { id: String },

    /// Append a favorite food to a person and save it
    AddFood {
        id: String,
        #[arg(long, default_value = DEMO_EXTRA_FOOD)]
        food: String,
    },

    /// Set the age of the first person with a name
    SetAge {
        name: String,
        #[arg(long, default_value_t = DEMO_UPDATED_AGE)]
        age: i32,
    },

    /// Delete a person by id
    Delete { id: String },

    /// Delete every person with a name
    DeleteByName {
        #[arg(default_value = DEMO_REMOVED_NAME)]
        name: String,
    },

    /// List people who like a food, sorted by name, without age
    QueryFood {
        #[arg(default_value = DEMO_QUERY_FOOD)]
        food: String,
        #[arg(long, default_value_t = DEFAULT_QUERY_LIMIT)]
        limit: u64,
    },
}
