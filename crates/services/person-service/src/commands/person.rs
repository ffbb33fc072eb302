//! Person commands - one CLI entry per person operation.

use std::fs;

use common::{AppError, AppResult};
use domain::{NewPerson, PersonId};

use super::print_json;
use crate::cli::args::PersonCommand;
use crate::service::PersonService;

/// Execute a person command against the service
pub async fn execute(command: PersonCommand, service: &dyn PersonService) -> AppResult<()> {
    match command {
        PersonCommand::Create { name, age, foods } => {
            let new = NewPerson {
                name,
                age,
                favorite_foods: foods,
            };
            print_json(&service.create_one(new).await?)
        }
        PersonCommand::CreateMany { file } => {
            let raw = fs::read_to_string(&file).map_err(|e| {
                AppError::config(format!("Cannot read {}: {}", file.display(), e))
            })?;
            let people: Vec<NewPerson> = serde_json::from_str(&raw)
                .map_err(|e| AppError::validation(format!("Invalid people file: {}", e)))?;
            print_json(&service.create_many(people).await?)
        }
        PersonCommand::FindByName { name } => print_json(&service.find_by_name(&name).await?),
        PersonCommand::FindByFood { food } => {
            print_or_not_found(service.find_one_by_favorite_food(&food).await?)
        }
        PersonCommand::FindById { id } => {
            let id: PersonId = id.parse()?;
            print_or_not_found(service.find_by_id(id).await?)
        }
        PersonCommand::AddFood { id, food } => {
            let id: PersonId = id.parse()?;
            print_or_not_found(service.add_favorite_food_and_save(id, &food).await?)
        }
        PersonCommand::SetAge { name, age } => {
            print_or_not_found(service.set_age_by_name(&name, age).await?)
        }
        PersonCommand::Delete { id } => {
            let id: PersonId = id.parse()?;
            print_or_not_found(service.delete_by_id(id).await?)
        }
        PersonCommand::DeleteByName { name } => {
            print_json(&service.delete_all_by_name(&name).await?)
        }
        PersonCommand::QueryFood { food, limit } => {
            print_json(&service.query_favorite_food_sorted_limited(&food, limit).await?)
        }
    }
}

fn print_or_not_found<T: serde::Serialize>(value: Option<T>) -> AppResult<()> {
    match value {
        Some(value) => print_json(&value),
        None => {
            println!("Person not found");
            Ok(())
        }
    }
}
