//! Person service - the operations callers perform on person records.
//!
//! Validation happens here, before any request is made. Lookups and
//! mutations that match nothing come back as `None`; they are never turned
//! into errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use common::{AppError, AppResult};
use domain::{DeleteSummary, NewPerson, Person, PersonId, PersonSummary};

use crate::repository::PersonRepository;

/// Person service trait for dependency injection.
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Validate and insert one record
    async fn create_one(&self, person: NewPerson) -> AppResult<Person>;

    /// Validate every entry, then insert them as one batch
    async fn create_many(&self, people: Vec<NewPerson>) -> AppResult<Vec<Person>>;

    /// All records whose name matches exactly
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>>;

    /// First record whose food list contains `food`
    async fn find_one_by_favorite_food(&self, food: &str) -> AppResult<Option<Person>>;

    /// Point lookup
    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>>;

    /// Fetch, append `food` to the list, and save the full record
    async fn add_favorite_food_and_save(
        &self,
        id: PersonId,
        food: &str,
    ) -> AppResult<Option<Person>>;

    /// Atomically set the age of the first record with this name
    async fn set_age_by_name(&self, name: &str, age: i32) -> AppResult<Option<Person>>;

    /// Remove one record, returning it as it was
    async fn delete_by_id(&self, id: PersonId) -> AppResult<Option<Person>>;

    /// Remove every record with this name
    async fn delete_all_by_name(&self, name: &str) -> AppResult<DeleteSummary>;

    /// Records containing `food`, sorted by name, at most `limit`, without age
    async fn query_favorite_food_sorted_limited(
        &self,
        food: &str,
        limit: u64,
    ) -> AppResult<Vec<PersonSummary>>;
}

/// Concrete implementation of PersonService using repository.
pub struct PersonManager {
    repo: Arc<dyn PersonRepository>,
}

impl PersonManager {
    /// Create new person service instance with repository
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PersonService for PersonManager {
    #[instrument(skip_all, fields(name = %person.name))]
    async fn create_one(&self, person: NewPerson) -> AppResult<Person> {
        person.check().map_err(AppError::from)?;

        let created = self.repo.create(person).await?;
        info!(id = %created.id, "Person created");
        Ok(created)
    }

    #[instrument(skip_all, fields(count = people.len()))]
    async fn create_many(&self, people: Vec<NewPerson>) -> AppResult<Vec<Person>> {
        for (index, person) in people.iter().enumerate() {
            person.check().map_err(|e| {
                AppError::validation(format!("Entry {}: {}", index, AppError::from(e)))
            })?;
        }

        let created = self.repo.create_many(people).await?;
        info!(created = created.len(), "People created");
        Ok(created)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>> {
        let people = self.repo.find_by_name(name).await?;
        debug!(name, matches = people.len(), "Looked up people by name");
        Ok(people)
    }

    async fn find_one_by_favorite_food(&self, food: &str) -> AppResult<Option<Person>> {
        let person = self.repo.find_one_by_food(food).await?;
        debug!(food, found = person.is_some(), "Looked up person by food");
        Ok(person)
    }

    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>> {
        let person = self.repo.find_by_id(id).await?;
        debug!(%id, found = person.is_some(), "Looked up person by id");
        Ok(person)
    }

    #[instrument(skip(self))]
    async fn add_favorite_food_and_save(
        &self,
        id: PersonId,
        food: &str,
    ) -> AppResult<Option<Person>> {
        let Some(mut person) = self.repo.find_by_id(id).await? else {
            info!("Person not found");
            return Ok(None);
        };

        person.add_favorite_food(food);
        let saved = self.repo.update(person).await?;
        info!(foods = saved.favorite_foods.len(), "Favorite food added");
        Ok(Some(saved))
    }

    #[instrument(skip(self))]
    async fn set_age_by_name(&self, name: &str, age: i32) -> AppResult<Option<Person>> {
        let updated = self.repo.update_age_by_name(name, age).await?;
        match &updated {
            Some(person) => info!(id = %person.id, "Age updated"),
            None => info!("No person with that name"),
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: PersonId) -> AppResult<Option<Person>> {
        let removed = self.repo.delete(id).await?;
        if removed.is_some() {
            info!("Person removed");
        } else {
            info!("Person not found");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_all_by_name(&self, name: &str) -> AppResult<DeleteSummary> {
        let deleted_count = self.repo.delete_by_name(name).await?;
        info!(deleted_count, "People removed");
        Ok(DeleteSummary { deleted_count })
    }

    async fn query_favorite_food_sorted_limited(
        &self,
        food: &str,
        limit: u64,
    ) -> AppResult<Vec<PersonSummary>> {
        let people = self.repo.find_by_food_sorted(food, limit).await?;
        debug!(food, limit, matches = people.len(), "Queried people by food");
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};
    use sea_orm::DbErr;

    use super::*;
    use crate::repository::MockPersonRepository;

    fn person(name: &str, age: Option<i32>, foods: &[&str]) -> Person {
        Person {
            id: PersonId::generate(),
            name: name.to_string(),
            age,
            favorite_foods: foods.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn service(repo: MockPersonRepository) -> PersonManager {
        PersonManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_one_returns_persisted_record() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(Person::from_new(PersonId::generate(), new)));

        let input = NewPerson::new("Nader Zeyara")
            .with_age(30)
            .with_foods(["Pizza", "Pasta"]);
        let created = service(repo).create_one(input).await.unwrap();

        assert_eq!(created.name, "Nader Zeyara");
        assert_eq!(created.age, Some(30));
        assert_eq!(created.favorite_foods, vec!["Pizza", "Pasta"]);
    }

    #[tokio::test]
    async fn test_create_one_empty_name_sends_nothing() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create().never();

        let result = service(repo).create_one(NewPerson::new("")).await;

        let err = result.unwrap_err();
        assert!(err.is_validation_error());
    }

    #[tokio::test]
    async fn test_create_many_rejects_batch_with_invalid_entry() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create_many().never();

        let result = service(repo)
            .create_many(vec![NewPerson::new("Tamer Zeyara"), NewPerson::new("")])
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("Entry 1")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_many_passes_batch_through() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create_many().times(1).returning(|people| {
            Ok(people
                .into_iter()
                .map(|new| Person::from_new(PersonId::generate(), new))
                .collect())
        });

        let created = service(repo)
            .create_many(vec![
                NewPerson::new("Tamer Zeyara").with_age(35),
                NewPerson::new("Ahmad Zeyara").with_age(28),
                NewPerson::new("Anas Zeyara").with_age(32),
            ])
            .await
            .unwrap();

        let names: Vec<_> = created.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tamer Zeyara", "Ahmad Zeyara", "Anas Zeyara"]);
    }

    #[tokio::test]
    async fn test_find_one_by_favorite_food_absent_is_not_an_error() {
        let mut repo = MockPersonRepository::new();
        repo.expect_find_one_by_food()
            .with(eq("Pizza"))
            .returning(|_| Ok(None));

        let result = service(repo).find_one_by_favorite_food("Pizza").await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_add_favorite_food_appends_and_saves() {
        let before = person("Ahmad Zeyara", Some(28), &["Pizza", "Burritos"]);
        let id = before.id;

        let mut repo = MockPersonRepository::new();
        let found = before.clone();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update().times(1).returning(Ok);

        let saved = service(repo)
            .add_favorite_food_and_save(id, "hamburger")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(saved.favorite_foods, vec!["Pizza", "Burritos", "hamburger"]);
        assert_eq!(saved.id, before.id);
        assert_eq!(saved.name, before.name);
        assert_eq!(saved.age, before.age);
    }

    #[tokio::test]
    async fn test_add_favorite_food_missing_id_skips_save() {
        let mut repo = MockPersonRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let result = service(repo)
            .add_favorite_food_and_save(PersonId::generate(), "hamburger")
            .await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_add_favorite_food_surfaces_fetch_failure() {
        let mut repo = MockPersonRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(AppError::from(DbErr::Custom("connection reset".into()))));
        repo.expect_update().never();

        let err = service(repo)
            .add_favorite_food_and_save(PersonId::generate(), "hamburger")
            .await
            .unwrap_err();

        assert!(err.is_store_error());
    }

    #[tokio::test]
    async fn test_set_age_by_name_returns_updated_record() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update_age_by_name()
            .with(eq("Tamer Zeyara"), eq(20))
            .returning(|name, age| Ok(Some(person(name, Some(age), &["Burritos"]))));

        let updated = service(repo)
            .set_age_by_name("Tamer Zeyara", 20)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.age, Some(20));
        assert_eq!(updated.favorite_foods, vec!["Burritos"]);
    }

    #[tokio::test]
    async fn test_set_age_by_name_no_match() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update_age_by_name()
            .with(always(), always())
            .returning(|_, _| Ok(None));

        let result = service(repo).set_age_by_name("Nobody", 20).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_delete_by_id_returns_removed_record() {
        let removed = person("Anas Zeyara", Some(32), &["Pasta"]);
        let id = removed.id;

        let mut repo = MockPersonRepository::new();
        let image = removed.clone();
        repo.expect_delete()
            .with(eq(id))
            .returning(move |_| Ok(Some(image.clone())));

        let result = service(repo).delete_by_id(id).await.unwrap();

        assert_eq!(result, Some(removed));
    }

    #[tokio::test]
    async fn test_delete_all_by_name_reports_count() {
        let mut repo = MockPersonRepository::new();
        repo.expect_delete_by_name()
            .with(eq("Mary"))
            .returning(|_| Ok(3));

        let summary = service(repo).delete_all_by_name("Mary").await.unwrap();

        assert_eq!(summary, DeleteSummary { deleted_count: 3 });
    }

    #[tokio::test]
    async fn test_query_passes_food_and_limit() {
        let mut repo = MockPersonRepository::new();
        repo.expect_find_by_food_sorted()
            .with(eq("burritos"), eq(2u64))
            .returning(|_, _| {
                Ok(vec![
                    person("Alice", None, &["burritos"]).into(),
                    person("Bob", None, &["burritos"]).into(),
                ])
            });

        let people = service(repo)
            .query_favorite_food_sorted_limited("burritos", 2)
            .await
            .unwrap();

        let names: Vec<_> = people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }
}
