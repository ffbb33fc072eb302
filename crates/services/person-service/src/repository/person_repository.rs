//! Person repository implementation.
//!
//! Every method maps to one request against the store, except
//! [`PersonRepository::delete`], which reads the pre-deletion image and
//! deletes it inside one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Order, PgFunc, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait, UpdateMany,
};

use super::entities::person::{self, ActiveModel, Entity as PersonEntity, SummaryRow};
use common::{AppError, AppResult};
use domain::{NewPerson, Person, PersonId, PersonSummary};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Person repository trait for dependency injection.
///
/// Lookups that match nothing return `None` (or an empty list); only store
/// failures are errors. Callers validate input before it gets here.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert one record with a freshly assigned id
    async fn create(&self, person: NewPerson) -> AppResult<Person>;

    /// Insert all records in a single multi-row request.
    ///
    /// Not wrapped in a transaction; partial failure behaviour is whatever
    /// the store does for one batch insert.
    async fn create_many(&self, people: Vec<NewPerson>) -> AppResult<Vec<Person>>;

    /// All records with exactly this name, in insertion order
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>>;

    /// First record (insertion order) whose food list contains `food`
    async fn find_one_by_food(&self, food: &str) -> AppResult<Option<Person>>;

    /// Point lookup
    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>>;

    /// Write the full record back
    async fn update(&self, person: Person) -> AppResult<Person>;

    /// Set the age of the first record with this name in one request
    async fn update_age_by_name(&self, name: &str, age: i32) -> AppResult<Option<Person>>;

    /// Remove by id, returning the record as it was before deletion
    async fn delete(&self, id: PersonId) -> AppResult<Option<Person>>;

    /// Remove every record with this name, returning how many went
    async fn delete_by_name(&self, name: &str) -> AppResult<u64>;

    /// Records containing `food`, sorted by name, capped at `limit`, without age
    async fn find_by_food_sorted(&self, food: &str, limit: u64) -> AppResult<Vec<PersonSummary>>;
}

/// Concrete implementation of PersonRepository
pub struct PersonStore {
    db: Arc<DatabaseConnection>,
}

impl PersonStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// `food = ANY(favorite_foods)`
fn contains_food(food: &str) -> SimpleExpr {
    Expr::val(food).eq(PgFunc::any(Expr::col(person::Column::FavoriteFoods)))
}

fn find_by_food_sorted_query(food: &str, limit: u64) -> Select<PersonEntity> {
    PersonEntity::find()
        .select_only()
        .columns([
            person::Column::Id,
            person::Column::Name,
            person::Column::FavoriteFoods,
        ])
        .filter(contains_food(food))
        .order_by_asc(person::Column::Name)
        .order_by_asc(person::Column::Id)
        .limit(limit)
}

fn update_age_by_name_query(name: &str, age: i32) -> UpdateMany<PersonEntity> {
    let first_match = Query::select()
        .column(person::Column::Id)
        .from(PersonEntity)
        .and_where(person::Column::Name.eq(name))
        .order_by(person::Column::Id, Order::Asc)
        .limit(1)
        .to_owned();

    PersonEntity::update_many()
        .col_expr(person::Column::Age, Expr::value(age))
        .filter(person::Column::Id.in_subquery(first_match))
}

#[async_trait]
impl PersonRepository for PersonStore {
    async fn create(&self, person: NewPerson) -> AppResult<Person> {
        let active_model: ActiveModel = Person::from_new(PersonId::generate(), person).into();

        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::from)?;
        Ok(Person::from(model))
    }

    async fn create_many(&self, people: Vec<NewPerson>) -> AppResult<Vec<Person>> {
        if people.is_empty() {
            return Ok(Vec::new());
        }

        let persons: Vec<Person> = people
            .into_iter()
            .map(|new| Person::from_new(PersonId::generate(), new))
            .collect();

        PersonEntity::insert_many(persons.iter().cloned().map(ActiveModel::from))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(persons)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>> {
        let models = PersonEntity::find()
            .filter(person::Column::Name.eq(name))
            .order_by_asc(person::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Person::from).collect())
    }

    async fn find_one_by_food(&self, food: &str) -> AppResult<Option<Person>> {
        let result = PersonEntity::find()
            .filter(contains_food(food))
            .order_by_asc(person::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>> {
        let result = PersonEntity::find_by_id(id.as_uuid())
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn update(&self, person: Person) -> AppResult<Person> {
        let active: ActiveModel = person.into();

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Person::from(model))
    }

    async fn update_age_by_name(&self, name: &str, age: i32) -> AppResult<Option<Person>> {
        let updated = update_age_by_name_query(name, age)
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(updated.into_iter().next().map(Person::from))
    }

    async fn delete(&self, id: PersonId) -> AppResult<Option<Person>> {
        let txn = self.db.begin().await?;

        let existing = PersonEntity::find_by_id(id.as_uuid())
            .lock_exclusive()
            .one(&txn)
            .await?;

        if existing.is_some() {
            PersonEntity::delete_by_id(id.as_uuid()).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(existing.map(Person::from))
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<u64> {
        let result = PersonEntity::delete_many()
            .filter(person::Column::Name.eq(name))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn find_by_food_sorted(&self, food: &str, limit: u64) -> AppResult<Vec<PersonSummary>> {
        let rows = find_by_food_sorted_query(food, limit)
            .into_model::<SummaryRow>()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(PersonSummary::from).collect())
    }
}
