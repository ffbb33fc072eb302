//! Person database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, Set};

use domain::{Person, PersonSummary};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub age: Option<i32>,
    pub favorite_foods: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row shape for queries that leave out `age`
#[derive(Debug, Clone, FromQueryResult)]
pub struct SummaryRow {
    pub id: Uuid,
    pub name: String,
    pub favorite_foods: Vec<String>,
}

/// Convert database model to domain entity
impl From<Model> for Person {
    fn from(model: Model) -> Self {
        Person {
            id: model.id.into(),
            name: model.name,
            age: model.age,
            favorite_foods: model.favorite_foods,
        }
    }
}

impl From<SummaryRow> for PersonSummary {
    fn from(row: SummaryRow) -> Self {
        PersonSummary {
            id: row.id.into(),
            name: row.name,
            favorite_foods: row.favorite_foods,
        }
    }
}

/// Full write image of a domain entity
impl From<Person> for ActiveModel {
    fn from(person: Person) -> Self {
        ActiveModel {
            id: Set(person.id.as_uuid()),
            name: Set(person.name),
            age: Set(person.age),
            favorite_foods: Set(person.favorite_foods),
        }
    }
}
