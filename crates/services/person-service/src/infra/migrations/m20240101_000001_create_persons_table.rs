//! Migration: Create the persons collection.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Persons::Id).uuid().not_null().primary_key())
                    // Required field: writes without a name are rejected here
                    .col(ColumnDef::new(Persons::Name).text().not_null())
                    .col(ColumnDef::new(Persons::Age).integer().null())
                    .col(
                        ColumnDef::new(Persons::FavoriteFoods)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_persons_name")
                    .table(Persons::Table)
                    .col(Persons::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Persons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Persons {
    Table,
    Id,
    Name,
    Age,
    FavoriteFoods,
}
