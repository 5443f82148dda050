use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phrases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Phrases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Phrases::Text).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Phrases::Category)
                            .string()
                            .not_null()
                            .default("Miscellaneous"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Phrases::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Phrases {
    Table,
    Id,
    Text,
    Category,
}
