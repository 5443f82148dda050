use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;
use crate::m20240101_000002_create_phrases_table::Phrases;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::UserId).uuid().not_null())
                    .col(ColumnDef::new(Games::PhraseId).uuid().not_null())
                    .col(ColumnDef::new(Games::VisibleSoFar).string().not_null())
                    .col(
                        ColumnDef::new(Games::LettersGuessed)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Games::MistakesAllowed).integer().not_null())
                    .col(ColumnDef::new(Games::MistakesRemaining).integer().not_null())
                    .col(
                        ColumnDef::new(Games::GameOver)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_user_id")
                            .from(Games::Table, Games::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_phrase_id")
                            .from(Games::Table, Games::PhraseId)
                            .to(Phrases::Table, Phrases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The statistics refresh scans in-progress games
        manager
            .create_index(
                Index::create()
                    .name("idx_games_game_over")
                    .table(Games::Table)
                    .col(Games::GameOver)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Games {
    Table,
    Id,
    UserId,
    PhraseId,
    VisibleSoFar,
    LettersGuessed,
    MistakesAllowed,
    MistakesRemaining,
    GameOver,
    Version,
    CreatedAt,
}
