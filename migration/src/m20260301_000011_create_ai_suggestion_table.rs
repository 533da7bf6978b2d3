use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_store_table::Store;
use crate::audit;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                audit::columns(
                    Table::create()
                        .table(AiSuggestion::Table)
                        .if_not_exists()
                        .col(pk_auto(AiSuggestion::Id))
                        .col(integer(AiSuggestion::StoreId))
                        .col(text(AiSuggestion::RequestText))
                        .col(text(AiSuggestion::ResponseText)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_ai_suggestion_store_id")
                        .from(AiSuggestion::Table, AiSuggestion::StoreId)
                        .to(Store::Table, Store::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiSuggestion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiSuggestion {
    #[sea_orm(iden = "p_ai_suggestion")]
    Table,
    Id,
    StoreId,
    RequestText,
    ResponseText,
}
