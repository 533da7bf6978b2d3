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
                        .table(Menu::Table)
                        .if_not_exists()
                        .col(pk_auto(Menu::Id))
                        .col(integer(Menu::StoreId))
                        .col(string(Menu::Name))
                        .col(big_integer(Menu::Price))
                        .col(text_null(Menu::Description))
                        .col(boolean(Menu::PublicStatus).default(true))
                        .col(string_null(Menu::MenuImage)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_menu_store_id")
                        .from(Menu::Table, Menu::StoreId)
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
            .drop_table(Table::drop().table(Menu::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Menu {
    #[sea_orm(iden = "p_menu")]
    Table,
    Id,
    StoreId,
    Name,
    Price,
    Description,
    PublicStatus,
    MenuImage,
}
