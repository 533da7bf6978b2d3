use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000005_create_menu_table::Menu, m20260301_000006_create_order_table::Order,
};
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
                        .table(MenuOrder::Table)
                        .if_not_exists()
                        .col(pk_auto(MenuOrder::Id))
                        .col(integer(MenuOrder::OrderId))
                        .col(integer(MenuOrder::MenuId))
                        .col(big_integer(MenuOrder::Amount))
                        .col(big_integer(MenuOrder::UnitPrice)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_menu_order_order_id")
                        .from(MenuOrder::Table, MenuOrder::OrderId)
                        .to(Order::Table, Order::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_menu_order_menu_id")
                        .from(MenuOrder::Table, MenuOrder::MenuId)
                        .to(Menu::Table, Menu::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MenuOrder {
    #[sea_orm(iden = "p_menu_order")]
    Table,
    Id,
    OrderId,
    MenuId,
    Amount,
    UnitPrice,
}
