use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;
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
                        .table(Order::Table)
                        .if_not_exists()
                        .col(pk_auto(Order::Id))
                        .col(integer(Order::UserId))
                        .col(string_len(Order::OrderStatus, 16))
                        .col(string(Order::OrderType))
                        .col(string(Order::Address))
                        .col(big_integer(Order::TotalPrice)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_order_user_id")
                        .from(Order::Table, Order::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_user_id_status")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .col(Order::OrderStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Order {
    #[sea_orm(iden = "p_order")]
    Table,
    Id,
    UserId,
    OrderStatus,
    OrderType,
    Address,
    TotalPrice,
}
