use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000003_create_store_table::Store,
    m20260301_000006_create_order_table::Order,
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
                        .table(Review::Table)
                        .if_not_exists()
                        .col(pk_auto(Review::Id))
                        .col(integer(Review::UserId))
                        .col(integer(Review::StoreId))
                        .col(integer_null(Review::OrderId))
                        .col(text(Review::Contents))
                        .col(double(Review::Score)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_user_id")
                        .from(Review::Table, Review::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_store_id")
                        .from(Review::Table, Review::StoreId)
                        .to(Store::Table, Store::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_order_id")
                        .from(Review::Table, Review::OrderId)
                        .to(Order::Table, Order::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    #[sea_orm(iden = "p_review")]
    Table,
    Id,
    UserId,
    StoreId,
    OrderId,
    Contents,
    Score,
}
