use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000006_create_order_table::Order;
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
                        .table(Payment::Table)
                        .if_not_exists()
                        .col(pk_auto(Payment::Id))
                        .col(integer_uniq(Payment::OrderId))
                        .col(string(Payment::CardNumber))
                        .col(boolean(Payment::PaymentStatus)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_payment_order_id")
                        .from(Payment::Table, Payment::OrderId)
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
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    #[sea_orm(iden = "p_payment")]
    Table,
    Id,
    OrderId,
    CardNumber,
    PaymentStatus,
}
