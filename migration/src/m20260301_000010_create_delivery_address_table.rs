use sea_orm_migration::{prelude::*, schema::*, sea_orm::ConnectionTrait};

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
                        .table(DeliveryAddress::Table)
                        .if_not_exists()
                        .col(pk_auto(DeliveryAddress::Id))
                        .col(integer(DeliveryAddress::UserId))
                        .col(string(DeliveryAddress::Address))
                        .col(string_null(DeliveryAddress::Request)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_delivery_address_user_id")
                        .from(DeliveryAddress::Table, DeliveryAddress::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await?;

        // One live row per (user, address); tombstoned rows don't block re-adding the address.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_delivery_address_live_user_address \
                 ON p_delivery_address (user_id, address) WHERE deleted_at IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeliveryAddress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeliveryAddress {
    #[sea_orm(iden = "p_delivery_address")]
    Table,
    Id,
    UserId,
    Address,
    Request,
}
