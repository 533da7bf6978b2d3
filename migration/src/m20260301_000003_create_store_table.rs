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
                        .table(Store::Table)
                        .if_not_exists()
                        .col(pk_auto(Store::Id))
                        .col(integer(Store::UserId))
                        .col(string(Store::Name))
                        .col(string(Store::Address))
                        .col(string(Store::Tel))
                        .col(boolean(Store::OpenStatus))
                        .col(time(Store::StartTime))
                        .col(time(Store::EndTime)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_store_user_id")
                        .from(Store::Table, Store::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Store {
    #[sea_orm(iden = "p_store")]
    Table,
    Id,
    UserId,
    Name,
    Address,
    Tel,
    OpenStatus,
    StartTime,
    EndTime,
}
