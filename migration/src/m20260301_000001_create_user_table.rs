use sea_orm_migration::{prelude::*, schema::*};

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
                        .table(User::Table)
                        .if_not_exists()
                        .col(pk_auto(User::Id))
                        .col(string_uniq(User::Username))
                        .col(string_uniq(User::Email))
                        .col(string_len(User::Role, 16)),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "p_user")]
    Table,
    Id,
    Username,
    Email,
    Role,
}
