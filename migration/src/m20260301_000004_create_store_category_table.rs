use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000002_create_category_table::Category, m20260301_000003_create_store_table::Store,
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
                        .table(StoreCategory::Table)
                        .if_not_exists()
                        .col(pk_auto(StoreCategory::Id))
                        .col(integer(StoreCategory::StoreId))
                        .col(integer(StoreCategory::CategoryId)),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_store_category_store_id")
                        .from(StoreCategory::Table, StoreCategory::StoreId)
                        .to(Store::Table, Store::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_store_category_category_id")
                        .from(StoreCategory::Table, StoreCategory::CategoryId)
                        .to(Category::Table, Category::Id)
                        .on_delete(ForeignKeyAction::NoAction)
                        .on_update(ForeignKeyAction::NoAction),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoreCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StoreCategory {
    #[sea_orm(iden = "p_store_category")]
    Table,
    Id,
    StoreId,
    CategoryId,
}
