pub use sea_orm_migration::prelude::*;

mod audit;
mod m20260301_000001_create_user_table;
mod m20260301_000002_create_category_table;
mod m20260301_000003_create_store_table;
mod m20260301_000004_create_store_category_table;
mod m20260301_000005_create_menu_table;
mod m20260301_000006_create_order_table;
mod m20260301_000007_create_menu_order_table;
mod m20260301_000008_create_payment_table;
mod m20260301_000009_create_review_table;
mod m20260301_000010_create_delivery_address_table;
mod m20260301_000011_create_ai_suggestion_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_category_table::Migration),
            Box::new(m20260301_000003_create_store_table::Migration),
            Box::new(m20260301_000004_create_store_category_table::Migration),
            Box::new(m20260301_000005_create_menu_table::Migration),
            Box::new(m20260301_000006_create_order_table::Migration),
            Box::new(m20260301_000007_create_menu_order_table::Migration),
            Box::new(m20260301_000008_create_payment_table::Migration),
            Box::new(m20260301_000009_create_review_table::Migration),
            Box::new(m20260301_000010_create_delivery_address_table::Migration),
            Box::new(m20260301_000011_create_ai_suggestion_table::Migration),
        ]
    }
}
