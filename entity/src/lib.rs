//! SeaORM entities for the delivery marketplace schema.
//!
//! Every table carries the same six audit columns (`created_at`, `created_by`, `updated_at`,
//! `updated_by`, `deleted_at`, `deleted_by`). Rows are never physically removed; a row is live
//! while `deleted_at` is null.

pub mod prelude;

pub mod ai_suggestion;
pub mod category;
pub mod delivery_address;
pub mod menu;
pub mod menu_order;
pub mod order;
pub mod payment;
pub mod review;
pub mod sea_orm_active_enums;
pub mod store;
pub mod store_category;
pub mod user;
