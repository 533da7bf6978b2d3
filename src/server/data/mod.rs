//! Database repository layer for all domain entities.
//!
//! Repositories wrap SeaORM queries for one table each. They are generic over
//! `ConnectionTrait` so the same repository works on the pooled connection and inside a
//! transaction. Every finder whose name starts with `find_live` filters tombstoned rows in SQL
//! through [`lifecycle::LiveScope`]; plain `find_by_id` finders return tombstoned rows too and
//! exist for "already deleted" diagnostics.

pub mod ai_suggestion;
pub mod category;
pub mod delivery_address;
pub mod lifecycle;
pub mod menu;
pub mod menu_order;
pub mod order;
pub mod payment;
pub mod review;
pub mod store;
pub mod store_category;
pub mod user;

#[cfg(test)]
mod test;
