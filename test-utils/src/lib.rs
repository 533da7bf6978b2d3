//! Delivery Test Utils
//!
//! Shared testing utilities for the delivery backend. Provides a builder for test contexts
//! backed by in-memory SQLite databases whose schema is generated from the SeaORM entities,
//! plus factories for inserting rows with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders for users, stores, menus, orders and the rest of the schema
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn places_order() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_delivery_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (owner, store, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
