//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation. Audit columns are stamped
//! with [`helpers::FACTORY_ACTOR`].
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let customer = factory::user::create_user(&db).await?;
//! let (owner, store, menu) = factory::helpers::create_menu_with_dependencies(&db).await?;
//! let order = factory::order::OrderFactory::new(&db, customer.id)
//!     .line_item(&menu, 2)
//!     .build()
//!     .await?;
//! ```

pub mod category;
pub mod delivery_address;
pub mod helpers;
pub mod menu;
pub mod order;
pub mod review;
pub mod store;
pub mod user;

pub use category::create_category;
pub use delivery_address::create_delivery_address;
pub use menu::create_menu;
pub use review::create_review;
pub use store::create_store;
pub use user::{create_user, create_user_with_role};
