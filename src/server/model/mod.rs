//! Server-side domain models and parameter types.
//!
//! Domain models are built from entity models after they leave the repositories and are
//! transformed to DTOs at the controller boundary. Parameter types carry validated input from
//! controllers into services.

pub mod ai_suggestion;
pub mod category;
pub mod delivery_address;
pub mod menu;
pub mod order;
pub mod pagination;
pub mod review;
pub mod store;
pub mod user;
