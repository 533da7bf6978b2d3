//! Request and response DTOs exchanged over the HTTP API.

pub mod ai_suggestion;
pub mod api;
pub mod category;
pub mod delivery_address;
pub mod menu;
pub mod order;
pub mod review;
pub mod store;
pub mod user;
