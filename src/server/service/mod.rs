//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. Each guarded operation takes
//! the caller as `Option<&Principal>` and authorizes itself through the policy table before
//! touching the database, so controllers never make access decisions of their own.
//!
//! - **Business Logic**: Validation, status transitions and totals
//! - **Orchestration**: Coordinating repository calls and the AI upstream
//! - **Transaction Management**: Every check-then-write sequence runs in one transaction

pub mod ai_suggestion;
pub mod auth;
pub mod category;
pub mod delivery_address;
pub mod menu;
pub mod order;
pub mod review;
pub mod store;
pub mod user;

#[cfg(test)]
mod test;
