//! Server-side API backend and business logic.
//!
//! This module contains the complete backend for the delivery marketplace: API endpoints,
//! authorization policy, order workflow, data access and infrastructure services. The
//! backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Business logic, authorization checks and transactions
//! - **Policy** (`policy/`) - Role ranks and the access table for every guarded operation
//! - **Data Layer** (`data/`) - Repositories and the soft-delete lifecycle
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers, the auth guard and rate limiting
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, AI client, admin token)
//! - **Startup** (`startup`) - Initialization of database, sessions and the HTTP client
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **AI** (`ai`) - Menu suggestion generator backed by an external text model
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** loads the session and resolves the caller
//! 3. **Controller** converts DTOs to params and calls the service
//! 4. **Service** authorizes the caller, then runs the operation in a transaction
//! 5. **Data** queries database, hiding tombstoned rows
//! 6. **Controller** converts domain model to DTO, returns HTTP response

pub mod ai;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod policy;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
