use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Partial unique index mirrored from the delivery address migration.
///
/// Entity-generated schemas cannot express `WHERE` clauses on indexes, so the statement is
/// replayed verbatim after the tables exist.
const DELIVERY_ADDRESS_LIVE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    idx_delivery_address_live_user_address ON p_delivery_address (user_id, address) \
    WHERE deleted_at IS NULL";

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables (and any raw setup statements), then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Category};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Category)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Raw SQL statements executed after every table has been created.
    statements: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw SQL statement to run once all tables exist.
    ///
    /// # Arguments
    /// - `sql` - Statement to execute, typically an index definition
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Adds the user, category, store and menu tables.
    ///
    /// Enough for catalogue tests that never touch orders.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(User)
            .with_table(Category)
            .with_table(Store)
            .with_table(StoreCategory)
            .with_table(Menu)
    }

    /// Adds every table in the delivery schema in dependency order.
    ///
    /// Includes the live-row unique index on delivery addresses so duplicate inserts are
    /// rejected by the database the same way they are in production.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_delivery_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_delivery_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(Order)
            .with_table(MenuOrder)
            .with_table(Payment)
            .with_table(Review)
            .with_table(DeliveryAddress)
            .with_table(AiSuggestion)
            .with_statement(DELIVERY_ADDRESS_LIVE_INDEX)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection, executes all CREATE TABLE
    /// statements, then the raw statements.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_statements(self.statements).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
