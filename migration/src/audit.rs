use sea_orm_migration::{prelude::*, schema::*};

/// Appends the audit and tombstone columns shared by every table.
///
/// `deleted_at` and `deleted_by` stay null while a row is live.
pub(crate) fn columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(timestamp_with_time_zone(Audit::CreatedAt).default(Expr::current_timestamp()))
        .col(string(Audit::CreatedBy))
        .col(timestamp_with_time_zone(Audit::UpdatedAt).default(Expr::current_timestamp()))
        .col(string(Audit::UpdatedBy))
        .col(timestamp_with_time_zone_null(Audit::DeletedAt))
        .col(string_null(Audit::DeletedBy))
}

#[derive(DeriveIden)]
pub enum Audit {
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    DeletedAt,
    DeletedBy,
}
