use entity::sea_orm_active_enums::Role;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{error::AppError, policy::Principal};

mod ai_suggestion;
mod order;
mod user;

fn principal(user: &entity::user::Model) -> Principal {
    Principal::from_entity(user)
}

/// Creates a user with `role` and returns it as a principal.
async fn principal_with_role(
    db: &sea_orm::DatabaseConnection,
    role: Role,
) -> Result<Principal, DbErr> {
    let user = factory::create_user_with_role(db, role).await?;
    Ok(principal(&user))
}

/// Counts orders, line items and payments in the database, tombstoned or not.
async fn order_row_counts(db: &sea_orm::DatabaseConnection) -> Result<(u64, u64, u64), DbErr> {
    Ok((
        entity::prelude::Order::find().count(db).await?,
        entity::prelude::MenuOrder::find().count(db).await?,
        entity::prelude::Payment::find().count(db).await?,
    ))
}
