//! Soft-delete lifecycle shared by every persisted entity.
//!
//! Rows are never physically removed. A row is live while `deleted_at` is null; deleting it
//! stamps `deleted_at` and `deleted_by` together, exactly once. The traits here give each
//! entity the same three capabilities:
//!
//! - [`Tombstoned`] on models, to ask whether a fetched row is still live
//! - [`Audited`] on active models, to stamp the audit columns on create, update and delete
//! - [`LiveScope`] on entities, so queries filter out tombstones in SQL rather than in the caller
//!
//! The free functions [`create`], [`mutate`] and [`delete`] combine those into the lifecycle
//! contract: a tombstoned row cannot be mutated and cannot be deleted twice.

use sea_orm::{
    prelude::DateTimeUtc, sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait,
    EntityTrait, IntoActiveModel, QueryFilter, Select, UpdateMany,
};

use crate::server::error::lifecycle::LifecycleError;

/// Read side of the tombstone columns.
pub trait Tombstoned {
    /// Human readable resource name used in lifecycle errors.
    const RESOURCE: &'static str;

    fn id(&self) -> i32;

    fn deleted_at(&self) -> Option<DateTimeUtc>;

    fn is_live(&self) -> bool {
        self.deleted_at().is_none()
    }
}

/// Write side of the audit columns.
pub trait Audited {
    /// Stamps creation and modification columns and clears the tombstone.
    fn stamp_created(&mut self, at: DateTimeUtc, actor: &str);

    /// Refreshes the modification columns.
    fn stamp_updated(&mut self, at: DateTimeUtc, actor: &str);

    /// Sets both tombstone columns to the same timestamp and actor.
    fn stamp_deleted(&mut self, at: DateTimeUtc, actor: &str);
}

/// Queries restricted to live rows.
pub trait LiveScope: EntityTrait {
    /// `SELECT` over live rows only.
    fn find_live() -> Select<Self>;

    /// `SELECT` of a single live row by primary key.
    fn find_live_by_id(id: i32) -> Select<Self>;

    /// Bulk tombstone of live rows; add filters to narrow the set.
    ///
    /// Rows that are already tombstoned are excluded so their original stamp is preserved.
    fn tombstone_many(at: DateTimeUtc, actor: &str) -> UpdateMany<Self>;
}

/// Fails with `NotFound` if the row is tombstoned.
pub fn ensure_live<M: Tombstoned>(model: M) -> Result<M, LifecycleError> {
    if model.is_live() {
        Ok(model)
    } else {
        Err(LifecycleError::NotFound {
            resource: M::RESOURCE,
            id: model.id(),
        })
    }
}

/// Fails with `AlreadyDeleted` if the row is tombstoned.
pub fn ensure_deletable<M: Tombstoned>(model: M) -> Result<M, LifecycleError> {
    if model.is_live() {
        Ok(model)
    } else {
        Err(LifecycleError::AlreadyDeleted {
            resource: M::RESOURCE,
            id: model.id(),
        })
    }
}

/// Prepares a new row for insertion.
pub fn create<A: Audited>(mut active: A, at: DateTimeUtc, actor: &str) -> A {
    active.stamp_created(at, actor);
    active
}

/// Applies `apply` to a live row and refreshes its modification columns.
///
/// The returned active model only carries the changed columns plus the audit stamp, so
/// `update()` writes exactly those.
pub fn mutate<M, A, F>(model: M, at: DateTimeUtc, actor: &str, apply: F) -> Result<A, LifecycleError>
where
    M: Tombstoned + IntoActiveModel<A>,
    A: ActiveModelTrait + Audited,
    F: FnOnce(&mut A),
{
    let model = ensure_live(model)?;

    let mut active = model.into_active_model();
    apply(&mut active);
    active.stamp_updated(at, actor);

    Ok(active)
}

/// Tombstones a live row.
pub fn delete<M, A>(model: M, at: DateTimeUtc, actor: &str) -> Result<A, LifecycleError>
where
    M: Tombstoned + IntoActiveModel<A>,
    A: ActiveModelTrait + Audited,
{
    let model = ensure_deletable(model)?;

    let mut active = model.into_active_model();
    active.stamp_deleted(at, actor);

    Ok(active)
}

macro_rules! soft_delete {
    ($($module:ident => $resource:literal),+ $(,)?) => {
        $(
            impl Tombstoned for entity::$module::Model {
                const RESOURCE: &'static str = $resource;

                fn id(&self) -> i32 {
                    self.id
                }

                fn deleted_at(&self) -> Option<DateTimeUtc> {
                    self.deleted_at
                }
            }

            impl Audited for entity::$module::ActiveModel {
                fn stamp_created(&mut self, at: DateTimeUtc, actor: &str) {
                    self.created_at = ActiveValue::Set(at);
                    self.created_by = ActiveValue::Set(actor.to_string());
                    self.updated_at = ActiveValue::Set(at);
                    self.updated_by = ActiveValue::Set(actor.to_string());
                    self.deleted_at = ActiveValue::Set(None);
                    self.deleted_by = ActiveValue::Set(None);
                }

                fn stamp_updated(&mut self, at: DateTimeUtc, actor: &str) {
                    self.updated_at = ActiveValue::Set(at);
                    self.updated_by = ActiveValue::Set(actor.to_string());
                }

                fn stamp_deleted(&mut self, at: DateTimeUtc, actor: &str) {
                    self.deleted_at = ActiveValue::Set(Some(at));
                    self.deleted_by = ActiveValue::Set(Some(actor.to_string()));
                }
            }

            impl LiveScope for entity::$module::Entity {
                fn find_live() -> Select<Self> {
                    Self::find().filter(entity::$module::Column::DeletedAt.is_null())
                }

                fn find_live_by_id(id: i32) -> Select<Self> {
                    Self::find_by_id(id).filter(entity::$module::Column::DeletedAt.is_null())
                }

                fn tombstone_many(at: DateTimeUtc, actor: &str) -> UpdateMany<Self> {
                    Self::update_many()
                        .col_expr(entity::$module::Column::DeletedAt, Expr::value(at))
                        .col_expr(
                            entity::$module::Column::DeletedBy,
                            Expr::value(actor.to_string()),
                        )
                        .filter(entity::$module::Column::DeletedAt.is_null())
                }
            }
        )+
    };
}

soft_delete! {
    user => "User",
    category => "Category",
    store => "Store",
    store_category => "Store category",
    menu => "Menu",
    order => "Order",
    menu_order => "Line item",
    payment => "Payment",
    review => "Review",
    delivery_address => "Delivery address",
    ai_suggestion => "AI suggestion",
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn category(deleted_at: Option<DateTimeUtc>) -> entity::category::Model {
        let created = Utc::now() - Duration::days(1);
        entity::category::Model {
            id: 7,
            name: "Korean".to_string(),
            created_at: created,
            created_by: "master".to_string(),
            updated_at: created,
            updated_by: "master".to_string(),
            deleted_at,
            deleted_by: deleted_at.map(|_| "master".to_string()),
        }
    }

    #[test]
    fn create_stamps_audit_columns_and_clears_tombstone() {
        let now = Utc::now();
        let blank = <entity::category::ActiveModel as Default>::default();
        let active = create(blank, now, "master");

        assert_eq!(active.created_at, ActiveValue::Set(now));
        assert_eq!(active.created_by, ActiveValue::Set("master".to_string()));
        assert_eq!(active.updated_at, ActiveValue::Set(now));
        assert_eq!(active.deleted_at, ActiveValue::Set(None));
        assert_eq!(active.deleted_by, ActiveValue::Set(None));
    }

    #[test]
    fn mutate_refreshes_updated_columns_only() {
        let now = Utc::now();
        let original = category(None);
        let created_at = original.created_at;

        let active: entity::category::ActiveModel = mutate(original, now, "manager", |a| {
            a.name = ActiveValue::Set("Chinese".to_string());
        })
        .unwrap();

        assert_eq!(active.name, ActiveValue::Set("Chinese".to_string()));
        assert_eq!(active.updated_at, ActiveValue::Set(now));
        assert_eq!(active.updated_by, ActiveValue::Set("manager".to_string()));
        assert_eq!(active.created_at, ActiveValue::Unchanged(created_at));
        assert!(!active.deleted_at.is_set());
    }

    #[test]
    fn mutate_rejects_tombstoned_row() {
        let result: Result<entity::category::ActiveModel, _> =
            mutate(category(Some(Utc::now())), Utc::now(), "master", |_| {});

        assert_eq!(
            result.unwrap_err(),
            LifecycleError::NotFound {
                resource: "Category",
                id: 7
            }
        );
    }

    #[test]
    fn delete_sets_both_tombstone_columns_together() {
        let now = Utc::now();
        let active: entity::category::ActiveModel = delete(category(None), now, "master").unwrap();

        assert_eq!(active.deleted_at, ActiveValue::Set(Some(now)));
        assert_eq!(active.deleted_by, ActiveValue::Set(Some("master".to_string())));
        assert!(!active.updated_at.is_set());
    }

    #[test]
    fn delete_rejects_already_deleted_row() {
        let result: Result<entity::category::ActiveModel, _> =
            delete(category(Some(Utc::now())), Utc::now(), "master");

        assert_eq!(
            result.unwrap_err(),
            LifecycleError::AlreadyDeleted {
                resource: "Category",
                id: 7
            }
        );
    }

    #[test]
    fn liveness_follows_deleted_at() {
        assert!(category(None).is_live());
        assert!(!category(Some(Utc::now())).is_live());
        assert!(ensure_live(category(None)).is_ok());
        assert!(ensure_deletable(category(Some(Utc::now()))).is_err());
    }
}
