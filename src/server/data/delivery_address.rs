use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::data::lifecycle::{self, LiveScope};

/// Saved delivery addresses.
///
/// Uniqueness of a live `(user_id, address)` pair is enforced by a partial unique index;
/// [`Self::address_in_use`] is only the friendly early check.
pub struct DeliveryAddressRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeliveryAddressRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        address: String,
        request: Option<String>,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::delivery_address::Model, DbErr> {
        let active = entity::delivery_address::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            address: ActiveValue::Set(address),
            request: ActiveValue::Set(request),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::delivery_address::Model>, DbErr> {
        entity::prelude::DeliveryAddress::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_live_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::delivery_address::Model>, DbErr> {
        entity::prelude::DeliveryAddress::find_live_by_id(id)
            .one(self.db)
            .await
    }

    /// Gets a user's live addresses, oldest first.
    pub async fn find_live_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::delivery_address::Model>, DbErr> {
        entity::prelude::DeliveryAddress::find_live()
            .filter(entity::delivery_address::Column::UserId.eq(user_id))
            .order_by_asc(entity::delivery_address::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_live_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::DeliveryAddress::find_live()
            .filter(entity::delivery_address::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Checks whether the user already has a live address equal to `address`.
    pub async fn address_in_use(
        &self,
        user_id: i32,
        address: &str,
        excluding: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::DeliveryAddress::find_live()
            .filter(entity::delivery_address::Column::UserId.eq(user_id))
            .filter(entity::delivery_address::Column::Address.eq(address));
        if let Some(id) = excluding {
            query = query.filter(entity::delivery_address::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn update(
        &self,
        active: entity::delivery_address::ActiveModel,
    ) -> Result<entity::delivery_address::Model, DbErr> {
        active.update(self.db).await
    }
}
