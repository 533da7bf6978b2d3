use entity::sea_orm_active_enums::Role;
use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::lifecycle::{self, LiveScope},
    model::pagination::{PageRequest, SortField},
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user stamped with the given audit actor.
    pub async fn create(
        &self,
        username: String,
        email: String,
        role: Role,
        at: DateTimeUtc,
        actor: &str,
    ) -> Result<entity::user::Model, DbErr> {
        let active = entity::user::ActiveModel {
            username: ActiveValue::Set(username),
            email: ActiveValue::Set(email),
            role: ActiveValue::Set(role),
            ..Default::default()
        };

        lifecycle::create(active, at, actor).insert(self.db).await
    }

    /// Finds a user by id, including tombstoned users.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_live_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_live_by_id(id).one(self.db).await
    }

    /// Checks whether any user, live or tombstoned, other than `excluding` holds `username`.
    ///
    /// Tombstoned users keep their username since the column is unique across all rows.
    pub async fn username_taken(&self, username: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Username.eq(username));
        if let Some(id) = excluding {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether any user other than `excluding` holds `email`.
    pub async fn email_taken(&self, email: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));
        if let Some(id) = excluding {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Searches live users, optionally by a username substring.
    ///
    /// # Returns
    /// - `Ok((users, total))` - One page of users plus the total matching count
    pub async fn search(
        &self,
        username_contains: Option<&str>,
        request: &PageRequest,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let mut query = entity::prelude::User::find_live();
        if let Some(fragment) = username_contains.filter(|f| !f.is_empty()) {
            query = query.filter(entity::user::Column::Username.contains(fragment));
        }

        let column = match request.sort {
            SortField::CreatedAt => entity::user::Column::CreatedAt,
            SortField::UpdatedAt => entity::user::Column::UpdatedAt,
        };

        let paginator = query
            .order_by(column, request.direction.order())
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, request.per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(request.page).await?;

        Ok((users, total))
    }

    /// Writes the changed columns of `active`.
    pub async fn update(
        &self,
        active: entity::user::ActiveModel,
    ) -> Result<entity::user::Model, DbErr> {
        active.update(self.db).await
    }
}
