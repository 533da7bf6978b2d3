//! Store management and lookup.

use std::collections::BTreeSet;

use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{ActiveValue, ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        category::CategoryRepository, lifecycle, store::StoreRepository,
        store_category::StoreCategoryRepository, user::UserRepository,
    },
    error::{lifecycle::LifecycleError, AppError},
    model::{
        pagination::{Page, PageRequest},
        store::{CreateStoreParams, Store, UpdateStoreParams},
    },
    policy::{self, Operation, Principal},
};

pub struct StoreService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StoreService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a store for an OWNER. MASTER only.
    ///
    /// # Returns
    /// - `Ok(Store)` - Created store with its category links
    /// - `Err(AppError::BadRequest(_))` - Owner is not a live OWNER or a category is unknown
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        params: CreateStoreParams,
    ) -> Result<Store, AppError> {
        let principal = Operation::CreateStore.require(caller, None)?;
        let category_ids = dedup(&params.category_ids);

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;

        match UserRepository::new(&txn).find_live_by_id(params.owner_id).await? {
            Some(owner) if owner.role == Role::Owner => {}
            Some(_) => {
                return Err(AppError::BadRequest(
                    "Store owner must hold the OWNER role".to_string(),
                ))
            }
            None => {
                return Err(LifecycleError::NotFound {
                    resource: "User",
                    id: params.owner_id,
                }
                .into())
            }
        }

        ensure_categories_live(&txn, &category_ids).await?;

        let store = StoreRepository::new(&txn).create(&params, now, actor).await?;

        let links = StoreCategoryRepository::new(&txn);
        for category_id in &category_ids {
            links.link(store.id, *category_id, now, actor).await?;
        }

        txn.commit().await?;

        tracing::info!(store_id = store.id, owner_id = store.user_id, "store created");

        Ok(Store::from_entity(store, category_ids))
    }

    /// Gets a live store. Public.
    pub async fn get(&self, id: i32) -> Result<Store, AppError> {
        let store = self.find_live_store_by_id(id).await?;
        let category_ids = StoreCategoryRepository::new(self.db)
            .live_category_ids(store.id)
            .await?;

        Ok(Store::from_entity(store, category_ids))
    }

    /// Resolves a live store or fails with `NotFound`.
    pub async fn find_live_store_by_id(&self, id: i32) -> Result<entity::store::Model, AppError> {
        Ok(StoreRepository::new(self.db)
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id,
            })?)
    }

    /// Lists live stores, optionally by name fragment. Public.
    pub async fn list(
        &self,
        name_contains: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<Store>, AppError> {
        let (stores, total) = StoreRepository::new(self.db)
            .get_paginated(name_contains, &request)
            .await?;

        let ids: Vec<i32> = stores.iter().map(|store| store.id).collect();
        let mut categories = StoreCategoryRepository::new(self.db)
            .live_category_ids_for(&ids)
            .await?;

        let stores = stores
            .into_iter()
            .map(|store| {
                let category_ids = categories.remove(&store.id).unwrap_or_default();
                Store::from_entity(store, category_ids)
            })
            .collect();

        Ok(Page::new(stores, total, &request))
    }

    /// Updates a store. The store's OWNER or MASTER.
    ///
    /// Supplied category ids replace the current links: links no longer wanted are
    /// tombstoned and new ones inserted.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        params: UpdateStoreParams,
    ) -> Result<Store, AppError> {
        policy::authenticate(caller)?;
        let store = self.find_live_store_by_id(id).await?;
        let principal = Operation::UpdateStore.require(caller, Some(store.user_id))?;

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;
        let links = StoreCategoryRepository::new(&txn);

        if let Some(wanted) = params.category_ids.as_deref() {
            let wanted = dedup(wanted);
            ensure_categories_live(&txn, &wanted).await?;

            let current: BTreeSet<i32> = links.live_category_ids(id).await?.into_iter().collect();
            let wanted_set: BTreeSet<i32> = wanted.iter().copied().collect();

            let removed: Vec<i32> = current.difference(&wanted_set).copied().collect();
            links.unlink(id, &removed, now, actor).await?;

            for category_id in wanted_set.difference(&current) {
                links.link(id, *category_id, now, actor).await?;
            }
        }

        let UpdateStoreParams {
            name,
            address,
            tel,
            open_status,
            start_time,
            end_time,
            ..
        } = params;

        let active = lifecycle::mutate(
            store,
            now,
            actor,
            |active: &mut entity::store::ActiveModel| {
                if let Some(name) = name {
                    active.name = ActiveValue::Set(name);
                }
                if let Some(address) = address {
                    active.address = ActiveValue::Set(address);
                }
                if let Some(tel) = tel {
                    active.tel = ActiveValue::Set(tel);
                }
                if let Some(open_status) = open_status {
                    active.open_status = ActiveValue::Set(open_status);
                }
                if let Some(start_time) = start_time {
                    active.start_time = ActiveValue::Set(start_time);
                }
                if let Some(end_time) = end_time {
                    active.end_time = ActiveValue::Set(end_time);
                }
            },
        )?;
        let store = StoreRepository::new(&txn).update(active).await?;
        let category_ids = links.live_category_ids(id).await?;

        txn.commit().await?;

        Ok(Store::from_entity(store, category_ids))
    }

    /// Soft-deletes a store and its category links. The store's OWNER or MASTER.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        policy::authenticate(caller)?;
        let store = StoreRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id,
            })?;
        let principal = Operation::DeleteStore.require(caller, Some(store.user_id))?;

        let now = Utc::now();
        let actor = principal.username.as_str();

        let txn = self.db.begin().await?;

        let active: entity::store::ActiveModel = lifecycle::delete(store, now, actor)?;
        StoreRepository::new(&txn).update(active).await?;
        let links = StoreCategoryRepository::new(&txn)
            .unlink_all(id, now, actor)
            .await?;

        txn.commit().await?;

        tracing::info!(store_id = id, links, "store deleted");

        Ok(())
    }
}

fn dedup(ids: &[i32]) -> Vec<i32> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect()
}

async fn ensure_categories_live<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<(), AppError> {
    let live = CategoryRepository::new(db).count_live_in(ids).await?;
    if live != ids.len() as u64 {
        return Err(AppError::BadRequest(
            "One or more categories do not exist".to_string(),
        ));
    }
    Ok(())
}
