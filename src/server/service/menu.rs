use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection};

use crate::server::{
    data::{lifecycle, menu::MenuRepository, store::StoreRepository},
    error::{lifecycle::LifecycleError, AppError},
    model::{
        menu::{CreateMenuParams, Menu, UpdateMenuParams},
        pagination::{Page, PageRequest},
    },
    policy::{self, Operation, Principal},
};

pub struct MenuService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MenuService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a menu to a live store. The store's OWNER or MASTER.
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        params: CreateMenuParams,
    ) -> Result<Menu, AppError> {
        policy::authenticate(caller)?;
        let store = self.live_store(params.store_id).await?;
        let principal = Operation::CreateMenu.require(caller, Some(store.user_id))?;
        validate_price(params.price)?;

        let menu = MenuRepository::new(self.db)
            .create(params, Utc::now(), &principal.username)
            .await?;

        Ok(Menu::from_entity(menu))
    }

    /// Gets a live, publicly visible menu.
    pub async fn find_live_menu_by_id(&self, id: i32) -> Result<Menu, AppError> {
        let menu = MenuRepository::new(self.db)
            .find_visible_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Menu",
                id,
            })?;

        Ok(Menu::from_entity(menu))
    }

    /// Lists the live, publicly visible menus of a live store.
    pub async fn find_live_menus_by_store(
        &self,
        store_id: i32,
        request: PageRequest,
    ) -> Result<Page<Menu>, AppError> {
        self.live_store(store_id).await?;

        let (menus, total) = MenuRepository::new(self.db)
            .get_visible_by_store(store_id, &request)
            .await?;

        Ok(Page::new(menus, total, &request).map(Menu::from_entity))
    }

    /// Updates a live menu. The store's OWNER or MASTER.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        params: UpdateMenuParams,
    ) -> Result<Menu, AppError> {
        policy::authenticate(caller)?;
        let repo = MenuRepository::new(self.db);
        let menu = repo.find_live_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Menu",
            id,
        })?;
        let store = self.live_store(menu.store_id).await?;
        let principal = Operation::UpdateMenu.require(caller, Some(store.user_id))?;
        if let Some(price) = params.price {
            validate_price(price)?;
        }

        let active = lifecycle::mutate(
            menu,
            Utc::now(),
            &principal.username,
            |active: &mut entity::menu::ActiveModel| {
                if let Some(name) = params.name {
                    active.name = ActiveValue::Set(name);
                }
                if let Some(price) = params.price {
                    active.price = ActiveValue::Set(price);
                }
                if let Some(description) = params.description {
                    active.description = ActiveValue::Set(Some(description));
                }
                if let Some(public_status) = params.public_status {
                    active.public_status = ActiveValue::Set(public_status);
                }
                if let Some(menu_image) = params.menu_image {
                    active.menu_image = ActiveValue::Set(Some(menu_image));
                }
            },
        )?;

        Ok(Menu::from_entity(repo.update(active).await?))
    }

    /// Soft-deletes a menu and hides it. The store's OWNER or MASTER.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        policy::authenticate(caller)?;
        let repo = MenuRepository::new(self.db);
        let menu = repo.find_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Menu",
            id,
        })?;
        let owner_id = StoreRepository::new(self.db)
            .find_by_id(menu.store_id)
            .await?
            .map(|store| store.user_id);
        let principal = Operation::DeleteMenu.require(caller, owner_id)?;

        let mut active: entity::menu::ActiveModel =
            lifecycle::delete(menu, Utc::now(), &principal.username)?;
        active.public_status = ActiveValue::Set(false);
        repo.update(active).await?;

        Ok(())
    }

    async fn live_store(&self, store_id: i32) -> Result<entity::store::Model, AppError> {
        Ok(StoreRepository::new(self.db)
            .find_live_by_id(store_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id: store_id,
            })?)
    }
}

fn validate_price(price: i64) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::BadRequest("Price must not be negative".to_string()));
    }
    Ok(())
}
