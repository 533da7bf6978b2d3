use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{category::CategoryRepository, lifecycle},
    error::{conflict_on_unique, lifecycle::LifecycleError, AppError},
    model::{
        category::Category,
        pagination::{Page, PageRequest},
    },
    policy::{Operation, Principal},
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category. MASTER only; names are unique.
    pub async fn create(&self, caller: Option<&Principal>, name: String) -> Result<Category, AppError> {
        let principal = Operation::CreateCategory.require(caller, None)?;
        let name = validate_name(name)?;

        let txn = self.db.begin().await?;
        let repo = CategoryRepository::new(&txn);

        if repo.name_taken(&name, None).await? {
            return Err(AppError::Conflict("Category already exists".to_string()));
        }

        let category = repo
            .create(name, Utc::now(), &principal.username)
            .await
            .map_err(|e| conflict_on_unique(e, "Category already exists"))?;

        txn.commit().await?;

        Ok(Category::from_entity(category))
    }

    /// Lists live categories. Public.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Category>, AppError> {
        let (categories, total) = CategoryRepository::new(self.db)
            .get_paginated(&request)
            .await?;

        Ok(Page::new(categories, total, &request).map(Category::from_entity))
    }

    /// Renames a live category. MASTER only.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        name: String,
    ) -> Result<Category, AppError> {
        let principal = Operation::UpdateCategory.require(caller, None)?;
        let name = validate_name(name)?;

        let txn = self.db.begin().await?;
        let repo = CategoryRepository::new(&txn);

        let category = repo
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Category",
                id,
            })?;

        if repo.name_taken(&name, Some(id)).await? {
            return Err(AppError::Conflict("Category already exists".to_string()));
        }

        let active = lifecycle::mutate(
            category,
            Utc::now(),
            &principal.username,
            |active: &mut entity::category::ActiveModel| {
                active.name = ActiveValue::Set(name);
            },
        )?;
        let category = repo
            .update(active)
            .await
            .map_err(|e| conflict_on_unique(e, "Category already exists"))?;

        txn.commit().await?;

        Ok(Category::from_entity(category))
    }

    /// Soft-deletes a category. MASTER only.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        let principal = Operation::DeleteCategory.require(caller, None)?;

        let repo = CategoryRepository::new(self.db);
        let category = repo
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Category",
                id,
            })?;

        let active: entity::category::ActiveModel =
            lifecycle::delete(category, Utc::now(), &principal.username)?;
        repo.update(active).await?;

        Ok(())
    }
}

fn validate_name(name: String) -> Result<String, AppError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Category name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
