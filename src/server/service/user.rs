//! User self-service and administration.

use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{ActiveValue, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{lifecycle, user::UserRepository},
    error::{auth::AuthError, conflict_on_unique, lifecycle::LifecycleError, AppError},
    model::{
        pagination::{Page, PageRequest},
        user::{UpdateUserParams, User},
    },
    policy::{guard_rank, DenyReason, Operation, Principal},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a live user. Allowed for the user itself, MANAGER and MASTER.
    pub async fn get(&self, caller: Option<&Principal>, id: i32) -> Result<User, AppError> {
        Operation::GetUser.require(caller, Some(id))?;

        let user = UserRepository::new(self.db)
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "User",
                id,
            })?;

        Ok(User::from_entity(user))
    }

    /// Searches live users by username fragment. MANAGER and MASTER only.
    pub async fn search(
        &self,
        caller: Option<&Principal>,
        username_contains: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<User>, AppError> {
        Operation::SearchUsers.require(caller, None)?;

        let (users, total) = UserRepository::new(self.db)
            .search(username_contains, &request)
            .await?;

        Ok(Page::new(users, total, &request).map(User::from_entity))
    }

    /// Updates a user's username, email or role.
    ///
    /// On top of the self-or-staff rule, an actor may never modify a user that outranks it,
    /// only staff may change roles, and no one below MASTER may grant a role above its own.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::AuthErr(_))` - Denied by the policy or the rank guard
    /// - `Err(AppError::LifecycleErr(NotFound))` - Target missing or tombstoned
    /// - `Err(AppError::BadRequest(_))` - New username or email is malformed
    /// - `Err(AppError::Conflict(_))` - New username or email already taken
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        params: UpdateUserParams,
    ) -> Result<User, AppError> {
        let principal = Operation::UpdateUser.require(caller, Some(id))?;
        params.validate()?;

        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let target = user_repo
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "User",
                id,
            })?;

        guard_rank(principal, target.role)?.into_result()?;

        if let Some(role) = params.role {
            if !matches!(principal.role, Role::Manager | Role::Master) {
                return Err(AuthError::Forbidden(DenyReason::InsufficientRole).into());
            }
            guard_rank(principal, role)?.into_result()?;
        }

        if let Some(username) = params.username.as_deref() {
            if user_repo.username_taken(username, Some(id)).await? {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }
        if let Some(email) = params.email.as_deref() {
            if user_repo.email_taken(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }

        let active = lifecycle::mutate(
            target,
            Utc::now(),
            &principal.username,
            |active: &mut entity::user::ActiveModel| {
                if let Some(username) = params.username {
                    active.username = ActiveValue::Set(username);
                }
                if let Some(email) = params.email {
                    active.email = ActiveValue::Set(email);
                }
                if let Some(role) = params.role {
                    active.role = ActiveValue::Set(role);
                }
            },
        )?;

        let user = user_repo
            .update(active)
            .await
            .map_err(|e| conflict_on_unique(e, "Username or email already exists"))?;

        txn.commit().await?;

        Ok(User::from_entity(user))
    }

    /// Soft-deletes a user. Allowed for the user itself and MASTER.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        let principal = Operation::DeleteUser.require(caller, Some(id))?;

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "User",
                id,
            })?;

        let active: entity::user::ActiveModel =
            lifecycle::delete(user, Utc::now(), &principal.username)?;
        user_repo.update(active).await?;

        tracing::info!(user_id = id, actor = %principal.username, "user deleted");

        Ok(())
    }
}
