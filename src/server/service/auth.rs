//! Signup.
//!
//! Credential verification is delegated to whatever fronts the API. Existing users reach a
//! session through that authenticator writing their id into the session store; the only
//! session this crate opens itself is for a user it has just created.

use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, conflict_on_unique, AppError},
    model::user::{SignupParams, User},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new user.
    ///
    /// MANAGER and MASTER signups must present the provisioned admin token. The duplicate
    /// checks and the insert share one transaction, and the UNIQUE columns catch any
    /// concurrent signup that slips between them.
    ///
    /// # Arguments
    /// - `params` - Username, email, requested role and optional admin token
    /// - `admin_token` - Provisioned secret from configuration
    ///
    /// # Returns
    /// - `Ok(User)` - Newly created user
    /// - `Err(AppError::BadRequest(_))` - Malformed username or email
    /// - `Err(AppError::AuthErr(InvalidAdminToken))` - Elevated role without the right token
    /// - `Err(AppError::Conflict(_))` - Username or email already taken
    pub async fn signup(&self, params: SignupParams, admin_token: &str) -> Result<User, AppError> {
        params.validate()?;

        if matches!(params.role, Role::Manager | Role::Master)
            && params.admin_token.as_deref() != Some(admin_token)
        {
            return Err(AuthError::InvalidAdminToken.into());
        }

        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        if user_repo.username_taken(&params.username, None).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if user_repo.email_taken(&params.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let actor = params.username.clone();
        let user = user_repo
            .create(params.username, params.email, params.role, Utc::now(), &actor)
            .await
            .map_err(|e| conflict_on_unique(e, "User already exists"))?;

        txn.commit().await?;

        tracing::info!(user_id = user.id, role = ?user.role, "user signed up");

        Ok(User::from_entity(user))
    }
}
