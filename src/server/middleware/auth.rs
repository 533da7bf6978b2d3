use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    policy::Principal,
};

/// Resolves the caller of a request from its session.
///
/// The guard only answers "who is calling"; whether that caller may perform an operation is
/// decided by the services through the policy table.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Gets the principal behind the session, if any.
    ///
    /// A session pointing at a missing or tombstoned user counts as anonymous and is cleared.
    ///
    /// # Returns
    /// - `Ok(Some(Principal))` - Session belongs to a live user
    /// - `Ok(None)` - Anonymous caller
    /// - `Err(AppError)` - Session or database failure
    pub async fn principal(&self) -> Result<Option<Principal>, AppError> {
        let auth_session = AuthSession::new(self.session);

        let Some(user_id) = auth_session.get_user_id().await? else {
            return Ok(None);
        };

        match UserRepository::new(self.db).find_live_by_id(user_id).await? {
            Some(user) => Ok(Some(Principal::from_entity(&user))),
            None => {
                tracing::debug!(user_id, "session refers to a missing or deleted user");
                auth_session.clear().await;
                Ok(None)
            }
        }
    }

    /// Like [`AuthGuard::principal`] but fails with `Unauthenticated` for anonymous callers.
    pub async fn require(&self) -> Result<Principal, AppError> {
        self.principal()
            .await?
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}
