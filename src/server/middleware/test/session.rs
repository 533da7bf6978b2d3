use crate::server::{error::AppError, middleware::session::AuthSession};
use test_utils::builder::TestBuilder;

/// Tests that logging in twice keeps only the latest user and logout clears it.
///
/// Expected: second user id stored, then None after clear
#[tokio::test]
async fn replaces_and_clears_user_id() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_, session) = test.db_and_session().await.unwrap();

    let auth_session = AuthSession::new(session);
    assert!(auth_session.get_user_id().await?.is_none());

    auth_session.set_user_id(7).await?;
    auth_session.set_user_id(9).await?;
    assert_eq!(auth_session.get_user_id().await?, Some(9));

    auth_session.clear().await;
    assert!(auth_session.get_user_id().await?.is_none());

    Ok(())
}
