use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::server::{
    ai::SuggestionGenerator,
    error::{ai::AiError, auth::AuthError, lifecycle::LifecycleError},
    model::{ai_suggestion::AiSuggestionFilter, pagination::PageRequest},
    policy::DenyReason,
    service::ai_suggestion::AiSuggestionService,
};

/// Replies with a fixed text, or times out when `reply` is `None`.
struct FakeGenerator {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        }
    }

    fn timing_out() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SuggestionGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.map(str::to_string).ok_or(AiError::Timeout)
    }
}

/// Tests that an owner's suggestion request is answered and stored.
///
/// Expected: Ok with the generated reply persisted for the store
#[tokio::test]
async fn stores_generated_suggestion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, store, _) = factory::helpers::create_menu_with_dependencies(db).await?;
    let generator = FakeGenerator::replying("Try a spicy rice cake");

    let suggestion = AiSuggestionService::new(db, &generator)
        .create(
            Some(&principal(&owner)),
            store.id,
            "What should we add?".to_string(),
        )
        .await?;

    assert_eq!(suggestion.store_id, store.id);
    assert_eq!(suggestion.response_text, "Try a spicy rice cake");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(entity::prelude::AiSuggestion::find().count(db).await?, 1);

    Ok(())
}

/// Tests that an upstream timeout surfaces as a classified error and nothing is stored.
///
/// Expected: Err(AiErr(Timeout)), no rows
#[tokio::test]
async fn upstream_timeout_persists_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, store, _) = factory::helpers::create_menu_with_dependencies(db).await?;
    let generator = FakeGenerator::timing_out();

    let result = AiSuggestionService::new(db, &generator)
        .create(Some(&principal(&owner)), store.id, "Anything?".to_string())
        .await;

    assert!(matches!(result, Err(AppError::AiErr(AiError::Timeout))));
    assert_eq!(entity::prelude::AiSuggestion::find().count(db).await?, 0);

    Ok(())
}

/// Tests that access and store checks run before the upstream is called.
///
/// Expected: Customer InsufficientRole, tombstoned store NotFound, generator never called
#[tokio::test]
async fn rejects_before_calling_upstream() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, Role::Owner).await?;
    let closed = factory::store::StoreFactory::new(db, owner.id)
        .deleted()
        .build()
        .await?;
    let customer = principal_with_role(db, Role::Customer).await?;
    let generator = FakeGenerator::replying("unused");
    let service = AiSuggestionService::new(db, &generator);

    assert!(matches!(
        service
            .create(Some(&customer), closed.id, "Hi".to_string())
            .await,
        Err(AppError::AuthErr(AuthError::Forbidden(
            DenyReason::InsufficientRole
        )))
    ));
    assert!(matches!(
        service
            .create(Some(&principal(&owner)), closed.id, "Hi".to_string())
            .await,
        Err(AppError::LifecycleErr(LifecycleError::NotFound { .. }))
    ));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

    Ok(())
}

/// Tests MASTER-only reads, keyword search and deletion.
///
/// Expected: Owner denied, keyword filter matches one, repeated delete AlreadyDeleted
#[tokio::test]
async fn master_searches_and_deletes_suggestions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_delivery_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, store, _) = factory::helpers::create_menu_with_dependencies(db).await?;
    let master = principal_with_role(db, Role::Master).await?;
    let generator = FakeGenerator::replying("Add dumplings");
    let service = AiSuggestionService::new(db, &generator);

    let dessert = service
        .create(Some(&master), store.id, "Dessert ideas?".to_string())
        .await?;
    service
        .create(Some(&master), store.id, "Drink ideas?".to_string())
        .await?;

    assert!(matches!(
        service.get(Some(&principal(&owner)), dessert.id).await,
        Err(AppError::AuthErr(AuthError::Forbidden(
            DenyReason::InsufficientRole
        )))
    ));

    let found = service
        .search(
            Some(&master),
            AiSuggestionFilter {
                store_id: Some(store.id),
                keyword: Some("Dessert".to_string()),
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, dessert.id);

    service.delete(Some(&master), dessert.id).await?;
    assert!(matches!(
        service.delete(Some(&master), dessert.id).await,
        Err(AppError::LifecycleErr(LifecycleError::AlreadyDeleted { .. }))
    ));

    let remaining = service
        .search(Some(&master), AiSuggestionFilter::default(), PageRequest::default())
        .await?;
    assert_eq!(remaining.total, 1);

    Ok(())
}
