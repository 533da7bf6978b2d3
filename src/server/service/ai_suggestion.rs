use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    ai::SuggestionGenerator,
    data::{ai_suggestion::AiSuggestionRepository, lifecycle, store::StoreRepository},
    error::{lifecycle::LifecycleError, AppError},
    model::{
        ai_suggestion::{AiSuggestion, AiSuggestionFilter},
        pagination::{Page, PageRequest},
    },
    policy::{Operation, Principal},
};

pub struct AiSuggestionService<'a> {
    db: &'a DatabaseConnection,
    generator: &'a dyn SuggestionGenerator,
}

impl<'a> AiSuggestionService<'a> {
    pub fn new(db: &'a DatabaseConnection, generator: &'a dyn SuggestionGenerator) -> Self {
        Self { db, generator }
    }

    /// Asks the AI upstream for a menu suggestion and stores the exchange. OWNER or MASTER.
    ///
    /// The upstream call happens before any write; nothing is persisted when it fails.
    ///
    /// # Returns
    /// - `Ok(AiSuggestion)` - Stored request and reply
    /// - `Err(AppError::AiErr(_))` - Classified upstream failure
    /// - `Err(AppError::LifecycleErr(NotFound))` - Store missing or tombstoned
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        store_id: i32,
        request_text: String,
    ) -> Result<AiSuggestion, AppError> {
        let principal = Operation::CreateAiSuggestion.require(caller, None)?;

        let request_text = request_text.trim().to_string();
        if request_text.is_empty() {
            return Err(AppError::BadRequest(
                "Request text must not be empty".to_string(),
            ));
        }

        StoreRepository::new(self.db)
            .find_live_by_id(store_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id: store_id,
            })?;

        let response_text = self.generator.generate(&request_text).await?;

        let txn = self.db.begin().await?;

        // Re-check inside the transaction; the store may have gone during the upstream call.
        StoreRepository::new(&txn)
            .find_live_by_id(store_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id: store_id,
            })?;

        let suggestion = AiSuggestionRepository::new(&txn)
            .create(
                store_id,
                request_text,
                response_text,
                Utc::now(),
                &principal.username,
            )
            .await?;

        txn.commit().await?;

        tracing::info!(suggestion_id = suggestion.id, store_id, "AI suggestion stored");

        Ok(AiSuggestion::from_entity(suggestion))
    }

    /// Gets a live suggestion. MASTER only.
    pub async fn get(&self, caller: Option<&Principal>, id: i32) -> Result<AiSuggestion, AppError> {
        Operation::ReadAiSuggestion.require(caller, None)?;

        let suggestion = AiSuggestionRepository::new(self.db)
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "AI suggestion",
                id,
            })?;

        Ok(AiSuggestion::from_entity(suggestion))
    }

    /// Lists or searches live suggestions. MASTER only.
    pub async fn search(
        &self,
        caller: Option<&Principal>,
        filter: AiSuggestionFilter,
        request: PageRequest,
    ) -> Result<Page<AiSuggestion>, AppError> {
        Operation::ReadAiSuggestion.require(caller, None)?;

        let (suggestions, total) = AiSuggestionRepository::new(self.db)
            .search(&filter, &request)
            .await?;

        Ok(Page::new(suggestions, total, &request).map(AiSuggestion::from_entity))
    }

    /// Soft-deletes a suggestion. MASTER only.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        let principal = Operation::DeleteAiSuggestion.require(caller, None)?;

        let repo = AiSuggestionRepository::new(self.db);
        let suggestion = repo.find_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "AI suggestion",
            id,
        })?;

        let active: entity::ai_suggestion::ActiveModel =
            lifecycle::delete(suggestion, Utc::now(), &principal.username)?;
        repo.update(active).await?;

        Ok(())
    }
}
