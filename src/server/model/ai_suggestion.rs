use chrono::{DateTime, Utc};

use crate::model::ai_suggestion::AiSuggestionDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSuggestion {
    pub id: i32,
    pub store_id: i32,
    pub request_text: String,
    pub response_text: String,
    pub created_at: DateTime<Utc>,
}

impl AiSuggestion {
    pub fn from_entity(entity: entity::ai_suggestion::Model) -> Self {
        Self {
            id: entity.id,
            store_id: entity.store_id,
            request_text: entity.request_text,
            response_text: entity.response_text,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AiSuggestionDto {
        AiSuggestionDto {
            id: self.id,
            store_id: self.store_id,
            request_text: self.request_text,
            response_text: self.response_text,
            created_at: self.created_at,
        }
    }
}

/// Filter for listing and searching suggestions.
#[derive(Debug, Clone, Default)]
pub struct AiSuggestionFilter {
    pub store_id: Option<i32>,
    /// Case-sensitive substring of the request text.
    pub keyword: Option<String>,
}
