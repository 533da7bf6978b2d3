use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiSuggestionDto {
    pub id: i32,
    pub store_id: i32,
    pub request_text: String,
    pub response_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAiSuggestionDto {
    pub store_id: i32,
    pub request_text: String,
}
