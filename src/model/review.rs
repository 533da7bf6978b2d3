use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::PaginatedDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub order_id: Option<i32>,
    pub contents: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewDto {
    pub store_id: i32,
    #[serde(default)]
    pub order_id: Option<i32>,
    pub contents: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewDto {
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreReviewsDto {
    /// Average score rounded to one decimal place, 0.0 without reviews.
    pub average_rating: f64,
    pub reviews: PaginatedDto<ReviewDto>,
}
