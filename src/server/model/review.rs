use chrono::{DateTime, Utc};

use crate::model::review::{CreateReviewDto, ReviewDto, UpdateReviewDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub order_id: Option<i32>,
    pub contents: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            store_id: entity.store_id,
            order_id: entity.order_id,
            contents: entity.contents,
            score: entity.score,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            user_id: self.user_id,
            store_id: self.store_id,
            order_id: self.order_id,
            contents: self.contents,
            score: self.score,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParams {
    pub store_id: i32,
    pub order_id: Option<i32>,
    pub contents: String,
    pub score: f64,
}

impl CreateReviewParams {
    pub fn from_dto(dto: CreateReviewDto) -> Self {
        Self {
            store_id: dto.store_id,
            order_id: dto.order_id,
            contents: dto.contents,
            score: dto.score,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewParams {
    pub contents: Option<String>,
    pub score: Option<f64>,
}

impl UpdateReviewParams {
    pub fn from_dto(dto: UpdateReviewDto) -> Self {
        Self {
            contents: dto.contents,
            score: dto.score,
        }
    }
}

/// Reviews of one store plus its average score.
#[derive(Debug, Clone)]
pub struct StoreReviews {
    pub average_rating: f64,
    pub reviews: super::pagination::Page<Review>,
}

/// Rounds an average score to one decimal place; no reviews rate 0.0.
pub fn round_rating(average: Option<f64>) -> f64 {
    average.map(|avg| (avg * 10.0).round() / 10.0).unwrap_or(0.0)
}
