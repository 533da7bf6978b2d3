use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection};

use crate::server::{
    data::{
        lifecycle, order::OrderRepository, review::ReviewRepository, store::StoreRepository,
    },
    error::{lifecycle::LifecycleError, AppError},
    model::{
        pagination::{Page, PageRequest},
        review::{round_rating, CreateReviewParams, Review, StoreReviews, UpdateReviewParams},
    },
    policy::{self, Operation, Principal},
};

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 5.0;

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes a review for a live store. CUSTOMER only.
    ///
    /// When an order id is supplied it must be one of the caller's own live orders.
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        params: CreateReviewParams,
    ) -> Result<Review, AppError> {
        let principal = Operation::CreateReview.require(caller, None)?;
        validate_score(params.score)?;

        StoreRepository::new(self.db)
            .find_live_by_id(params.store_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id: params.store_id,
            })?;

        if let Some(order_id) = params.order_id {
            let order = OrderRepository::new(self.db)
                .find_live_by_id(order_id)
                .await?
                .ok_or(LifecycleError::NotFound {
                    resource: "Order",
                    id: order_id,
                })?;
            if order.user_id != principal.id {
                return Err(AppError::BadRequest(
                    "Reviews may only reference your own orders".to_string(),
                ));
            }
        }

        let review = ReviewRepository::new(self.db)
            .create(principal.id, params, Utc::now(), &principal.username)
            .await?;

        Ok(Review::from_entity(review))
    }

    /// Lists a live store's reviews with its average rating. Public.
    pub async fn get_by_store(
        &self,
        store_id: i32,
        request: PageRequest,
    ) -> Result<StoreReviews, AppError> {
        StoreRepository::new(self.db)
            .find_live_by_id(store_id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Store",
                id: store_id,
            })?;

        let repo = ReviewRepository::new(self.db);
        let (reviews, total) = repo.get_by_store(store_id, &request).await?;
        let average = repo.average_score(store_id).await?;

        Ok(StoreReviews {
            average_rating: round_rating(average),
            reviews: Page::new(reviews, total, &request).map(Review::from_entity),
        })
    }

    /// Edits a live review. Only the CUSTOMER who wrote it.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        params: UpdateReviewParams,
    ) -> Result<Review, AppError> {
        policy::authenticate(caller)?;
        let repo = ReviewRepository::new(self.db);
        let review = repo.find_live_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Review",
            id,
        })?;
        let principal = Operation::UpdateReview.require(caller, Some(review.user_id))?;
        if let Some(score) = params.score {
            validate_score(score)?;
        }

        let active = lifecycle::mutate(
            review,
            Utc::now(),
            &principal.username,
            |active: &mut entity::review::ActiveModel| {
                if let Some(contents) = params.contents {
                    active.contents = ActiveValue::Set(contents);
                }
                if let Some(score) = params.score {
                    active.score = ActiveValue::Set(score);
                }
            },
        )?;

        Ok(Review::from_entity(repo.update(active).await?))
    }

    /// Soft-deletes a review. The CUSTOMER who wrote it or MASTER.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        policy::authenticate(caller)?;
        let repo = ReviewRepository::new(self.db);
        let review = repo.find_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Review",
            id,
        })?;
        let principal = Operation::DeleteReview.require(caller, Some(review.user_id))?;

        let active: entity::review::ActiveModel =
            lifecycle::delete(review, Utc::now(), &principal.username)?;
        repo.update(active).await?;

        Ok(())
    }
}

fn validate_score(score: f64) -> Result<(), AppError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::BadRequest(format!(
            "Score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )));
    }
    Ok(())
}
