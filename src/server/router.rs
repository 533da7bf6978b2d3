use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::api::ErrorDto,
    server::{
        controller::{
            ai_suggestion, auth, category, delivery_address, menu, order, review, store, user,
        },
        middleware::rate_limit::RateLimiterLayer,
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::logout,
        auth::me,
        user::search_users,
        user::get_user,
        user::update_user,
        user::delete_user,
        category::create_category,
        category::get_categories,
        category::update_category,
        category::delete_category,
        store::create_store,
        store::get_stores,
        store::search_stores,
        store::get_store,
        store::update_store,
        store::delete_store,
        menu::create_menu,
        menu::get_store_menus,
        menu::get_menu,
        menu::update_menu,
        menu::delete_menu,
        order::create_order,
        order::get_orders,
        order::get_order,
        order::update_order,
        order::delete_order,
        review::create_review,
        review::get_store_reviews,
        review::update_review,
        review::delete_review,
        delivery_address::create_delivery_address,
        delivery_address::get_delivery_addresses,
        delivery_address::get_delivery_address,
        delivery_address::update_delivery_address,
        delivery_address::delete_delivery_address,
        ai_suggestion::create_ai_suggestion,
        ai_suggestion::get_ai_suggestions,
        ai_suggestion::get_ai_suggestion,
        ai_suggestion::delete_ai_suggestion,
    ),
    components(schemas(ErrorDto)),
    tags(
        (name = "auth", description = "Signup and session handling"),
        (name = "user", description = "User accounts"),
        (name = "category", description = "Store categories"),
        (name = "store", description = "Stores"),
        (name = "menu", description = "Store menus"),
        (name = "order", description = "Orders, line items and payments"),
        (name = "review", description = "Store reviews"),
        (name = "delivery_address", description = "Saved delivery addresses"),
        (name = "ai_suggestion", description = "AI menu suggestions"),
    )
)]
pub struct ApiDoc;

/// Builds the API router.
///
/// The OpenAPI document is served at `/api-docs/openapi.json` with a Swagger UI at
/// `/swagger-ui`.
///
/// # Arguments
/// - `ai_rate_limiter` - Per-client limiter applied to AI suggestion creation only
pub fn router(ai_rate_limiter: RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/users", get(user::search_users))
        .route(
            "/api/users/{user_id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/categories",
            get(category::get_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{category_id}",
            patch(category::update_category).delete(category::delete_category),
        )
        .route(
            "/api/stores",
            get(store::get_stores).post(store::create_store),
        )
        .route("/api/stores/search", get(store::search_stores))
        .route(
            "/api/stores/{store_id}",
            get(store::get_store)
                .patch(store::update_store)
                .delete(store::delete_store),
        )
        .route(
            "/api/stores/{store_id}/menus",
            get(menu::get_store_menus).post(menu::create_menu),
        )
        .route(
            "/api/stores/{store_id}/reviews",
            get(review::get_store_reviews),
        )
        .route(
            "/api/menus/{menu_id}",
            get(menu::get_menu)
                .patch(menu::update_menu)
                .delete(menu::delete_menu),
        )
        .route(
            "/api/orders",
            get(order::get_orders).post(order::create_order),
        )
        .route(
            "/api/orders/{order_id}",
            get(order::get_order)
                .patch(order::update_order)
                .delete(order::delete_order),
        )
        .route("/api/reviews", post(review::create_review))
        .route(
            "/api/reviews/{review_id}",
            patch(review::update_review).delete(review::delete_review),
        )
        .route(
            "/api/delivery-addresses",
            get(delivery_address::get_delivery_addresses)
                .post(delivery_address::create_delivery_address),
        )
        .route(
            "/api/delivery-addresses/{address_id}",
            get(delivery_address::get_delivery_address)
                .patch(delivery_address::update_delivery_address)
                .delete(delivery_address::delete_delivery_address),
        )
        .route(
            "/api/ai-suggestions",
            post(ai_suggestion::create_ai_suggestion)
                .route_layer(ai_rate_limiter)
                .get(ai_suggestion::get_ai_suggestions),
        )
        .route(
            "/api/ai-suggestions/{suggestion_id}",
            get(ai_suggestion::get_ai_suggestion).delete(ai_suggestion::delete_ai_suggestion),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/signup",
            "/api/users/{user_id}",
            "/api/categories",
            "/api/stores/search",
            "/api/stores/{store_id}/menus",
            "/api/orders/{order_id}",
            "/api/stores/{store_id}/reviews",
            "/api/delivery-addresses",
            "/api/ai-suggestions",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    /// Sessions for existing users come from the external authenticator, so no route opens one
    /// from a bare username.
    #[test]
    fn openapi_has_no_username_login() {
        let doc = ApiDoc::openapi();

        assert!(!doc.paths.paths.contains_key("/api/auth/login"));
        assert!(doc.paths.paths.contains_key("/api/auth/logout"));
        assert!(doc.paths.paths.contains_key("/api/auth/me"));
    }
}
