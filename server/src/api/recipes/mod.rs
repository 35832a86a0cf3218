pub mod create;
pub mod delete;
pub mod get;
pub mod search;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipe endpoints (mounted at /api/recipe)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(create::create_recipe))
        .route("/search", get(search::search_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        search::search_recipes,
    ),
    components(schemas(
        crate::types::RecipeRequest,
        crate::types::RecipeResponse,
        create::CreateRecipeResponse,
    ))
)]
pub struct ApiDoc;
