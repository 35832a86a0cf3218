use crate::api::{ApiError, ErrorResponse};
use crate::types::RecipeRequest;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: i64,
}

#[utoipa::path(
    post,
    path = "/api/recipe/new",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<CreateRecipeResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let recipe = request.into_new_recipe(state.clock.now());
    let id = state.store.insert(recipe).await?;

    tracing::info!(recipe_id = id, "Created recipe");
    Ok(Json(CreateRecipeResponse { id }))
}
