use crate::api::{ApiError, ErrorResponse};
use crate::types::RecipeRequest;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

/// Replaces all fields of a recipe. Nothing is merged with the stored
/// version; the timestamp is reset to now.
#[utoipa::path(
    put,
    path = "/api/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 204, description = "Recipe updated successfully"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    request.validate()?;

    let recipe = request.into_new_recipe(state.clock.now());
    if !state.store.update(id, recipe).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(recipe_id = id, "Updated recipe");
    Ok(StatusCode::NO_CONTENT)
}
