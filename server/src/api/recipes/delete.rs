use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/api/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted successfully"),
        (status = 400, description = "Invalid recipe id", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    if !state.store.exists_by_id(id).await? {
        return Err(ApiError::NotFound);
    }

    // Another request may have deleted it in between
    if !state.store.delete_by_id(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(recipe_id = id, "Deleted recipe");
    Ok(StatusCode::NO_CONTENT)
}
