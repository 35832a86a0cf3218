use crate::api::{ApiError, ErrorResponse};
use crate::types::RecipeResponse;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Exact category, compared case-insensitively
    pub category: Option<String>,
    /// Substring of the recipe name, compared case-insensitively
    pub name: Option<String>,
}

/// Which filter a search runs. Exactly one parameter must be given.
#[derive(Debug, PartialEq, Eq)]
enum SearchFilter {
    Category(String),
    Name(String),
}

impl TryFrom<SearchParams> for SearchFilter {
    type Error = ApiError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        match (params.category, params.name) {
            (Some(category), None) => Ok(SearchFilter::Category(category)),
            (None, Some(name)) => Ok(SearchFilter::Name(name)),
            (Some(_), Some(_)) => Err(ApiError::Validation(
                "Specify either category or name, not both".to_string(),
            )),
            (None, None) => Err(ApiError::Validation(
                "Specify either category or name".to_string(),
            )),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipe/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes, newest first", body = Vec<RecipeResponse>),
        (status = 400, description = "Neither or both parameters given, or a parameter repeated", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let Query(params) = params?;
    let recipes = match SearchFilter::try_from(params)? {
        SearchFilter::Category(category) => state.store.find_by_category(&category).await?,
        SearchFilter::Name(name) => state.store.find_by_name_containing(&name).await?,
    };

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(category: Option<&str>, name: Option<&str>) -> SearchParams {
        SearchParams {
            category: category.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_category_only() {
        let filter = SearchFilter::try_from(params(Some("beverage"), None)).unwrap();
        assert_eq!(filter, SearchFilter::Category("beverage".to_string()));
    }

    #[test]
    fn test_name_only() {
        let filter = SearchFilter::try_from(params(None, Some("tea"))).unwrap();
        assert_eq!(filter, SearchFilter::Name("tea".to_string()));
    }

    #[test]
    fn test_empty_name_is_still_present() {
        let filter = SearchFilter::try_from(params(None, Some(""))).unwrap();
        assert_eq!(filter, SearchFilter::Name(String::new()));
    }

    #[test]
    fn test_both_or_neither_rejected() {
        assert!(matches!(
            SearchFilter::try_from(params(Some("beverage"), Some("tea"))),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            SearchFilter::try_from(params(None, None)),
            Err(ApiError::Validation(_))
        ));
    }
}
