use crate::api::ApiError;
use crate::models::{NewRecipe, Recipe};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recipe fields as submitted by clients on create and update.
/// Missing fields deserialize as empty and are rejected by [`RecipeRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
}

impl RecipeRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("Name", &self.name)?;
        require_text("Category", &self.category)?;
        require_text("Description", &self.description)?;
        require_list("Ingredients", &self.ingredients)?;
        require_list("Directions", &self.directions)?;
        Ok(())
    }

    /// Stamp the request with `date`. Callers validate first.
    pub fn into_new_recipe(self, date: DateTime<Utc>) -> NewRecipe {
        NewRecipe {
            name: self.name,
            category: self.category,
            description: self.description,
            ingredients: self.ingredients,
            directions: self.directions,
            date,
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn require_list(field: &str, values: &[String]) -> Result<(), ApiError> {
    if values.is_empty() {
        return Err(ApiError::Validation(format!("{} cannot be empty", field)));
    }
    if values.iter().any(String::is_empty) {
        return Err(ApiError::Validation(format!(
            "{} cannot contain empty entries",
            field
        )));
    }
    Ok(())
}

/// Recipe as returned to clients. The id is not echoed back.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    /// Time of the last create or update
    pub date: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            name: recipe.name,
            category: recipe.category,
            description: recipe.description,
            ingredients: recipe.ingredients,
            directions: recipe.directions,
            date: recipe.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tea() -> RecipeRequest {
        RecipeRequest {
            name: "Tea".to_string(),
            category: "beverage".to_string(),
            description: "Hot drink".to_string(),
            ingredients: vec!["water".to_string(), "tea leaves".to_string()],
            directions: vec!["boil".to_string(), "steep".to_string()],
        }
    }

    fn error_message(request: &RecipeRequest) -> String {
        match request.validate() {
            Err(ApiError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(tea().validate().is_ok());
    }

    #[test]
    fn test_empty_text_fields() {
        let mut request = tea();
        request.name = String::new();
        assert_eq!(error_message(&request), "Name cannot be empty");

        let mut request = tea();
        request.category = String::new();
        assert_eq!(error_message(&request), "Category cannot be empty");

        let mut request = tea();
        request.description = String::new();
        assert_eq!(error_message(&request), "Description cannot be empty");
    }

    #[test]
    fn test_whitespace_only_values_are_not_empty() {
        let mut request = tea();
        request.name = " ".to_string();
        request.category = "   ".to_string();
        request.description = "\t".to_string();
        request.ingredients.push(" ".to_string());
        request.directions = vec!["\n".to_string()];
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_lists() {
        let mut request = tea();
        request.ingredients.clear();
        assert_eq!(error_message(&request), "Ingredients cannot be empty");

        let mut request = tea();
        request.directions.clear();
        assert_eq!(error_message(&request), "Directions cannot be empty");
    }

    #[test]
    fn test_empty_list_entries() {
        let mut request = tea();
        request.ingredients.push(String::new());
        assert_eq!(
            error_message(&request),
            "Ingredients cannot contain empty entries"
        );

        let mut request = tea();
        request.directions.insert(0, String::new());
        assert_eq!(
            error_message(&request),
            "Directions cannot contain empty entries"
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let request: RecipeRequest = serde_json::from_str(r#"{"name": "Tea"}"#).unwrap();
        assert_eq!(request.name, "Tea");
        assert!(request.category.is_empty());
        assert!(request.ingredients.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_omits_id() {
        let date = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let recipe = tea().into_new_recipe(date).into_recipe(7);
        let json = serde_json::to_value(RecipeResponse::from(recipe)).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Tea");
        assert_eq!(json["ingredients"][1], "tea leaves");
        assert_eq!(json["date"], "2024-02-03T04:05:06Z");
    }
}
