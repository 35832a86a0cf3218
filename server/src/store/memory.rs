use super::{newest_first, query_span, RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    recipes: BTreeMap<i64, Recipe>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }

    fn matching(&self, predicate: impl Fn(&Recipe) -> bool) -> Result<Vec<Recipe>, StoreError> {
        let mut found: Vec<Recipe> = self
            .read()?
            .recipes
            .values()
            .filter(|recipe| predicate(recipe))
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<i64, StoreError> {
        query_span("insert").in_scope(|| {
            let mut state = self.write()?;
            state.last_id += 1;
            let id = state.last_id;
            state.recipes.insert(id, recipe.into_recipe(id));
            Ok(id)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, StoreError> {
        query_span("find_by_id").in_scope(|| Ok(self.read()?.recipes.get(&id).cloned()))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        query_span("exists_by_id").in_scope(|| Ok(self.read()?.recipes.contains_key(&id)))
    }

    async fn update(&self, id: i64, recipe: NewRecipe) -> Result<bool, StoreError> {
        query_span("update").in_scope(|| {
            let mut state = self.write()?;
            match state.recipes.get_mut(&id) {
                Some(existing) => {
                    *existing = recipe.into_recipe(id);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        query_span("delete_by_id").in_scope(|| Ok(self.write()?.recipes.remove(&id).is_some()))
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError> {
        let wanted = category.to_lowercase();
        query_span("find_by_category")
            .in_scope(|| self.matching(|recipe| recipe.category.to_lowercase() == wanted))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError> {
        let wanted = fragment.to_lowercase();
        query_span("find_by_name_containing")
            .in_scope(|| self.matching(|recipe| recipe.name.to_lowercase().contains(&wanted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn new_recipe(name: &str, category: &str, minutes: i64) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} description", name),
            ingredients: vec!["water".to_string()],
            directions: vec!["boil".to_string()],
            date: base_time() + Duration::minutes(minutes),
        }
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryRecipeStore::new();
        let first = store.insert(new_recipe("Tea", "beverage", 0)).await.unwrap();
        let second = store.insert(new_recipe("Coffee", "beverage", 1)).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        let found = store.find_by_id(second).await.unwrap().unwrap();
        assert_eq!(found.id, second);
        assert_eq!(found.name, "Coffee");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryRecipeStore::new();
        let first = store.insert(new_recipe("Tea", "beverage", 0)).await.unwrap();
        assert!(store.delete_by_id(first).await.unwrap());

        let second = store.insert(new_recipe("Tea", "beverage", 0)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = InMemoryRecipeStore::new();

        assert!(store.find_by_id(42).await.unwrap().is_none());
        assert!(!store.exists_by_id(42).await.unwrap());
        assert!(!store.delete_by_id(42).await.unwrap());
        assert!(!store
            .update(42, new_recipe("Tea", "beverage", 0))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let store = InMemoryRecipeStore::new();
        let id = store.insert(new_recipe("Tea", "beverage", 0)).await.unwrap();

        let replacement = NewRecipe {
            name: "Green tea".to_string(),
            category: "drinks".to_string(),
            description: "Lighter".to_string(),
            ingredients: vec!["water".to_string(), "sencha".to_string()],
            directions: vec!["heat to 80C".to_string(), "steep".to_string()],
            date: base_time() + Duration::hours(1),
        };
        assert!(store.update(id, replacement.clone()).await.unwrap());

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, replacement.into_recipe(id));
    }

    #[tokio::test]
    async fn test_find_by_category_is_exact_and_case_insensitive() {
        let store = InMemoryRecipeStore::new();
        store.insert(new_recipe("Tea", "Beverage", 0)).await.unwrap();
        store.insert(new_recipe("Soup", "starter", 1)).await.unwrap();
        store.insert(new_recipe("Coffee", "beverage", 2)).await.unwrap();
        store.insert(new_recipe("Milkshake", "beverages", 3)).await.unwrap();

        let found = store.find_by_category("BEVERAGE").await.unwrap();
        assert_eq!(names(&found), vec!["Coffee", "Tea"]);
    }

    #[tokio::test]
    async fn test_find_by_name_containing_orders_newest_first() {
        let store = InMemoryRecipeStore::new();
        store.insert(new_recipe("Iced Tea", "beverage", 5)).await.unwrap();
        store.insert(new_recipe("Teacake", "dessert", 10)).await.unwrap();
        store.insert(new_recipe("Coffee", "beverage", 20)).await.unwrap();
        store.insert(new_recipe("Mint tea", "beverage", 1)).await.unwrap();

        let found = store.find_by_name_containing("TEA").await.unwrap();
        assert_eq!(names(&found), vec!["Teacake", "Iced Tea", "Mint tea"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_fall_back_to_id() {
        let store = InMemoryRecipeStore::new();
        store.insert(new_recipe("Tea", "beverage", 0)).await.unwrap();
        store.insert(new_recipe("Chai", "beverage", 0)).await.unwrap();

        let found = store.find_by_category("beverage").await.unwrap();
        assert_eq!(names(&found), vec!["Chai", "Tea"]);
    }
}
