use super::{query_span, RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;
use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;

diesel::define_sql_function!(fn lower(x: Text) -> Text);

type RecipeQuery = recipes::BoxedQuery<'static, Pg>;

/// PostgreSQL-backed store. Diesel is synchronous, so every query runs on
/// the blocking thread pool with its own pooled connection.
#[derive(Debug, Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, operation: &'static str, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
    {
        let span = query_span(operation);
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let mut conn = pool.get()?;
            query(&mut *conn).map_err(StoreError::from)
        })
        .await?
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<i64, StoreError> {
        self.run("insert", move |conn| {
            diesel::insert_into(recipes::table)
                .values(&recipe)
                .returning(recipes::id)
                .get_result(conn)
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, StoreError> {
        self.run("find_by_id", move |conn| {
            recipes::table
                .find(id)
                .select(Recipe::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.run("exists_by_id", move |conn| {
            diesel::select(diesel::dsl::exists(recipes::table.find(id))).get_result(conn)
        })
        .await
    }

    async fn update(&self, id: i64, recipe: NewRecipe) -> Result<bool, StoreError> {
        self.run("update", move |conn| {
            diesel::update(recipes::table.find(id))
                .set(&recipe)
                .execute(conn)
                .map(|rows| rows > 0)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.run("delete_by_id", move |conn| {
            diesel::delete(recipes::table.find(id))
                .execute(conn)
                .map(|rows| rows > 0)
        })
        .await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError> {
        let query = by_category(category);
        self.run("find_by_category", move |conn| {
            query.select(Recipe::as_select()).load(conn)
        })
        .await
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError> {
        let query = by_name_containing(fragment);
        self.run("find_by_name_containing", move |conn| {
            query.select(Recipe::as_select()).load(conn)
        })
        .await
    }
}

/// Recipes whose category equals `category` ignoring case, newest first.
fn by_category(category: &str) -> RecipeQuery {
    recipes::table
        .filter(lower(recipes::category).eq(lower(category.to_string())))
        .order((recipes::date.desc(), recipes::id.desc()))
        .into_boxed()
}

fn by_name_containing(fragment: &str) -> RecipeQuery {
    recipes::table
        .filter(recipes::name.ilike(contains_pattern(fragment)))
        .order((recipes::date.desc(), recipes::id.desc()))
        .into_boxed()
}

/// ILIKE pattern matching `fragment` anywhere, with LIKE metacharacters
/// escaped so they match literally.
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
