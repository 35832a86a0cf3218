//! Recipe persistence.
//!
//! Handlers only talk to the [`RecipeStore`] trait. The PostgreSQL store is
//! used in production; the in-memory store backs tests and the
//! `RECIPE_STORE=memory` mode.

mod memory;
mod postgres;

pub use memory::InMemoryRecipeStore;
pub use postgres::PgRecipeStore;

use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tracing::Span;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Store lock poisoned")]
    Poisoned,
}

#[async_trait]
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Persist a new recipe and return the id assigned to it.
    async fn insert(&self, recipe: NewRecipe) -> Result<i64, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Replace every column of an existing recipe. Returns `false` when no
    /// recipe has this id.
    async fn update(&self, id: i64, recipe: NewRecipe) -> Result<bool, StoreError>;

    /// Returns `false` when no recipe has this id.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Recipes whose category equals `category` ignoring case, newest first.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes whose name contains `fragment` ignoring case, newest first.
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError>;
}

/// Span opened around every store call. `telemetry::DbQueryCountingLayer`
/// counts these per request.
fn query_span(operation: &'static str) -> Span {
    tracing::info_span!("db.query", operation)
}

/// Newest first; the id breaks ties so equal timestamps still sort stably.
fn newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}
