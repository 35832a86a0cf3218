use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub date: DateTime<Utc>,
}

/// Every stored column except the id. Used both for inserts and for full
/// replacement of an existing row.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub date: DateTime<Utc>,
}

impl NewRecipe {
    pub fn into_recipe(self, id: i64) -> Recipe {
        Recipe {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            ingredients: self.ingredients,
            directions: self.directions,
            date: self.date,
        }
    }
}
