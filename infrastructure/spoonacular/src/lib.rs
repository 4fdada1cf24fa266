pub mod client;
pub mod query;
pub mod recipe_source;
pub mod schema;
