//! mealmatch finds recipes you can cook with the ingredients you already
//! have. It searches TheMealDB by a primary ingredient, fetches each
//! candidate recipe, matches its ingredient list against yours (minus
//! common kitchen staples), and ranks the results by fewest missing
//! ingredients.

pub mod client;
pub mod config;
pub mod error;
pub mod interactive;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod presenter;

pub use client::MealDbClient;
pub use config::AppConfig;
pub use error::FinderError;
pub use matcher::{MatchResult, Matcher, UserIngredients, STAPLES};
pub use model::{IngredientLine, RecipeDetail, RecipeSummary};
pub use pipeline::{RankedRecipe, RecipeFinder};
