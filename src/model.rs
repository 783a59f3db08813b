use serde::Deserialize;
use std::collections::HashMap;

/// Number of positional ingredient/measure slots in a meal record
pub const INGREDIENT_SLOTS: usize = 20;

/// Minimal record returned by the search-by-ingredient call
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
}

/// One ingredient line of a recipe, paired with its measure text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

/// Full record returned by the lookup-by-id call.
///
/// TheMealDB spreads ingredients over twenty positional `strIngredientN` /
/// `strMeasureN` fields; those land in the flattened `slots` map and are
/// reassembled by [`RecipeDetail::ingredients`].
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDetail {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub cuisine: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(flatten)]
    slots: HashMap<String, Option<String>>,
}

impl RecipeDetail {
    /// Reassembles the positional ingredient slots in order.
    ///
    /// Scanning stops at the first empty slot; the API guarantees no gaps
    /// before the end of the list. Missing measures become empty strings.
    pub fn ingredients(&self) -> Vec<IngredientLine> {
        let mut lines = Vec::new();
        for i in 1..=INGREDIENT_SLOTS {
            let name = self.slot(&format!("strIngredient{i}"));
            match name {
                Some(name) => lines.push(IngredientLine {
                    name,
                    measure: self.slot(&format!("strMeasure{i}")).unwrap_or_default(),
                }),
                None => break,
            }
        }
        lines
    }

    fn slot(&self, key: &str) -> Option<String> {
        self.slots
            .get(key)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}
