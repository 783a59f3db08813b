//! Text rendering for ranked lists and recipe detail views

use crate::model::RecipeDetail;
use crate::pipeline::RankedRecipe;
use std::fmt::Write;

/// Column width for wrapped instruction text
pub const WRAP_WIDTH: usize = 70;

/// Renders the enumerated ranked list with a match/missing summary per entry
pub fn render_ranked_list(recipes: &[RankedRecipe], total_user_ingredients: usize) -> String {
    let mut out = String::new();
    for (i, recipe) in recipes.iter().enumerate() {
        let result = &recipe.result;
        let _ = write!(
            out,
            "  {}. {} ({}/{} of your ingredients used",
            i + 1,
            recipe.detail.name,
            result.match_count(),
            total_user_ingredients,
        );
        if result.missing_count() > 0 {
            let _ = write!(out, "; missing: {}", result.missing_ingredients.join(", "));
        }
        out.push_str(")\n");
    }
    out
}

/// Renders a formatted, complete view of a single recipe
pub fn render_detail(recipe: &RecipeDetail) -> String {
    let rule = "=".repeat(WRAP_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Recipe: {}", recipe.name);
    let _ = writeln!(out, "Category: {}", recipe.category.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "Cuisine: {}", recipe.cuisine.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "{rule}");

    out.push_str("\nIngredients:\n");
    for line in recipe.ingredients() {
        if line.measure.is_empty() {
            let _ = writeln!(out, "  - {}", line.name);
        } else {
            let _ = writeln!(out, "  - {} {}", line.measure, line.name);
        }
    }

    out.push_str("\nInstructions:\n");
    let steps: Vec<&str> = recipe
        .instructions
        .as_deref()
        .unwrap_or("")
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if steps.is_empty() {
        out.push_str("  No instructions available.\n");
    } else {
        for (i, step) in steps.iter().enumerate() {
            let _ = writeln!(out, "\n--- Step {} ---", i + 1);
            for line in wrap(step, WRAP_WIDTH) {
                let _ = writeln!(out, "  {line}");
            }
        }
        out.push_str("\n\n--- Recipe complete! Enjoy your meal! ---\n");
    }
    let _ = writeln!(out, "\n{rule}");
    out
}

/// Greedy word wrap; a word longer than `width` gets a line of its own
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
