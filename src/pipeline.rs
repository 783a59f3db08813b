//! The search-analyze-rank pipeline.
//!
//! One sequential pass: search by the primary ingredient, fetch each
//! candidate's detail record one at a time, bucket its ingredients, then
//! sort by (fewest missing, most matched).

use crate::client::MealDbClient;
use crate::config::AppConfig;
use crate::error::FinderError;
use crate::matcher::{has_real_instructions, Matcher, MatchResult, UserIngredients};
use crate::model::RecipeDetail;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

/// A recipe detail paired with its match analysis, ready for display
#[derive(Debug, Clone)]
pub struct RankedRecipe {
    pub detail: RecipeDetail,
    pub result: MatchResult,
}

/// Runs search sessions against one API client with fixed options
#[derive(Debug)]
pub struct RecipeFinder {
    client: MealDbClient,
    staple_exclusion: bool,
    quality_gate: bool,
    show_progress: bool,
}

impl RecipeFinder {
    pub fn new(client: MealDbClient, config: &AppConfig) -> Self {
        Self {
            client,
            staple_exclusion: config.staple_exclusion,
            quality_gate: config.quality_gate,
            show_progress: true,
        }
    }

    /// Disables the progress bar, used when output is captured
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Searches by the primary ingredient and ranks every candidate
    /// against the user's full ingredient set.
    ///
    /// A failed search propagates as an error for the caller to report.
    /// A failed detail lookup only skips that one recipe: the pass is
    /// sequential and a single dead record should not sink the session.
    pub fn search_and_rank(
        &self,
        primary_ingredient: &str,
        ingredients: &UserIngredients,
    ) -> Result<Vec<RankedRecipe>, FinderError> {
        let summaries = self.client.search_by_ingredient(primary_ingredient)?;
        if summaries.is_empty() {
            return Ok(Vec::new());
        }

        let matcher = Matcher::new(ingredients, self.staple_exclusion);

        let progress = if self.show_progress {
            let bar = ProgressBar::new(summaries.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("Checking recipe {pos}/{len}: {msg}")
                    .expect("static template is valid"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut ranked = Vec::new();
        for summary in &summaries {
            progress.set_message(truncate(&summary.name, 30));
            progress.inc(1);

            let detail = match self.client.lookup_by_id(&summary.id) {
                Ok(Some(detail)) => detail,
                Ok(None) => continue,
                Err(err) => {
                    warn!("skipping recipe {} ({}): {err}", summary.id, summary.name);
                    continue;
                }
            };

            if self.quality_gate && !has_real_instructions(&detail) {
                continue;
            }

            let result = matcher.analyze(&detail);
            ranked.push(RankedRecipe { detail, result });
        }
        progress.finish_and_clear();

        ranked.sort_by_key(|r| r.result.ranking_key());
        Ok(ranked)
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
