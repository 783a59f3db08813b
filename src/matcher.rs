//! Ingredient matching and ranking.
//!
//! A recipe ingredient is satisfied by a staple, satisfied by one of the
//! user's ingredients, or missing - exactly one of the three, checked in
//! that order. Matching is whole-word with an optional trailing "s", so
//! "oil" never matches inside "boil" but "chicken" still matches
//! "chicken breast".

use crate::model::RecipeDetail;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Kitchen staples the user is assumed to always have on hand.
/// Recipe ingredients containing one of these as a whole word are never
/// counted as missing.
pub const STAPLES: &[&str] = &[
    "water",
    "salt",
    "pepper",
    "black pepper",
    "oil",
    "olive oil",
    "vegetable oil",
    "sugar",
    "butter",
    "garlic",
    "onion",
    "flour",
    "garlic powder",
    "onion powder",
];

/// Instructions shorter than this are treated as placeholders
pub const MIN_INSTRUCTION_LEN: usize = 25;

/// Known placeholder phrases that mark a record as "not a real recipe"
const PLACEHOLDER_INSTRUCTIONS: &[&str] = &["make and enjoy."];

/// Lowercases and trims a raw ingredient string
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A whole-word matcher for one ingredient token.
///
/// Matches the token anywhere in a phrase as long as it is delimited by
/// word boundaries, tolerating a trailing pluralizing "s" ("onion" matches
/// "red onions" but not "onionskin").
#[derive(Debug, Clone)]
pub struct WholeWordPattern {
    token: String,
    regex: Regex,
}

impl WholeWordPattern {
    pub fn new(token: &str) -> Self {
        let token = normalize(token);
        let regex = Regex::new(&format!(r"\b{}s?\b", regex::escape(&token)))
            .expect("escaped token is a valid pattern");
        Self { token, regex }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the token appears word-boundary-delimited in `phrase`.
    /// `phrase` must already be normalized.
    pub fn matches(&self, phrase: &str) -> bool {
        self.regex.is_match(phrase)
    }
}

/// The user's normalized ingredient set for one search session
#[derive(Debug, Clone, Default)]
pub struct UserIngredients {
    tokens: BTreeSet<String>,
}

impl UserIngredients {
    /// Builds the set from raw tokens; empty and whitespace-only entries
    /// are silently dropped, duplicates collapse after normalization.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    /// Parses a comma-separated list as typed at the prompt
    pub fn parse_list(input: &str) -> Self {
        Self::from_tokens(input.split(','))
    }

    pub fn insert(&mut self, raw: &str) {
        let token = normalize(raw);
        if !token.is_empty() {
            self.tokens.insert(token);
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

/// Outcome of matching one recipe against the user's ingredients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// User tokens that satisfied at least one recipe ingredient
    pub matched_user_ingredients: BTreeSet<String>,
    /// Recipe ingredients satisfied by neither a staple nor a user token,
    /// sorted alphabetically
    pub missing_ingredients: Vec<String>,
}

impl MatchResult {
    pub fn match_count(&self) -> usize {
        self.matched_user_ingredients.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_ingredients.len()
    }

    /// Canonical ranking key: fewest missing first, most matched among ties
    pub fn ranking_key(&self) -> (usize, Reverse<usize>) {
        (self.missing_count(), Reverse(self.match_count()))
    }
}

/// Matches recipes against one user ingredient set.
///
/// Patterns for the staples and the user's tokens are compiled once per
/// session and reused across every recipe of the analysis pass.
#[derive(Debug)]
pub struct Matcher {
    staples: Vec<WholeWordPattern>,
    user: Vec<WholeWordPattern>,
}

impl Matcher {
    /// `use_staples` off disables the staple exclusion entirely, so staples
    /// count as missing unless the user listed them.
    ///
    /// A staple the user listed explicitly is dropped from the staple set,
    /// so the match is credited to the user instead.
    pub fn new(ingredients: &UserIngredients, use_staples: bool) -> Self {
        let staples = if use_staples {
            STAPLES
                .iter()
                .filter(|s| !ingredients.contains(s))
                .map(|s| WholeWordPattern::new(s))
                .collect()
        } else {
            Vec::new()
        };
        let user = ingredients.iter().map(WholeWordPattern::new).collect();
        Self { staples, user }
    }

    /// Buckets every ingredient of `detail` into staple-satisfied,
    /// matched-by-user, or missing. First match wins; staples are checked
    /// before user ingredients.
    pub fn analyze(&self, detail: &RecipeDetail) -> MatchResult {
        let mut result = MatchResult::default();

        for line in detail.ingredients() {
            let phrase = normalize(&line.name);

            if self.staple_satisfies(&phrase) {
                continue;
            }

            match self.user.iter().find(|p| p.matches(&phrase)) {
                Some(pattern) => {
                    result
                        .matched_user_ingredients
                        .insert(pattern.token().to_owned());
                }
                None => result.missing_ingredients.push(phrase),
            }
        }

        result.missing_ingredients.sort();
        result
    }

    fn staple_satisfies(&self, phrase: &str) -> bool {
        self.staples.iter().any(|staple| {
            // "peanut butter" is a real ingredient, not the butter staple
            if staple.token() == "butter" && phrase.contains("peanut") {
                return false;
            }
            staple.matches(phrase)
        })
    }
}

/// Whether a record carries usable cooking instructions.
///
/// Rejects absent or very short instruction text and the known placeholder
/// phrases TheMealDB uses for stub records.
pub fn has_real_instructions(detail: &RecipeDetail) -> bool {
    let Some(instructions) = detail.instructions.as_deref() else {
        return false;
    };
    let trimmed = instructions.trim();
    if trimmed.len() < MIN_INSTRUCTION_LEN {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    !PLACEHOLDER_INSTRUCTIONS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(ingredients: &[&str]) -> RecipeDetail {
        detail_with_instructions(ingredients, "Cook everything together until done, then serve.")
    }

    fn detail_with_instructions(ingredients: &[&str], instructions: &str) -> RecipeDetail {
        let mut record = serde_json::Map::new();
        record.insert("idMeal".into(), "1".into());
        record.insert("strMeal".into(), "Test Meal".into());
        record.insert("strInstructions".into(), instructions.into());
        for (i, name) in ingredients.iter().enumerate() {
            record.insert(format!("strIngredient{}", i + 1), (*name).into());
            record.insert(format!("strMeasure{}", i + 1), "1 unit".into());
        }
        serde_json::from_value(serde_json::Value::Object(record)).unwrap()
    }

    fn user(tokens: &[&str]) -> UserIngredients {
        UserIngredients::from_tokens(tokens.iter().copied())
    }

    #[test]
    fn test_whole_word_matches_inside_phrase() {
        let pattern = WholeWordPattern::new("chicken");
        assert!(pattern.matches("chicken breast"));
        assert!(pattern.matches("boneless chicken"));
        assert!(!pattern.matches("beef stock"));
    }

    #[test]
    fn test_oil_does_not_match_inside_boil() {
        let pattern = WholeWordPattern::new("oil");
        assert!(!pattern.matches("boiled potatoes"));
        assert!(pattern.matches("sesame oil"));
    }

    #[test]
    fn test_ham_does_not_match_inside_shame() {
        let pattern = WholeWordPattern::new("ham");
        assert!(!pattern.matches("shame"));
        assert!(pattern.matches("smoked ham"));
    }

    #[test]
    fn test_trailing_plural_is_tolerated() {
        let pattern = WholeWordPattern::new("onion");
        assert!(pattern.matches("red onions"));
        assert!(!pattern.matches("onionskin paper"));
    }

    #[test]
    fn test_pattern_token_is_normalized() {
        let pattern = WholeWordPattern::new("  Chicken  ");
        assert_eq!(pattern.token(), "chicken");
        assert!(pattern.matches("chicken thighs"));
    }

    #[test]
    fn test_user_ingredients_drop_empties_and_dedupe() {
        let set = UserIngredients::parse_list("Chicken, , onion ,CHICKEN,");
        assert_eq!(set.len(), 2);
        let tokens: Vec<&str> = set.iter().collect();
        assert_eq!(tokens, vec!["chicken", "onion"]);
    }

    #[test]
    fn test_staple_satisfied_as_whole_word() {
        let matcher = Matcher::new(&user(&[]), true);
        let result = matcher.analyze(&detail(&["minced garlic", "sea salt"]));
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_staple_oil_does_not_claim_boiled() {
        let matcher = Matcher::new(&user(&[]), true);
        let result = matcher.analyze(&detail(&["boiled ham hock"]));
        assert_eq!(result.missing_ingredients, vec!["boiled ham hock"]);
    }

    #[test]
    fn test_peanut_butter_is_not_the_butter_staple() {
        let matcher = Matcher::new(&user(&["jelly"]), true);
        let result = matcher.analyze(&detail(&["peanut butter", "jelly"]));
        assert_eq!(result.missing_ingredients, vec!["peanut butter"]);
        assert!(result.matched_user_ingredients.contains("jelly"));
        assert_eq!(result.match_count(), 1);
    }

    #[test]
    fn test_plain_butter_is_still_a_staple() {
        let matcher = Matcher::new(&user(&[]), true);
        let result = matcher.analyze(&detail(&["unsalted butter"]));
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_chicken_onion_scenario() {
        let matcher = Matcher::new(&user(&["chicken", "onion"]), true);
        let result = matcher.analyze(&detail(&["chicken breast", "onion", "salt", "pepper"]));
        assert_eq!(result.missing_count(), 0);
        assert_eq!(result.match_count(), 2);
        let matched: Vec<&str> = result
            .matched_user_ingredients
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(matched, vec!["chicken", "onion"]);
    }

    #[test]
    fn test_user_listed_staple_is_credited_to_the_user() {
        let matcher = Matcher::new(&user(&["onion"]), true);
        let result = matcher.analyze(&detail(&["onion", "garlic"]));
        assert!(result.matched_user_ingredients.contains("onion"));
        assert_eq!(result.match_count(), 1);
        // garlic stays staple-satisfied
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_every_ingredient_lands_in_exactly_one_bucket() {
        let matcher = Matcher::new(&user(&["chicken"]), true);
        let ingredients = ["chicken breast", "salt", "tarragon", "shallots"];
        let result = matcher.analyze(&detail(&ingredients));

        // staple: salt; user: chicken breast; missing: tarragon, shallots
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.missing_ingredients, vec!["shallots", "tarragon"]);
        assert!(result.match_count() + result.missing_count() <= ingredients.len());
    }

    #[test]
    fn test_one_user_token_can_satisfy_multiple_ingredients() {
        // match_count counts user tokens consumed, not recipe lines
        let matcher = Matcher::new(&user(&["chicken"]), true);
        let result = matcher.analyze(&detail(&["chicken breast", "chicken stock"]));
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_disabled_staples_count_as_missing() {
        let matcher = Matcher::new(&user(&["chicken"]), false);
        let result = matcher.analyze(&detail(&["chicken breast", "salt"]));
        assert_eq!(result.missing_ingredients, vec!["salt"]);
    }

    #[test]
    fn test_missing_ingredients_are_sorted() {
        let matcher = Matcher::new(&user(&[]), false);
        let result = matcher.analyze(&detail(&["zucchini", "apple", "mango"]));
        assert_eq!(result.missing_ingredients, vec!["apple", "mango", "zucchini"]);
    }

    #[test]
    fn test_ranking_key_orders_fewest_missing_then_most_matched() {
        let a = MatchResult {
            matched_user_ingredients: ["chicken"].iter().map(|s| s.to_string()).collect(),
            missing_ingredients: vec![],
        };
        let b = MatchResult {
            matched_user_ingredients: ["chicken", "onion"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            missing_ingredients: vec![],
        };
        let c = MatchResult {
            matched_user_ingredients: ["chicken", "onion", "rice"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            missing_ingredients: vec!["saffron".into()],
        };

        let mut results = vec![a.clone(), c.clone(), b.clone()];
        results.sort_by_key(MatchResult::ranking_key);
        assert_eq!(results, vec![b, a, c]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut results: Vec<MatchResult> = (0..4)
            .map(|i| MatchResult {
                matched_user_ingredients: (0..i).map(|j| format!("ing{j}")).collect(),
                missing_ingredients: (0..(4 - i)).map(|j| format!("miss{j}")).collect(),
            })
            .collect();

        results.sort_by_key(MatchResult::ranking_key);
        let once = results.clone();
        results.sort_by_key(MatchResult::ranking_key);
        assert_eq!(results, once);
    }

    #[test]
    fn test_quality_gate_rejects_placeholder() {
        let d = detail_with_instructions(&["rice"], "Make and enjoy.");
        assert!(!has_real_instructions(&d));
    }

    #[test]
    fn test_quality_gate_rejects_short_and_absent_instructions() {
        assert!(!has_real_instructions(&detail_with_instructions(
            &["rice"],
            "Just cook it."
        )));

        let no_instructions: RecipeDetail =
            serde_json::from_str(r#"{"idMeal": "1", "strMeal": "Stub"}"#).unwrap();
        assert!(!has_real_instructions(&no_instructions));
    }

    #[test]
    fn test_quality_gate_accepts_real_instructions() {
        let d = detail_with_instructions(
            &["rice"],
            "Rinse the rice, simmer covered for 12 minutes, then rest.",
        );
        assert!(has_real_instructions(&d));
    }
}
