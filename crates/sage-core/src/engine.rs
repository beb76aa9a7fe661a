//! Recipe scoring, ranking, and categorization.
//!
//! Scores every recipe in the database against the user's ingredients:
//! containment gives full credit per requirement, an edit-distance
//! match above the floor gives partial credit, and the authored
//! waste-reduction score adds a small bonus. The final score is
//! deliberately uncapped; full coverage plus a high bonus legitimately
//! exceeds 100.

use crate::matcher::{best_ratio, contains_either_way, normalize, DEFAULT_MIN_CONFIDENCE};
use crate::recipes::{Cuisine, Recipe};
use crate::tables::{IngredientCategory, ReferenceTables, CATEGORY_KEYWORDS};
use crate::text::display_name;
use serde::Serialize;

/// Credit for a fuzzy (non-containment) requirement match.
const FUZZY_PARTIAL_CREDIT: f64 = 0.7;

/// Waste-reduction score contribution to the final score (0-10 points).
const WASTE_BONUS_WEIGHT: f64 = 0.1;

/// Cuisine-bucketed suggestions need more than this score.
const CUISINE_SCORE_FLOOR: u32 = 30;

/// At most this many suggestions per cuisine bucket.
const MAX_PER_CUISINE: usize = 2;

/// A recipe with its derived per-request score and shopping gap.
/// Recomputed every request, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    /// Integer score; may exceed 100 via the waste bonus.
    pub match_score: u32,
    /// Display names of requirements the user cannot cover.
    pub missing_ingredients: Vec<String>,
}

fn requirement_covered(required: &str, available: &[String]) -> bool {
    available.iter().any(|a| contains_either_way(required, a))
}

fn requirement_fuzzy(required: &str, available: &[String]) -> bool {
    best_ratio(required, available.iter().map(String::as_str)) >= DEFAULT_MIN_CONFIDENCE
}

fn recipe_score(recipe: &Recipe, available: &[String]) -> u32 {
    if recipe.ingredients.is_empty() {
        return 0;
    }

    let mut credit = 0.0_f64;
    for required in &recipe.ingredients {
        if requirement_covered(required, available) {
            credit += 1.0;
        } else if requirement_fuzzy(required, available) {
            credit += FUZZY_PARTIAL_CREDIT;
        }
    }

    let base = credit / recipe.ingredients.len() as f64 * 100.0;
    let bonus = recipe.waste_reduction_score as f64 * WASTE_BONUS_WEIGHT;
    (base + bonus).floor() as u32
}

fn missing_ingredients(recipe: &Recipe, available: &[String]) -> Vec<String> {
    recipe
        .ingredients
        .iter()
        .filter(|required| {
            !requirement_covered(required, available) && !requirement_fuzzy(required, available)
        })
        .map(|required| display_name(required))
        .collect()
}

fn score_one(recipe: &Recipe, available: &[String]) -> Option<ScoredRecipe> {
    let match_score = recipe_score(recipe, available);
    if match_score == 0 {
        return None;
    }
    Some(ScoredRecipe {
        recipe: recipe.clone(),
        match_score,
        missing_ingredients: missing_ingredients(recipe, available),
    })
}

fn normalize_available(ingredients: &[String]) -> Vec<String> {
    ingredients.iter().map(|i| normalize(i)).collect()
}

/// Rank the whole database against the user's ingredients, best first.
/// Ties keep database order (stable sort); zero scores are dropped.
pub fn find_best_recipes(
    tables: &ReferenceTables,
    ingredients: &[String],
    max_recipes: usize,
) -> Vec<ScoredRecipe> {
    let available = normalize_available(ingredients);

    let mut scored: Vec<ScoredRecipe> = tables
        .recipes()
        .iter()
        .filter_map(|recipe| score_one(recipe, &available))
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(max_recipes);
    scored
}

/// Same scoring restricted per cuisine bucket, with a higher acceptance
/// floor and at most two suggestions per cuisine.
pub fn suggestions_by_cuisine(
    tables: &ReferenceTables,
    ingredients: &[String],
) -> Vec<(Cuisine, Vec<ScoredRecipe>)> {
    let available = normalize_available(ingredients);
    let mut suggestions = Vec::new();

    for cuisine in Cuisine::ALL {
        let mut bucket: Vec<ScoredRecipe> = tables
            .recipes()
            .iter()
            .filter(|recipe| recipe.cuisine == cuisine)
            .filter_map(|recipe| score_one(recipe, &available))
            .filter(|scored| scored.match_score > CUISINE_SCORE_FLOOR)
            .collect();

        if bucket.is_empty() {
            continue;
        }
        bucket.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        bucket.truncate(MAX_PER_CUISINE);
        suggestions.push((cuisine, bucket));
    }

    suggestions
}

/// User ingredients sorted into the fixed category buckets.
/// Uncategorized ingredients are dropped, not reported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorizedIngredients {
    pub proteins: Vec<String>,
    pub grains: Vec<String>,
    pub vegetables: Vec<String>,
    pub dairy: Vec<String>,
    pub pantry: Vec<String>,
}

impl CategorizedIngredients {
    fn push(&mut self, category: IngredientCategory, ingredient: String) {
        match category {
            IngredientCategory::Proteins => self.proteins.push(ingredient),
            IngredientCategory::Grains => self.grains.push(ingredient),
            IngredientCategory::Vegetables => self.vegetables.push(ingredient),
            IngredientCategory::Dairy => self.dairy.push(ingredient),
            IngredientCategory::Pantry => self.pantry.push(ingredient),
        }
    }
}

/// Containment-only categorization (no fuzzy step); the first matching
/// category wins.
pub fn categorize(ingredients: &[String]) -> CategorizedIngredients {
    let mut categorized = CategorizedIngredients::default();

    for ingredient in ingredients {
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|k| contains_either_way(k, ingredient)) {
                categorized.push(*category, ingredient.clone());
                break;
            }
        }
    }

    categorized
}

/// A synthesized suggestion built from category coverage rather than
/// the recipe database.
#[derive(Debug, Clone, Serialize)]
pub struct CreativeCombination {
    pub name: String,
    pub description: String,
    pub estimated_prep_minutes: u32,
    pub creativity_score: u32,
    pub ingredients_used: Vec<String>,
}

/// Synthesize fusion suggestions when enough categories are populated:
/// a protein plus a grain makes a bowl, three vegetables make a medley.
pub fn creative_combinations(ingredients: &[String]) -> Vec<CreativeCombination> {
    let categorized = categorize(ingredients);
    let mut combinations = Vec::new();

    if !categorized.proteins.is_empty() && !categorized.grains.is_empty() {
        let mut used = categorized.proteins.clone();
        used.extend(categorized.grains.iter().cloned());
        used.extend(categorized.vegetables.iter().take(2).cloned());

        combinations.push(CreativeCombination {
            name: format!("Fusion {} Bowl", display_name(&categorized.proteins[0])),
            description: format!(
                "Creative bowl combining {} with {}",
                categorized.proteins.join(", "),
                categorized.grains.join(", ")
            ),
            estimated_prep_minutes: 20,
            creativity_score: 85,
            ingredients_used: used,
        });
    }

    if categorized.vegetables.len() >= 3 {
        let featured: Vec<String> = categorized.vegetables.iter().take(4).cloned().collect();
        combinations.push(CreativeCombination {
            name: "Rainbow Veggie Medley".to_string(),
            description: format!("Colorful combination of {}", featured.join(", ")),
            estimated_prep_minutes: 15,
            creativity_score: 75,
            ingredients_used: featured,
        });
    }

    combinations
}

/// General plus cuisine-specific cooking tips, at most four.
pub fn cooking_tips(recipe: &Recipe) -> Vec<&'static str> {
    let mut tips = vec![
        "Prep all ingredients before starting to cook",
        "Taste and adjust seasoning as you go",
        "Use fresh herbs when possible for better flavor",
    ];

    match recipe.cuisine {
        Cuisine::Asian => tips.extend([
            "Heat your pan properly before adding oil",
            "Cut vegetables uniformly for even cooking",
            "Don't overcrowd the pan when stir-frying",
        ]),
        Cuisine::Italian => tips.extend([
            "Use good quality olive oil for best flavor",
            "Don't rinse pasta after cooking",
            "Save some pasta water for adjusting sauce consistency",
        ]),
        _ => {}
    }

    tips.truncate(4);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::with_nutrition(Vec::new())
    }

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_margherita_ranks_first_with_basil_missing() {
        let tables = tables();
        let ranked = find_best_recipes(&tables, &ingredients(&["tomato", "bread", "cheese"]), 3);
        assert!(!ranked.is_empty());
        assert_eq!(ranked[0].recipe.name, "Classic Margherita Pizza");
        assert_eq!(ranked[0].missing_ingredients, vec!["Basil"]);
    }

    #[test]
    fn test_score_exceeds_100_with_full_coverage() {
        let tables = tables();
        // Vegetable Fried Rice: all five requirements present, waste
        // score 100 -> base 100 + bonus 10.
        let ranked = find_best_recipes(
            &tables,
            &ingredients(&["rice", "vegetables", "eggs", "soy sauce", "garlic"]),
            1,
        );
        assert_eq!(ranked[0].recipe.name, "Vegetable Fried Rice");
        assert_eq!(ranked[0].match_score, 110);
        assert!(ranked[0].missing_ingredients.is_empty());
    }

    #[test]
    fn test_score_monotonic_in_overlap() {
        let tables = tables();
        let find_score = |items: &[&str]| -> u32 {
            find_best_recipes(&tables, &ingredients(items), 10)
                .into_iter()
                .find(|s| s.recipe.name == "Classic Margherita Pizza")
                .map(|s| s.match_score)
                .unwrap_or(0)
        };
        let partial = find_score(&["tomato", "bread"]);
        let fuller = find_score(&["tomato", "bread", "cheese"]);
        let full = find_score(&["tomato", "bread", "cheese", "basil"]);
        assert!(fuller >= partial);
        assert!(full >= fuller);
    }

    #[test]
    fn test_ranking_stable_and_descending() {
        let tables = tables();
        let ranked = find_best_recipes(&tables, &ingredients(&["vegetables", "garlic"]), 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        // Equal scores keep database order.
        let db_pos = |name: &str| {
            tables
                .recipes()
                .iter()
                .position(|r| r.name == name)
                .unwrap()
        };
        for pair in ranked.windows(2) {
            if pair[0].match_score == pair[1].match_score {
                assert!(db_pos(&pair[0].recipe.name) < db_pos(&pair[1].recipe.name));
            }
        }
    }

    #[test]
    fn test_missing_never_contains_matched() {
        let tables = tables();
        let user = ingredients(&["tomato", "bread", "cheese", "tomatoe"]);
        for scored in find_best_recipes(&tables, &user, 10) {
            for missing in &scored.missing_ingredients {
                let miss_norm = normalize(missing);
                assert!(
                    !user.iter().any(|u| contains_either_way(&miss_norm, u)),
                    "{} listed missing but present",
                    missing
                );
            }
        }
    }

    #[test]
    fn test_cuisine_suggestions_floor_and_cap() {
        let tables = tables();
        let suggestions =
            suggestions_by_cuisine(&tables, &ingredients(&["vegetables", "garlic", "cheese"]));
        for (_, bucket) in &suggestions {
            assert!(bucket.len() <= 2);
            for scored in bucket {
                assert!(scored.match_score > 30);
            }
        }
    }

    #[test]
    fn test_categorize_first_category_wins() {
        // "cheese" is listed under both proteins and dairy; proteins
        // comes first.
        let categorized = categorize(&ingredients(&["cheese", "rice", "tomato"]));
        assert_eq!(categorized.proteins, vec!["cheese"]);
        assert!(categorized.dairy.is_empty());
        assert_eq!(categorized.grains, vec!["rice"]);
        assert_eq!(categorized.vegetables, vec!["tomato"]);
    }

    #[test]
    fn test_categorize_drops_unknown() {
        let categorized = categorize(&ingredients(&["durian"]));
        assert!(categorized.proteins.is_empty());
        assert!(categorized.vegetables.is_empty());
    }

    #[test]
    fn test_creative_combinations() {
        let combos = creative_combinations(&ingredients(&["chicken", "rice", "tomato"]));
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].name, "Fusion Chicken Bowl");

        let combos =
            creative_combinations(&ingredients(&["tomato", "onion", "carrot", "spinach"]));
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].name, "Rainbow Veggie Medley");
        assert_eq!(combos[0].ingredients_used.len(), 4);

        assert!(creative_combinations(&ingredients(&["durian"])).is_empty());
    }

    #[test]
    fn test_cooking_tips_capped_at_four() {
        let tables = tables();
        for recipe in tables.recipes() {
            let tips = cooking_tips(recipe);
            assert!(tips.len() >= 3 && tips.len() <= 4);
        }
    }
}
