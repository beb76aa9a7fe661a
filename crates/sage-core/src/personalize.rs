//! Dietary personalization of recipes.
//!
//! Applies preference substitution maps to a copy of the recipe;
//! reference recipes are never touched.

use crate::matcher::normalize;
use crate::recipes::Recipe;
use crate::tables::{DietaryPreference, ReferenceTables};
use crate::text::display_name;
use serde::Serialize;

/// One swap applied to a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    pub original: String,
    pub substitute: String,
}

impl std::fmt::Display for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}",
            display_name(&self.original),
            display_name(&self.substitute)
        )
    }
}

/// A recipe adapted to dietary preferences, with the swaps recorded.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedRecipe {
    pub recipe: Recipe,
    pub substitutions: Vec<Substitution>,
    pub adapted_for: Vec<DietaryPreference>,
}

/// Adapt `recipe` to `preferences`. Each ingredient takes at most one
/// substitution per preference; the first map entry contained in the
/// ingredient wins.
pub fn personalize(
    tables: &ReferenceTables,
    recipe: &Recipe,
    preferences: &[DietaryPreference],
) -> PersonalizedRecipe {
    let mut adapted = recipe.clone();
    let mut substitutions = Vec::new();

    for preference in preferences {
        let pairs = tables.substitutions_for(*preference);
        for ingredient in adapted.ingredients.iter_mut() {
            let current = normalize(ingredient);
            for (original, substitute) in pairs {
                if current.contains(&normalize(original)) {
                    *ingredient = substitute.clone();
                    substitutions.push(Substitution {
                        original: original.clone(),
                        substitute: substitute.clone(),
                    });
                    break;
                }
            }
        }
    }

    let adapted_for = if substitutions.is_empty() {
        Vec::new()
    } else {
        preferences.to_vec()
    };

    PersonalizedRecipe {
        recipe: adapted,
        substitutions,
        adapted_for,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::builtin_recipes;

    fn tables() -> ReferenceTables {
        ReferenceTables::with_nutrition(Vec::new())
    }

    fn margherita() -> Recipe {
        builtin_recipes()
            .into_iter()
            .find(|r| r.name == "Classic Margherita Pizza")
            .unwrap()
    }

    #[test]
    fn test_vegan_substitutions() {
        let tables = tables();
        let recipe = margherita();
        let personalized = personalize(&tables, &recipe, &[DietaryPreference::Vegan]);

        assert!(personalized
            .recipe
            .ingredients
            .contains(&"nutritional yeast".to_string()));
        assert!(!personalized
            .recipe
            .ingredients
            .contains(&"cheese".to_string()));
        assert!(personalized
            .substitutions
            .iter()
            .any(|s| s.original == "cheese" && s.substitute == "nutritional yeast"));
        assert_eq!(personalized.adapted_for, vec![DietaryPreference::Vegan]);
    }

    #[test]
    fn test_reference_recipe_untouched() {
        let tables = tables();
        let recipe = margherita();
        let before = recipe.clone();
        let _ = personalize(&tables, &recipe, &[DietaryPreference::Vegan]);
        assert_eq!(recipe, before);
    }

    #[test]
    fn test_no_matching_preference_is_noop() {
        let tables = tables();
        let recipe = margherita();
        let personalized = personalize(&tables, &recipe, &[DietaryPreference::Keto]);
        // Keto swaps bread for cloud bread; everything else stays.
        assert!(personalized
            .recipe
            .ingredients
            .contains(&"cloud bread".to_string()));

        let stir_fry = builtin_recipes()
            .into_iter()
            .find(|r| r.name == "Quick Vegetable Stir Fry")
            .unwrap();
        let untouched = personalize(&tables, &stir_fry, &[DietaryPreference::Keto]);
        assert!(untouched.substitutions.is_empty());
        assert!(untouched.adapted_for.is_empty());
    }

    #[test]
    fn test_underscore_ingredient_matches_map() {
        let tables = tables();
        let fried_rice = builtin_recipes()
            .into_iter()
            .find(|r| r.name == "Vegetable Fried Rice")
            .unwrap();
        let personalized = personalize(&tables, &fried_rice, &[DietaryPreference::GlutenFree]);
        // soy_sauce -> tamari despite the underscore form.
        assert!(personalized
            .recipe
            .ingredients
            .contains(&"tamari".to_string()));
    }
}
