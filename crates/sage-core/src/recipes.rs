//! The built-in recipe database.
//!
//! Authored constants, grouped by cuisine. The waste-reduction score is
//! an editorial 0-100 judgment of how well a recipe uses ingredients
//! that would otherwise spoil; it is never computed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cuisine {
    Italian,
    Asian,
    American,
    Mexican,
    Mediterranean,
}

impl Cuisine {
    /// Bucket order of the database; ranking ties fall back to it.
    pub const ALL: [Cuisine; 5] = [
        Cuisine::Italian,
        Cuisine::Asian,
        Cuisine::American,
        Cuisine::Mexican,
        Cuisine::Mediterranean,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "italian" => Some(Self::Italian),
            "asian" => Some(Self::Asian),
            "american" => Some(Self::American),
            "mexican" => Some(Self::Mexican),
            "mediterranean" => Some(Self::Mediterranean),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Italian => "Italian",
            Self::Asian => "Asian",
            Self::American => "American",
            Self::Mexican => "Mexican",
            Self::Mediterranean => "Mediterranean",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub cuisine: Cuisine,
    /// Required ingredient tokens, canonical snake_case form.
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: u32,
    pub difficulty: Difficulty,
    /// Authored constant, 0-100.
    pub waste_reduction_score: u32,
}

fn recipe(
    name: &str,
    cuisine: Cuisine,
    ingredients: &[&str],
    instructions: &[&str],
    prep_time_minutes: u32,
    waste_reduction_score: u32,
) -> Recipe {
    Recipe {
        name: name.to_string(),
        cuisine,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        prep_time_minutes,
        difficulty: Difficulty::Easy,
        waste_reduction_score,
    }
}

/// The full database in bucket order. Iteration order is part of the
/// ranking contract: ties keep this order.
pub fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "Classic Margherita Pizza",
            Cuisine::Italian,
            &["bread", "tomato", "cheese", "basil"],
            &[
                "Use bread as pizza base or make dough",
                "Spread tomato sauce evenly",
                "Add mozzarella cheese generously",
                "Top with fresh basil leaves",
                "Bake at 450°F for 12-15 minutes",
            ],
            25,
            95,
        ),
        recipe(
            "Pasta Primavera",
            Cuisine::Italian,
            &["pasta", "vegetables", "garlic", "olive_oil", "cheese"],
            &[
                "Cook pasta according to package directions",
                "Sauté mixed vegetables with garlic in olive oil",
                "Toss pasta with vegetables",
                "Finish with grated cheese and herbs",
                "Serve immediately while hot",
            ],
            20,
            90,
        ),
        recipe(
            "Vegetable Fried Rice",
            Cuisine::Asian,
            &["rice", "vegetables", "eggs", "soy_sauce", "garlic"],
            &[
                "Use day-old rice for best texture",
                "Scramble eggs and set aside",
                "Stir-fry vegetables with garlic",
                "Add rice and break up clumps",
                "Mix in eggs and soy sauce, serve hot",
            ],
            15,
            100,
        ),
        recipe(
            "Quick Vegetable Stir Fry",
            Cuisine::Asian,
            &["vegetables", "garlic", "ginger", "soy_sauce", "oil"],
            &[
                "Heat oil in wok or large pan",
                "Add garlic and ginger, stir for 30 seconds",
                "Add harder vegetables first, then softer ones",
                "Stir-fry for 3-5 minutes until crisp-tender",
                "Season with soy sauce and serve over rice",
            ],
            10,
            95,
        ),
        recipe(
            "Loaded Grilled Cheese",
            Cuisine::American,
            &["bread", "cheese", "tomato", "onion", "butter"],
            &[
                "Butter bread slices on outside",
                "Layer cheese, tomato slices, and onion inside",
                "Cook in pan over medium heat",
                "Flip when golden brown on bottom",
                "Cook until second side is golden and cheese melts",
            ],
            8,
            85,
        ),
        recipe(
            "Hearty Vegetable Soup",
            Cuisine::American,
            &["vegetables", "broth", "onion", "garlic", "herbs"],
            &[
                "Sauté onion and garlic until fragrant",
                "Add chopped vegetables and cook 5 minutes",
                "Pour in broth and bring to boil",
                "Simmer 20-25 minutes until vegetables are tender",
                "Season with herbs and serve hot",
            ],
            35,
            98,
        ),
        recipe(
            "Quick Black Bean Quesadillas",
            Cuisine::Mexican,
            &["tortilla", "beans", "cheese", "onion", "peppers"],
            &[
                "Mash beans slightly with fork",
                "Spread beans on half of tortilla",
                "Add cheese, diced onion, and peppers",
                "Fold tortilla and cook in dry pan",
                "Flip once and cook until crispy and cheese melts",
            ],
            12,
            92,
        ),
        recipe(
            "Greek-Style Vegetable Medley",
            Cuisine::Mediterranean,
            &["vegetables", "olive_oil", "lemon", "herbs", "cheese"],
            &[
                "Chop vegetables into uniform pieces",
                "Toss with olive oil, lemon juice, and herbs",
                "Roast at 400°F for 25-30 minutes",
                "Sprinkle with crumbled cheese before serving",
                "Serve warm or at room temperature",
            ],
            40,
            90,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_bucket_order() {
        let recipes = builtin_recipes();
        assert_eq!(recipes[0].cuisine, Cuisine::Italian);
        let mut last_bucket = 0;
        for r in &recipes {
            let bucket = Cuisine::ALL.iter().position(|c| *c == r.cuisine).unwrap();
            assert!(bucket >= last_bucket, "cuisine buckets must stay grouped");
            last_bucket = bucket;
        }
    }

    #[test]
    fn test_waste_scores_in_range() {
        for r in builtin_recipes() {
            assert!(r.waste_reduction_score <= 100);
            assert!(!r.ingredients.is_empty());
            assert!(!r.instructions.is_empty());
        }
    }

    #[test]
    fn test_cuisine_parse_roundtrip() {
        for cuisine in Cuisine::ALL {
            assert_eq!(Cuisine::parse(&cuisine.to_string()), Some(cuisine));
        }
        assert_eq!(Cuisine::parse("ITALIAN"), Some(Cuisine::Italian));
        assert_eq!(Cuisine::parse("french"), None);
    }
}
