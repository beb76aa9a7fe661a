//! End-to-end tests for the coach pipeline.
//!
//! Cover the documented behaviors: the Margherita ranking case, the
//! no-ingredients help path, meal-plan routing, soft-failing external
//! search, and seeded determinism.

use chrono::NaiveDate;
use sage_core::coach::{Coach, CoachReply, ConversationEntry};
use sage_core::config::CoachConfig;
use sage_core::error::SageError;
use sage_core::search::{DisabledSearch, ExternalRecipe, RecipeSearch};
use sage_core::tables::{NutritionRecord, ReferenceTables};
use sage_core::variety::Variety;

struct FailingSearch;

impl RecipeSearch for FailingSearch {
    fn search(&self, _ingredients: &[String]) -> Result<Vec<ExternalRecipe>, SageError> {
        Err(SageError::Search("connection refused".to_string()))
    }
}

struct CannedSearch(Vec<ExternalRecipe>);

impl RecipeSearch for CannedSearch {
    fn search(&self, _ingredients: &[String]) -> Result<Vec<ExternalRecipe>, SageError> {
        Ok(self.0.clone())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn offline_config() -> CoachConfig {
    let mut config = CoachConfig::default();
    config.search.enabled = false;
    config.rng_seed = Some(42);
    config
}

fn sample_nutrition() -> Vec<NutritionRecord> {
    vec![
        NutritionRecord {
            ingredient: "Tomato".to_string(),
            calories_per_100g: 18.0,
            protein_g: 0.9,
            carbs_g: 3.9,
            fat_g: 0.2,
            storage_tip: Some("Store stem-side down at room temperature".to_string()),
        },
        NutritionRecord {
            ingredient: "Cheese".to_string(),
            calories_per_100g: 403.0,
            protein_g: 24.9,
            carbs_g: 1.3,
            fat_g: 33.1,
            storage_tip: Some("Wrap in wax paper, not plastic".to_string()),
        },
    ]
}

fn coach() -> Coach {
    Coach::with_parts(
        ReferenceTables::with_nutrition(sample_nutrition()),
        offline_config(),
        Box::new(DisabledSearch),
        Variety::seeded(42),
    )
}

#[test]
fn test_margherita_end_to_end() {
    let mut coach = coach();
    let reply = coach.respond("tomato, bread, cheese", &[], today());

    let insights = match reply {
        CoachReply::Insights(insights) => insights,
        other => panic!("expected insights, got {other:?}"),
    };

    assert_eq!(insights.ingredients, vec!["tomato", "bread", "cheese"]);
    assert_eq!(
        insights.recommendations[0].recipe.name,
        "Classic Margherita Pizza"
    );
    assert_eq!(
        insights.recommendations[0].missing_ingredients,
        vec!["Basil"]
    );
    assert!(insights.recommendations.len() <= 3);
    // Nutrition matched for tomato and cheese, not bread.
    assert_eq!(insights.nutrition.len(), 2);
    assert_eq!(insights.storage_tips.len(), 2);
    assert!(!insights.did_you_know.is_empty());
    assert_eq!(insights.preservation.len(), 3);
}

#[test]
fn test_empty_message_gets_help() {
    let mut coach = coach();
    assert!(matches!(coach.respond("", &[], today()), CoachReply::Help));
    assert!(matches!(
        coach.respond("   ", &[], today()),
        CoachReply::Help
    ));
}

#[test]
fn test_meal_plan_phrase_routes_to_planner() {
    let mut coach = coach();
    let reply = coach.respond("meal plan for tomato, rice, eggs", &[], today());
    match reply {
        CoachReply::MealPlan { plan, .. } => {
            assert_eq!(plan.days.len(), 7);
            for day in &plan.days {
                assert_eq!(day.meals.len(), 3);
            }
        }
        other => panic!("expected meal plan, got {other:?}"),
    }
}

#[test]
fn test_meal_plan_follow_up_uses_history() {
    let mut coach = coach();
    let history = vec![
        ConversationEntry::user("tomato, rice, eggs"),
        ConversationEntry::coach("Here are some ideas..."),
    ];
    // The follow-up itself names nothing edible; the recent turns do.
    let reply = coach.respond("now give me a weekly plan please", &history, today());
    assert!(matches!(reply, CoachReply::MealPlan { .. }));
}

#[test]
fn test_unknown_ingredient_still_gets_impact() {
    let mut coach = coach();
    let reply = coach.respond("durian, tomato", &[], today());
    let insights = match reply {
        CoachReply::Insights(insights) => insights,
        other => panic!("expected insights, got {other:?}"),
    };
    // Impact is computed for both, the unknown one via default factors.
    assert_eq!(insights.impact.report.ingredients.len(), 2);
    assert_eq!(insights.impact.report.ingredients[0].ingredient, "Durian");
    assert!(insights.impact.report.totals.water_saved_liters > 0.0);
}

#[test]
fn test_search_failure_degrades_to_fallback() {
    // Empty recipe table and empty nutrition: the only hope was the
    // external search, and it is down.
    let tables = ReferenceTables::with_nutrition(Vec::new()).with_recipes(Vec::new());
    let mut coach = Coach::with_parts(
        tables,
        offline_config(),
        Box::new(FailingSearch),
        Variety::seeded(1),
    );
    let reply = coach.respond("tomato, bread", &[], today());
    match reply {
        CoachReply::Fallback { ingredients, tip } => {
            assert_eq!(ingredients, vec!["tomato", "bread"]);
            assert!(!tip.is_empty());
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn test_external_results_fill_in_when_engine_is_empty() {
    let tables = ReferenceTables::with_nutrition(Vec::new()).with_recipes(Vec::new());
    let canned = vec![ExternalRecipe {
        title: "Tomato Bruschetta".to_string(),
        href: "http://example.com/bruschetta".to_string(),
        ingredients: "tomato, bread, garlic".to_string(),
    }];
    let mut coach = Coach::with_parts(
        tables,
        offline_config(),
        Box::new(CannedSearch(canned)),
        Variety::seeded(1),
    );
    let reply = coach.respond("tomato, bread", &[], today());
    let insights = match reply {
        CoachReply::Insights(insights) => insights,
        other => panic!("expected insights, got {other:?}"),
    };
    assert!(insights.recommendations.is_empty());
    assert_eq!(insights.external_recipes.len(), 1);
    assert_eq!(insights.external_recipes[0].title, "Tomato Bruschetta");
}

#[test]
fn test_seeded_replies_are_reproducible() {
    let run = || {
        let mut coach = coach();
        match coach.respond("tomato, cheese", &[], today()) {
            CoachReply::Insights(insights) => (
                insights.did_you_know.clone(),
                insights.impact.report.totals.water_saved_liters,
            ),
            other => panic!("expected insights, got {other:?}"),
        }
    };
    assert_eq!(run(), run());
}

#[test]
fn test_extraction_cap_applies_end_to_end() {
    let mut coach = coach();
    let message = (1..=15)
        .map(|i| format!("ingredient{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let reply = coach.respond(&message, &[], today());
    match reply {
        CoachReply::Insights(insights) => assert_eq!(insights.ingredients.len(), 10),
        other => panic!("expected insights, got {other:?}"),
    }
}
