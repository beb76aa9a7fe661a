//! The coach orchestrator.
//!
//! One entry point turns a user message plus conversation history into
//! a structured reply. Every stage degrades instead of failing: a dead
//! search endpoint, an empty table, or an unknown ingredient reduce the
//! reply, they never raise. Whatever does slip through is converted to
//! an apology reply at this boundary -- a bad request must not take the
//! process down.

use crate::config::CoachConfig;
use crate::engine::{self, ScoredRecipe};
use crate::error::SageError;
use crate::extract;
use crate::impact::{self, AchievementLevel, ImpactReport, WeeklyChallenge};
use crate::nutrition::{self, NutritionFacts};
use crate::planner::{self, WeeklyMealPlan};
use crate::prevention;
use crate::search::{DisabledSearch, ExternalRecipe, HttpRecipeSearch, RecipeSearch};
use crate::tables::ReferenceTables;
use crate::text::display_name;
use crate::variety::Variety;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Phrases that route a message to the weekly meal planner.
const MEAL_PLAN_PHRASES: &[&str] = &["meal plan", "weekly plan", "plan meals", "week plan"];

/// How many trailing history entries feed the context analysis.
const RECENT_TURNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Coach,
}

/// One turn of the request-scoped conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub speaker: Speaker,
    pub message: String,
}

impl ConversationEntry {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            message: message.into(),
        }
    }

    pub fn coach(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Coach,
            message: message.into(),
        }
    }
}

/// What the recent conversation tells us about this message.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    /// Ingredients mentioned in recent user turns, deduplicated,
    /// first mention first.
    pub recent_ingredients: Vec<String>,
    pub is_follow_up: bool,
    pub wants_meal_plan: bool,
}

/// Analyze `message` against the last few history turns.
pub fn analyze_context(message: &str, history: &[ConversationEntry]) -> ContextSnapshot {
    let mut recent_ingredients: Vec<String> = Vec::new();
    let start = history.len().saturating_sub(RECENT_TURNS);
    for entry in &history[start..] {
        if entry.speaker != Speaker::User {
            continue;
        }
        for ingredient in extract::extract(&entry.message) {
            if !recent_ingredients.contains(&ingredient) {
                recent_ingredients.push(ingredient);
            }
        }
    }

    let lower = message.to_lowercase();
    ContextSnapshot {
        recent_ingredients,
        is_follow_up: history.len() > 2,
        wants_meal_plan: MEAL_PLAN_PHRASES.iter().any(|p| lower.contains(p)),
    }
}

/// Nutrition facts for one matched ingredient, display-named.
#[derive(Debug, Clone, Serialize)]
pub struct NutritionLine {
    pub ingredient: String,
    pub facts: NutritionFacts,
}

/// Storage tip for one matched ingredient, display-named.
#[derive(Debug, Clone, Serialize)]
pub struct StorageLine {
    pub ingredient: String,
    pub tip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactOutcome {
    pub report: ImpactReport,
    pub achievement: AchievementLevel,
}

/// The assembled insight sections of a normal chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub ingredients: Vec<String>,
    pub recommendations: Vec<ScoredRecipe>,
    /// Fallback results from the external search; only populated when
    /// the built-in engine found nothing.
    pub external_recipes: Vec<ExternalRecipe>,
    pub nutrition: Vec<NutritionLine>,
    pub storage_tips: Vec<StorageLine>,
    pub preservation: Vec<(String, Vec<String>)>,
    pub impact: ImpactOutcome,
    pub did_you_know: String,
}

/// Structured reply; the composer renders it to text.
#[derive(Debug)]
pub enum CoachReply {
    /// No usable ingredients: explain how to talk to the coach.
    Help,
    MealPlan {
        plan: WeeklyMealPlan,
        challenge: WeeklyChallenge,
    },
    Insights(Box<Insights>),
    /// Ingredients recognized but nothing found for them.
    Fallback { ingredients: Vec<String>, tip: String },
    /// Unexpected internal failure, already logged.
    Apology,
}

pub struct Coach {
    tables: ReferenceTables,
    config: CoachConfig,
    search: Box<dyn RecipeSearch>,
    variety: Variety,
}

impl Coach {
    /// Build a coach from config: load tables, wire the search client,
    /// seed the randomness source.
    pub fn new(config: CoachConfig) -> Result<Self, SageError> {
        let tables = ReferenceTables::load(&config.nutrition_data_path);
        let search: Box<dyn RecipeSearch> = if config.search.enabled {
            Box::new(HttpRecipeSearch::new(&config.search)?)
        } else {
            Box::new(DisabledSearch)
        };
        let variety = Variety::from_seed_option(config.rng_seed);
        Ok(Self {
            tables,
            config,
            search,
            variety,
        })
    }

    /// Assemble a coach from explicit parts (tests substitute tables
    /// and search clients here).
    pub fn with_parts(
        tables: ReferenceTables,
        config: CoachConfig,
        search: Box<dyn RecipeSearch>,
        variety: Variety,
    ) -> Self {
        Self {
            tables,
            config,
            search,
            variety,
        }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// The single top-level boundary: never fails, worst case is an
    /// apology reply.
    pub fn respond(
        &mut self,
        message: &str,
        history: &[ConversationEntry],
        today: NaiveDate,
    ) -> CoachReply {
        match self.build_reply(message, history, today) {
            Ok(reply) => reply,
            Err(e) => {
                error!("Reply pipeline failed: {e}");
                CoachReply::Apology
            }
        }
    }

    fn build_reply(
        &mut self,
        message: &str,
        history: &[ConversationEntry],
        today: NaiveDate,
    ) -> Result<CoachReply, SageError> {
        let context = analyze_context(message, history);

        let mut ingredients = extract::extract(message);
        if ingredients.is_empty() && !message.trim().is_empty() {
            // The message said something but named nothing edible; fall
            // back to what the conversation already mentioned.
            ingredients = context
                .recent_ingredients
                .iter()
                .take(extract::MAX_INGREDIENTS)
                .cloned()
                .collect();
        }

        if ingredients.is_empty() {
            return Ok(CoachReply::Help);
        }

        if context.wants_meal_plan {
            let plan = planner::generate_weekly_plan(&ingredients, today, &mut self.variety);
            let challenge = impact::weekly_challenge(&mut self.variety);
            return Ok(CoachReply::MealPlan { plan, challenge });
        }

        let recommendations =
            engine::find_best_recipes(&self.tables, &ingredients, self.config.max_recipes);

        let external_recipes = if recommendations.is_empty() {
            match self.search.search(&ingredients) {
                Ok(found) => found,
                Err(e) => {
                    warn!("External recipe search failed: {e}");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let min_confidence = self.config.min_confidence;
        let mut nutrition_lines = Vec::new();
        let mut storage_lines = Vec::new();
        for ingredient in &ingredients {
            if let Some(facts) = nutrition::nutrition_facts(&self.tables, ingredient, min_confidence)
            {
                nutrition_lines.push(NutritionLine {
                    ingredient: display_name(ingredient),
                    facts,
                });
            }
            if let Some(tip) = nutrition::storage_tip(&self.tables, ingredient, min_confidence) {
                storage_lines.push(StorageLine {
                    ingredient: display_name(ingredient),
                    tip,
                });
            }
        }

        if recommendations.is_empty()
            && external_recipes.is_empty()
            && nutrition_lines.is_empty()
            && storage_lines.is_empty()
        {
            return Ok(CoachReply::Fallback {
                ingredients,
                tip: prevention::did_you_know(&mut self.variety),
            });
        }

        let preservation = prevention::preservation_strategies(&ingredients);
        let report = impact::calculate_total_impact(&self.tables, &ingredients, &mut self.variety);
        let achievement = AchievementLevel::for_co2_kg(report.totals.co2_reduced_kg);
        let did_you_know = prevention::did_you_know(&mut self.variety);

        Ok(CoachReply::Insights(Box::new(Insights {
            ingredients,
            recommendations,
            external_recipes,
            nutrition: nutrition_lines,
            storage_tips: storage_lines,
            preservation,
            impact: ImpactOutcome {
                report,
                achievement,
            },
            did_you_know,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_context_meal_plan_phrases() {
        let ctx = analyze_context("make me a meal plan", &[]);
        assert!(ctx.wants_meal_plan);
        let ctx = analyze_context("weekly plan with rice", &[]);
        assert!(ctx.wants_meal_plan);
        let ctx = analyze_context("tomato, bread", &[]);
        assert!(!ctx.wants_meal_plan);
    }

    #[test]
    fn test_analyze_context_recent_ingredients() {
        let history = vec![
            ConversationEntry::user("tomato, bread"),
            ConversationEntry::coach("Here are some ideas..."),
            ConversationEntry::user("cheese"),
        ];
        let ctx = analyze_context("anything else?", &history);
        assert_eq!(ctx.recent_ingredients, vec!["tomato", "bread", "cheese"]);
        assert!(ctx.is_follow_up);
    }

    #[test]
    fn test_recent_ingredients_deduplicated() {
        let history = vec![
            ConversationEntry::user("tomato"),
            ConversationEntry::user("tomato, cheese"),
        ];
        let ctx = analyze_context("", &history);
        assert_eq!(ctx.recent_ingredients, vec!["tomato", "cheese"]);
    }

    #[test]
    fn test_only_recent_turns_considered() {
        let mut history: Vec<ConversationEntry> = (0..10)
            .map(|i| ConversationEntry::user(format!("ingredient{i}, filler{i}")))
            .collect();
        history.push(ConversationEntry::user("cheese"));
        let ctx = analyze_context("", &history);
        assert!(ctx.recent_ingredients.contains(&"cheese".to_string()));
        assert!(!ctx.recent_ingredients.contains(&"ingredient0".to_string()));
    }
}
