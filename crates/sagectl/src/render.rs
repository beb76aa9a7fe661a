//! The response composer.
//!
//! Renders the core's structured replies as markdown-ish terminal text.
//! All wording lives here; the core never formats anything.

use sage_core::coach::{CoachReply, Insights};
use sage_core::engine::{cooking_tips, CreativeCombination, ScoredRecipe};
use sage_core::impact::{AchievementLevel, ImpactReport, WeeklyChallenge};
use sage_core::pantry::ExpirationForecast;
use sage_core::personalize::PersonalizedRecipe;
use sage_core::planner::WeeklyMealPlan;
use sage_core::prevention::SustainabilityFact;
use sage_core::recipes::Cuisine;
use sage_core::search::ExternalRecipe;
use sage_core::text::display_name;

/// Shown when the pipeline hit an unexpected internal error.
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request. \
Please try again with a list of ingredients like 'tomato, bread, cheese'.";

const HELP: &str = "👋 **Hello! I'm Sage, your food waste and nutrition coach!**

I help you reduce food waste and improve nutrition by finding recipes for your leftover ingredients.

**How to use me:**
- List your ingredients separated by commas (e.g., \"tomato, bread, cheese\")
- I'll find recipes, provide nutrition facts, and give storage tips
- Ask for a \"meal plan\" to get a full week around your ingredients

**Try saying:**
- \"tomato, onion, garlic\"
- \"leftover chicken, rice, vegetables\"
- \"bread, eggs, milk\"

What ingredients do you have available? 🥬🍅🧄";

/// Render any coach reply.
pub fn render_reply(reply: &CoachReply) -> String {
    match reply {
        CoachReply::Help => HELP.to_string(),
        CoachReply::MealPlan { plan, challenge } => render_meal_plan(plan, Some(challenge), 3),
        CoachReply::Insights(insights) => render_insights(insights),
        CoachReply::Fallback { ingredients, tip } => render_fallback(ingredients, tip),
        CoachReply::Apology => APOLOGY.to_string(),
    }
}

fn render_fallback(ingredients: &[String], tip: &str) -> String {
    let mut out = String::new();
    out.push_str(
        "I couldn't find recipe data for those right now, but I can still help you reduce waste!\n\n",
    );
    out.push_str(&format!("**Your ingredients:** {}\n\n", ingredients.join(", ")));
    out.push_str("**General cooking tips:**\n");
    out.push_str("- These ingredients can likely be used in stir-fries, soups, or salads\n");
    out.push_str("- Try combining them with basic pantry staples like rice, pasta, or bread\n");
    out.push_str("- Most fresh ingredients can be sautéed together with garlic and olive oil\n\n");
    out.push_str(&format!("💡 **Did You Know?**\n{tip}"));
    out
}

/// Render the insight sections of a normal chat reply.
pub fn render_insights(insights: &Insights) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !insights.recommendations.is_empty() {
        sections.push(render_scored_recipes(&insights.recommendations));
    } else if !insights.external_recipes.is_empty() {
        sections.push(render_external_recipes(&insights.external_recipes));
    }

    if !insights.nutrition.is_empty() {
        let mut out = String::from("🥗 **Nutrition Facts (per 100g):**\n\n");
        for line in &insights.nutrition {
            out.push_str(&format!(
                "**{}**: {} kcal, {}g protein, {}g carbs, {}g fat\n",
                line.ingredient,
                line.facts.calories_per_100g,
                line.facts.protein_g,
                line.facts.carbs_g,
                line.facts.fat_g
            ));
        }
        sections.push(out.trim_end().to_string());
    }

    if !insights.storage_tips.is_empty() {
        let mut out = String::from("📦 **Storage Tips:**\n\n");
        for line in &insights.storage_tips {
            out.push_str(&format!("**{}**: {}\n", line.ingredient, line.tip));
        }
        sections.push(out.trim_end().to_string());
    }

    if !insights.preservation.is_empty() {
        let mut out = String::from("🥫 **Food Preservation Strategies:**\n\n");
        for (ingredient, methods) in &insights.preservation {
            out.push_str(&format!("**{}:**\n", display_name(ingredient)));
            for method in methods.iter().take(3) {
                out.push_str(&format!("- {method}\n"));
            }
        }
        sections.push(out.trim_end().to_string());
    }

    sections.push(render_impact(
        &insights.impact.report,
        insights.impact.achievement,
    ));

    sections.push(format!("💡 **Did You Know?**\n{}", insights.did_you_know));

    sections.join("\n\n")
}

/// Render ranked built-in recommendations.
pub fn render_scored_recipes(recipes: &[ScoredRecipe]) -> String {
    let mut out = String::from("👨‍🍳 **Smart Recipe Recommendations:**\n");

    for (i, scored) in recipes.iter().enumerate() {
        let recipe = &scored.recipe;
        out.push_str(&format!(
            "\n**{}. {}** ⭐ {}% Match\n",
            i + 1,
            recipe.name,
            scored.match_score
        ));
        out.push_str(&format!(
            "🍽️ {} Cuisine | ⏱️ {} minutes | Difficulty: {}\n",
            recipe.cuisine, recipe.prep_time_minutes, recipe.difficulty
        ));

        let have: Vec<String> = recipe
            .ingredients
            .iter()
            .map(|ing| display_name(ing))
            .filter(|name| !scored.missing_ingredients.contains(name))
            .collect();
        if !have.is_empty() {
            out.push_str(&format!("✅ You have: {}\n", have.join(", ")));
        }
        if !scored.missing_ingredients.is_empty() {
            out.push_str(&format!(
                "🛒 Need to buy: {}\n",
                scored.missing_ingredients.join(", ")
            ));
        }

        out.push_str("**Instructions:**\n");
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", step + 1, instruction));
        }

        let tips = cooking_tips(recipe);
        if !tips.is_empty() {
            out.push_str("💡 **Pro Tips:**\n");
            for tip in tips.iter().take(2) {
                out.push_str(&format!("- {tip}\n"));
            }
        }

        out.push_str(&format!(
            "🌱 Waste Reduction Score: {}%\n",
            recipe.waste_reduction_score
        ));
    }

    out.trim_end().to_string()
}

/// Render results from the external search fallback.
pub fn render_external_recipes(recipes: &[ExternalRecipe]) -> String {
    let mut out = String::from("🍳 **Recipes You Can Try:**\n\n");
    for (i, recipe) in recipes.iter().enumerate() {
        let mut ingredients = recipe.ingredients.replace(',', ", ");
        if ingredients.chars().count() > 80 {
            ingredients = ingredients.chars().take(80).collect();
            ingredients.push_str("...");
        }
        out.push_str(&format!("{}. **{}**\n", i + 1, recipe.title));
        if !ingredients.is_empty() {
            out.push_str(&format!("   *Ingredients: {ingredients}*\n"));
        }
        out.push_str(&format!("   [📖 View Recipe]({})\n", recipe.href));
    }
    out.trim_end().to_string()
}

/// Render per-cuisine suggestion buckets.
pub fn render_cuisine_suggestions(suggestions: &[(Cuisine, Vec<ScoredRecipe>)]) -> String {
    if suggestions.is_empty() {
        return "No cuisine suggestions cleared the bar for those ingredients.".to_string();
    }
    let mut out = String::new();
    for (cuisine, bucket) in suggestions {
        out.push_str(&format!("## {cuisine}\n\n"));
        out.push_str(&render_scored_recipes(bucket));
        out.push_str("\n\n");
    }
    out.trim_end().to_string()
}

/// Render creative category-based combinations.
pub fn render_creative(combinations: &[CreativeCombination]) -> String {
    let mut out = String::from("✨ **Creative Combinations:**\n\n");
    for combo in combinations {
        out.push_str(&format!(
            "**{}** (creativity {}%)\n{}\n⏱️ About {} minutes | Uses: {}\n\n",
            combo.name,
            combo.creativity_score,
            combo.description,
            combo.estimated_prep_minutes,
            combo
                .ingredients_used
                .iter()
                .map(|i| display_name(i))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    out.trim_end().to_string()
}

/// Render dietary substitutions applied to a recipe.
pub fn render_substitutions(personalized: &PersonalizedRecipe) -> String {
    if personalized.substitutions.is_empty() {
        return String::new();
    }
    let swaps: Vec<String> = personalized
        .substitutions
        .iter()
        .map(|s| s.to_string())
        .collect();
    format!("🔄 Swaps for your diet: {}", swaps.join(", "))
}

/// Render the environmental impact report.
pub fn render_impact(report: &ImpactReport, achievement: AchievementLevel) -> String {
    let mut out = String::from("🌍 **Environmental Impact Analysis:**\n\n");
    out.push_str("**Your Waste Reduction Impact:**\n");
    out.push_str(&format!(
        "💧 Water Saved: {} liters\n",
        report.totals.water_saved_liters
    ));
    out.push_str(&format!(
        "🌱 CO₂ Reduced: {} kg\n",
        report.totals.co2_reduced_kg
    ));
    out.push_str(&format!(
        "💰 Money Saved: ${}\n\n",
        report.totals.money_saved_usd
    ));

    out.push_str("**That's equivalent to:**\n");
    out.push_str(&format!(
        "🚿 {} shower(s) worth of water\n",
        report.equivalents.showers_saved
    ));
    out.push_str(&format!(
        "🌳 Planting {} tree(s)\n",
        report.equivalents.trees_planted
    ));
    out.push_str(&format!(
        "🍽️ Funding {} meal(s) for someone in need\n\n",
        report.equivalents.meals_funded
    ));

    out.push_str(&format!(
        "**Achievement Unlocked:** {} {}\n*{}*",
        achievement.badge(),
        achievement.title(),
        achievement.description()
    ));
    out
}

/// Render a weekly meal plan; `max_days` keeps chat replies short.
pub fn render_meal_plan(
    plan: &WeeklyMealPlan,
    challenge: Option<&WeeklyChallenge>,
    max_days: usize,
) -> String {
    let mut out = String::from("📅 **Your Personalized Weekly Meal Plan**\n\n");

    for day in plan.days.iter().take(max_days) {
        out.push_str(&format!(
            "**{}** ({}):\n",
            day.weekday_name(),
            day.date.format("%Y-%m-%d")
        ));
        for meal in &day.meals {
            out.push_str(&format!(
                "- {}: {} ({} min)\n",
                meal.slot, meal.name, meal.prep_minutes
            ));
        }
        out.push_str(&format!("💡 *{}*\n\n", day.daily_tip));
    }

    if !plan.shopping_list.is_empty() {
        out.push_str("🛒 **Smart Shopping List:**\n");
        for (category, items) in &plan.shopping_list {
            out.push_str(&format!("**{}:** {}\n", category, items.join(", ")));
        }
        out.push('\n');
    }

    out.push_str("🌱 **Waste Reduction Potential:**\n");
    out.push_str(&format!(
        "- Food Saved: {} kg\n",
        plan.waste_reduction.food_saved_kg
    ));
    out.push_str(&format!(
        "- Money Saved: ${}\n",
        plan.waste_reduction.money_saved_usd
    ));
    out.push_str(&format!(
        "- CO₂ Reduced: {} kg\n",
        plan.waste_reduction.co2_reduced_kg
    ));
    out.push_str(&format!(
        "- Waste Reduction: {}%\n\n",
        plan.waste_reduction.waste_reduction_pct
    ));

    out.push_str("📋 **Pro Tips:**\n");
    for tip in plan.planning_tips.iter().take(3) {
        out.push_str(&format!("- {tip}\n"));
    }

    if let Some(challenge) = challenge {
        out.push_str(&format!(
            "\n🏆 **This Week's Challenge:** {}\n*{}*\n**Target:** {}",
            challenge.title, challenge.description, challenge.target
        ));
    }

    out.trim_end().to_string()
}

/// Render expiration forecasts, most urgent first.
pub fn render_forecasts(forecasts: &[ExpirationForecast]) -> String {
    let mut out = String::from("⏳ **Expiration Forecast:**\n\n");
    for forecast in forecasts {
        out.push_str(&format!(
            "**{}** ({}): {} day(s) left, expires {} - {}\n",
            forecast.ingredient,
            forecast.location,
            forecast.days_remaining,
            forecast.expiration_date.format("%Y-%m-%d"),
            forecast.urgency.label()
        ));
        if !forecast.spoilage_signs.is_empty() {
            out.push_str(&format!(
                "   Watch for: {}\n",
                forecast.spoilage_signs.join(", ")
            ));
        }
        for tip in &forecast.storage_tips {
            out.push_str(&format!("   - {tip}\n"));
        }
    }
    out.trim_end().to_string()
}

/// Render the daily sustainability fact.
pub fn render_fact(fact: &SustainabilityFact) -> String {
    format!(
        "🌿 **Did you know?** {}\n**Try this:** {} (impact: {})",
        fact.fact, fact.action, fact.impact
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sage_core::coach::{Coach, ConversationEntry};
    use sage_core::config::CoachConfig;
    use sage_core::search::DisabledSearch;
    use sage_core::tables::ReferenceTables;
    use sage_core::variety::Variety;

    fn offline_coach() -> Coach {
        let mut config = CoachConfig::default();
        config.search.enabled = false;
        Coach::with_parts(
            ReferenceTables::with_nutrition(Vec::new()),
            config,
            Box::new(DisabledSearch),
            Variety::seeded(42),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_help_reply_renders_usage() {
        let mut coach = offline_coach();
        let text = render_reply(&coach.respond("", &[], today()));
        assert!(text.contains("tomato, bread, cheese"));
    }

    #[test]
    fn test_insights_reply_sections() {
        let mut coach = offline_coach();
        let text = render_reply(&coach.respond("tomato, bread, cheese", &[], today()));
        assert!(text.contains("Smart Recipe Recommendations"));
        assert!(text.contains("Classic Margherita Pizza"));
        assert!(text.contains("Need to buy: Basil"));
        assert!(text.contains("Environmental Impact Analysis"));
        assert!(text.contains("Did You Know?"));
    }

    #[test]
    fn test_meal_plan_reply_shows_three_days() {
        let mut coach = offline_coach();
        let history: Vec<ConversationEntry> = Vec::new();
        let text = render_reply(&coach.respond("meal plan for rice, eggs", &history, today()));
        assert!(text.contains("Weekly Meal Plan"));
        assert!(text.contains("Monday"));
        assert!(text.contains("Wednesday"));
        assert!(!text.contains("Thursday"));
        assert!(text.contains("This Week's Challenge"));
    }

    #[test]
    fn test_apology_constant_used() {
        let text = render_reply(&CoachReply::Apology);
        assert_eq!(text, APOLOGY);
    }

    #[test]
    fn test_external_recipe_rendering_truncates_ingredients() {
        let recipes = vec![ExternalRecipe {
            title: "Everything Soup".to_string(),
            href: "http://example.com".to_string(),
            ingredients: "a".repeat(100),
        }];
        let text = render_external_recipes(&recipes);
        assert!(text.contains("..."));
        assert!(text.contains("Everything Soup"));
    }
}
