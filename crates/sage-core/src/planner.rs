//! Weekly meal planning around what the user already has.
//!
//! Meals come from fixed templates scored by ingredient overlap;
//! tie-breaks and daily tips go through the injectable randomness
//! source. The start date is a parameter so plans are reproducible.

use crate::matcher::contains_either_way;
use crate::text::display_name;
use crate::variety::Variety;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Assumed rescued food per matched ingredient, kg.
const FOOD_SAVED_PER_MATCH_KG: f64 = 0.2;
/// Assumed value of rescued food, USD per kg.
const MONEY_PER_KG_USD: f64 = 5.0;
/// Assumed CO2 avoided per kg of rescued food.
const CO2_PER_KG: f64 = 2.5;
/// Waste-reduction percentage is capped here.
const WASTE_PCT_CAP: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        };
        write!(f, "{}", s)
    }
}

struct MealTemplate {
    name: &'static str,
    ingredients: &'static [&'static str],
    prep_minutes: u32,
}

const BREAKFAST_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        name: "Veggie Omelet",
        ingredients: &["eggs", "onion", "bell pepper", "cheese"],
        prep_minutes: 10,
    },
    MealTemplate {
        name: "Fruit Smoothie Bowl",
        ingredients: &["banana", "berries", "yogurt", "oats"],
        prep_minutes: 5,
    },
    MealTemplate {
        name: "Avocado Toast",
        ingredients: &["bread", "avocado", "tomato", "eggs"],
        prep_minutes: 8,
    },
    MealTemplate {
        name: "Leftover Fried Rice",
        ingredients: &["rice", "eggs", "vegetables", "soy_sauce"],
        prep_minutes: 12,
    },
];

const LUNCH_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        name: "Quick Stir Fry",
        ingredients: &["vegetables", "protein", "rice", "garlic"],
        prep_minutes: 15,
    },
    MealTemplate {
        name: "Soup & Salad",
        ingredients: &["broth", "vegetables", "greens", "bread"],
        prep_minutes: 20,
    },
    MealTemplate {
        name: "Grain Bowl",
        ingredients: &["quinoa", "roasted_vegetables", "protein", "dressing"],
        prep_minutes: 25,
    },
    MealTemplate {
        name: "Leftover Remix",
        ingredients: &["yesterday_dinner", "fresh_herbs", "new_sauce"],
        prep_minutes: 8,
    },
];

const DINNER_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        name: "One-Pan Roasted Meal",
        ingredients: &["protein", "root_vegetables", "herbs", "olive_oil"],
        prep_minutes: 35,
    },
    MealTemplate {
        name: "Pasta Primavera",
        ingredients: &["pasta", "seasonal_vegetables", "garlic", "cheese"],
        prep_minutes: 20,
    },
    MealTemplate {
        name: "Sheet Pan Fish",
        ingredients: &["fish", "vegetables", "lemon", "herbs"],
        prep_minutes: 25,
    },
    MealTemplate {
        name: "Curry Night",
        ingredients: &["protein", "vegetables", "coconut_milk", "spices"],
        prep_minutes: 30,
    },
];

fn templates_for(slot: MealSlot) -> &'static [MealTemplate] {
    match slot {
        MealSlot::Breakfast => BREAKFAST_TEMPLATES,
        MealSlot::Lunch => LUNCH_TEMPLATES,
        MealSlot::Dinner => DINNER_TEMPLATES,
    }
}

const DAILY_TIPS: &[&str] = &[
    "Buy only what you need for the week",
    "Use older ingredients first (FIFO method)",
    "Transform leftovers into new meals",
    "Prep vegetables when you get home",
    "Freeze items before they spoil",
    "Make soup or smoothies with wilting produce",
    "Use herb stems in stocks and broths",
    "Keep a 'eat first' section in your fridge",
];

const PLANNING_TIPS: &[&str] = &[
    "Plan meals around ingredients you already have",
    "Cook larger portions and use leftovers creatively",
    "Prep ingredients in advance to save time",
    "Keep a flexible attitude - substitute similar ingredients",
    "Use seasonal produce for better flavor and lower cost",
    "Batch cook grains and proteins for the week",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

pub fn season_for(date: NaiveDate) -> Season {
    match date.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Fall,
        _ => Season::Winter,
    }
}

pub fn seasonal_ingredients(season: Season) -> &'static [&'static str] {
    match season {
        Season::Spring => &["asparagus", "peas", "radishes", "lettuce", "strawberries"],
        Season::Summer => &["tomatoes", "zucchini", "corn", "berries", "stone_fruits"],
        Season::Fall => &["squash", "apples", "root_vegetables", "brussels_sprouts", "pears"],
        Season::Winter => &["citrus", "cabbage", "potatoes", "onions", "carrots"],
    }
}

/// One selected meal with its overlap against the user's ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMeal {
    pub slot: MealSlot,
    pub name: String,
    pub ingredients: Vec<String>,
    pub prep_minutes: u32,
    /// Count of template requirements covered by the user's list; also
    /// the meal's waste-reduction potential.
    pub ingredient_overlap: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub meals: Vec<PlannedMeal>,
    pub daily_tip: String,
}

impl DayPlan {
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShoppingCategory {
    Proteins,
    Vegetables,
    Grains,
    Dairy,
    Pantry,
    Other,
}

impl std::fmt::Display for ShoppingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Proteins => "Proteins",
            Self::Vegetables => "Vegetables",
            Self::Grains => "Grains",
            Self::Dairy => "Dairy",
            Self::Pantry => "Pantry",
            Self::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// Shopping-list keyword buckets; distinct from the recipe categorizer
/// on purpose (the shopping list cares about store aisles).
const SHOPPING_KEYWORDS: &[(ShoppingCategory, &[&str])] = &[
    (
        ShoppingCategory::Proteins,
        &["chicken", "fish", "beef", "tofu", "eggs", "beans"],
    ),
    (
        ShoppingCategory::Vegetables,
        &["tomato", "onion", "garlic", "bell_pepper", "carrot", "broccoli", "spinach"],
    ),
    (
        ShoppingCategory::Grains,
        &["rice", "pasta", "bread", "quinoa", "oats"],
    ),
    (
        ShoppingCategory::Dairy,
        &["milk", "cheese", "yogurt", "butter"],
    ),
    (
        ShoppingCategory::Pantry,
        &["olive_oil", "spices", "herbs", "soy_sauce", "vinegar"],
    ),
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WasteReductionEstimate {
    pub food_saved_kg: f64,
    pub money_saved_usd: f64,
    pub co2_reduced_kg: f64,
    pub waste_reduction_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyMealPlan {
    pub days: Vec<DayPlan>,
    pub shopping_list: Vec<(ShoppingCategory, Vec<String>)>,
    pub waste_reduction: WasteReductionEstimate,
    pub seasonal_focus: Vec<String>,
    pub planning_tips: Vec<String>,
}

fn overlap_score(template: &MealTemplate, available: &[String]) -> u32 {
    template
        .ingredients
        .iter()
        .filter(|ing| available.iter().any(|a| contains_either_way(ing, a)))
        .count() as u32
}

fn select_meal(slot: MealSlot, available: &[String], variety: &mut Variety) -> PlannedMeal {
    let templates = templates_for(slot);
    let scores: Vec<u32> = templates
        .iter()
        .map(|t| overlap_score(t, available))
        .collect();
    let best = scores.iter().copied().max().unwrap_or(0);

    let best_templates: Vec<&MealTemplate> = templates
        .iter()
        .zip(&scores)
        .filter(|(_, s)| **s == best)
        .map(|(t, _)| t)
        .collect();

    // All candidates share the best score; pick any.
    let template = variety
        .pick(&best_templates)
        .copied()
        .unwrap_or(&templates[0]);

    PlannedMeal {
        slot,
        name: template.name.to_string(),
        ingredients: template.ingredients.iter().map(|s| s.to_string()).collect(),
        prep_minutes: template.prep_minutes,
        ingredient_overlap: best,
    }
}

fn shopping_list(
    days: &[DayPlan],
    available: &[String],
) -> Vec<(ShoppingCategory, Vec<String>)> {
    let mut needed: Vec<String> = Vec::new();
    for day in days {
        for meal in &day.meals {
            for ingredient in &meal.ingredients {
                let have = available.iter().any(|a| contains_either_way(ingredient, a));
                if !have && !needed.contains(ingredient) {
                    needed.push(ingredient.clone());
                }
            }
        }
    }

    let mut buckets: Vec<(ShoppingCategory, Vec<String>)> = SHOPPING_KEYWORDS
        .iter()
        .map(|(cat, _)| (*cat, Vec::new()))
        .collect();
    buckets.push((ShoppingCategory::Other, Vec::new()));

    for ingredient in needed {
        let category = SHOPPING_KEYWORDS
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|k| contains_either_way(k, &ingredient))
            })
            .map(|(cat, _)| *cat)
            .unwrap_or(ShoppingCategory::Other);

        if let Some((_, items)) = buckets.iter_mut().find(|(cat, _)| *cat == category) {
            items.push(display_name(&ingredient));
        }
    }

    buckets.retain(|(_, items)| !items.is_empty());
    buckets
}

fn waste_reduction(days: &[DayPlan]) -> WasteReductionEstimate {
    let total_meals = (days.len() * MealSlot::ALL.len()) as f64;
    let planned_usage: u32 = days
        .iter()
        .flat_map(|d| &d.meals)
        .map(|m| m.ingredient_overlap)
        .sum();
    let usage = planned_usage as f64;

    let food_saved_kg = usage * FOOD_SAVED_PER_MATCH_KG;
    WasteReductionEstimate {
        food_saved_kg: (food_saved_kg * 10.0).round() / 10.0,
        money_saved_usd: ((food_saved_kg * MONEY_PER_KG_USD) * 100.0).round() / 100.0,
        co2_reduced_kg: ((food_saved_kg * CO2_PER_KG) * 100.0).round() / 100.0,
        waste_reduction_pct: ((usage / total_meals * 100.0 * 10.0).round() / 10.0)
            .min(WASTE_PCT_CAP),
    }
}

/// Build a seven-day plan starting at `start`.
pub fn generate_weekly_plan(
    ingredients: &[String],
    start: NaiveDate,
    variety: &mut Variety,
) -> WeeklyMealPlan {
    let available: Vec<String> = ingredients.to_vec();

    let mut days = Vec::with_capacity(7);
    for offset in 0..7 {
        let date = start + Duration::days(offset);
        let meals = MealSlot::ALL
            .iter()
            .map(|slot| select_meal(*slot, &available, variety))
            .collect();
        let daily_tip = variety
            .pick(DAILY_TIPS)
            .copied()
            .unwrap_or(DAILY_TIPS[0])
            .to_string();
        days.push(DayPlan {
            date,
            meals,
            daily_tip,
        });
    }

    let shopping_list = shopping_list(&days, &available);
    let waste_reduction = waste_reduction(&days);
    let season = season_for(start);

    WeeklyMealPlan {
        days,
        shopping_list,
        waste_reduction,
        seasonal_focus: seasonal_ingredients(season)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        planning_tips: PLANNING_TIPS.iter().map(|s| s.to_string()).collect(),
    }
}
