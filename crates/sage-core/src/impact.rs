//! Environmental and economic impact of rescuing ingredients.
//!
//! Coefficient lookups use exact key, then containment, then a default
//! set -- unknown ingredients never fail, they estimate. Per-request
//! weights come from the injectable randomness source so totals are
//! reproducible under a fixed seed.

use crate::matcher::normalize;
use crate::tables::{ImpactFactors, ReferenceTables};
use crate::text::display_name;
use crate::variety::Variety;
use serde::Serialize;

/// Default assumed weight when the caller does not provide one.
pub const DEFAULT_WEIGHT_KG: f64 = 0.5;

/// One tree absorbs roughly this much CO2 per year, kg.
const TREE_CO2_KG_PER_YEAR: f64 = 22.0;
/// Liters per shower.
const SHOWER_LITERS: f64 = 50.0;
/// USD per funded meal.
const MEAL_COST_USD: f64 = 8.0;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Impact of rescuing one ingredient at a given weight.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientImpact {
    pub ingredient: String,
    pub weight_kg: f64,
    pub water_saved_liters: f64,
    pub co2_reduced_kg: f64,
    pub land_saved_m2: f64,
    pub money_saved_usd: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImpactTotals {
    pub water_saved_liters: f64,
    pub co2_reduced_kg: f64,
    pub land_saved_m2: f64,
    pub money_saved_usd: f64,
}

/// Tangible comparisons for the totals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpactEquivalents {
    pub trees_planted: f64,
    pub showers_saved: u32,
    pub meals_funded: u32,
}

/// Progress toward fixed per-request goals, percentages capped at 100.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GoalProgress {
    pub water_pct: f64,
    pub co2_pct: f64,
    pub money_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub ingredients: Vec<IngredientImpact>,
    pub totals: ImpactTotals,
    pub equivalents: ImpactEquivalents,
    pub goal_progress: GoalProgress,
}

/// Coefficients for an ingredient: exact key, containment either way,
/// then the default set.
fn factors_for(tables: &ReferenceTables, ingredient: &str) -> ImpactFactors {
    let key = normalize(ingredient);

    for (name, factors) in tables.impact_entries() {
        if *name == key {
            return *factors;
        }
    }
    for (name, factors) in tables.impact_entries() {
        if key.contains(name.as_str()) || name.contains(&key) {
            return *factors;
        }
    }
    tables.default_impact()
}

/// Impact of one ingredient at `weight_kg`.
pub fn calculate_ingredient_impact(
    tables: &ReferenceTables,
    ingredient: &str,
    weight_kg: f64,
) -> IngredientImpact {
    let factors = factors_for(tables, ingredient);
    IngredientImpact {
        ingredient: display_name(ingredient),
        weight_kg,
        water_saved_liters: round_to(factors.water_liters * weight_kg, 1),
        co2_reduced_kg: round_to(factors.co2_kg * weight_kg, 2),
        land_saved_m2: round_to(factors.land_m2 * weight_kg, 3),
        money_saved_usd: round_to(factors.cost_usd * weight_kg, 2),
    }
}

/// Aggregate impact over all ingredients; per-ingredient weights are
/// drawn from `variety` (0.3-0.8 kg each).
pub fn calculate_total_impact(
    tables: &ReferenceTables,
    ingredients: &[String],
    variety: &mut Variety,
) -> ImpactReport {
    let mut per_ingredient = Vec::new();
    let mut totals = ImpactTotals::default();

    for ingredient in ingredients {
        let weight = variety.weight_kg();
        let impact = calculate_ingredient_impact(tables, ingredient, weight);
        totals.water_saved_liters += impact.water_saved_liters;
        totals.co2_reduced_kg += impact.co2_reduced_kg;
        totals.land_saved_m2 += impact.land_saved_m2;
        totals.money_saved_usd += impact.money_saved_usd;
        per_ingredient.push(impact);
    }

    let equivalents = ImpactEquivalents {
        trees_planted: round_to(totals.co2_reduced_kg / TREE_CO2_KG_PER_YEAR, 1),
        showers_saved: (totals.water_saved_liters / SHOWER_LITERS).round() as u32,
        meals_funded: (totals.money_saved_usd / MEAL_COST_USD).round() as u32,
    };

    let goal_progress = GoalProgress {
        water_pct: round_to(totals.water_saved_liters / 10_000.0 * 100.0, 2).min(100.0),
        co2_pct: round_to(totals.co2_reduced_kg / 100.0 * 100.0, 2).min(100.0),
        money_pct: round_to(totals.money_saved_usd / 50.0 * 100.0, 2).min(100.0),
    };

    ImpactReport {
        ingredients: per_ingredient,
        totals: ImpactTotals {
            water_saved_liters: round_to(totals.water_saved_liters, 1),
            co2_reduced_kg: round_to(totals.co2_reduced_kg, 2),
            land_saved_m2: round_to(totals.land_saved_m2, 3),
            money_saved_usd: round_to(totals.money_saved_usd, 2),
        },
        equivalents,
        goal_progress,
    }
}

/// Achievement ladder keyed on CO2 saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AchievementLevel {
    ClimateHero,
    EcoWarrior,
    GreenChampion,
    EarthFriend,
    GettingStarted,
}

impl AchievementLevel {
    pub fn for_co2_kg(co2_kg: f64) -> Self {
        if co2_kg >= 50.0 {
            Self::ClimateHero
        } else if co2_kg >= 20.0 {
            Self::EcoWarrior
        } else if co2_kg >= 10.0 {
            Self::GreenChampion
        } else if co2_kg >= 5.0 {
            Self::EarthFriend
        } else {
            Self::GettingStarted
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ClimateHero => "Climate Hero",
            Self::EcoWarrior => "Eco Warrior",
            Self::GreenChampion => "Green Champion",
            Self::EarthFriend => "Earth Friend",
            Self::GettingStarted => "Getting Started",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::ClimateHero => "🌟",
            Self::EcoWarrior => "🌿",
            Self::GreenChampion => "🌱",
            Self::EarthFriend => "🌍",
            Self::GettingStarted => "🌿",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClimateHero => "Outstanding environmental impact!",
            Self::EcoWarrior => "Great contribution to sustainability!",
            Self::GreenChampion => "Making a positive difference!",
            Self::EarthFriend => "Every action counts!",
            Self::GettingStarted => "Keep up the good work!",
        }
    }
}

/// A weekly sustainability challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyChallenge {
    pub title: &'static str,
    pub description: &'static str,
    pub target: &'static str,
}

const WEEKLY_CHALLENGES: &[WeeklyChallenge] = &[
    WeeklyChallenge {
        title: "Zero Vegetable Waste",
        description: "Use every part of your vegetables this week",
        target: "Save 10kg CO2 with vegetable scraps",
    },
    WeeklyChallenge {
        title: "Leftover Master",
        description: "Transform all leftovers into new meals",
        target: "Create 5 new recipes from leftovers",
    },
    WeeklyChallenge {
        title: "Storage Optimizer",
        description: "Perfect your food storage techniques",
        target: "Extend food life by 3+ days",
    },
    WeeklyChallenge {
        title: "Portion Pro",
        description: "Cook exact portions to minimize waste",
        target: "Zero plate waste for 7 days",
    },
];

/// Pick this week's challenge from the fixed pool.
pub fn weekly_challenge(variety: &mut Variety) -> WeeklyChallenge {
    *variety.pick(WEEKLY_CHALLENGES).unwrap_or(&WEEKLY_CHALLENGES[0])
}
