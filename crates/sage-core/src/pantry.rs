//! Expiration forecasting and optimal-storage guidance.
//!
//! Shelf-life profiles are looked up by containment; unknown
//! ingredients get a conservative default profile rather than an error.

use crate::matcher::{contains_either_way, normalize};
use crate::tables::{ExpirationProfile, ReferenceTables, StorageLocation};
use crate::text::display_name;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// How soon an ingredient needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn for_days(days_remaining: f64) -> Self {
        if days_remaining <= 1.0 {
            Self::Critical
        } else if days_remaining <= 3.0 {
            Self::High
        } else if days_remaining <= 7.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical - Use Today!",
            Self::High => "High - Use Soon",
            Self::Medium => "Medium - Plan Usage",
            Self::Low => "Low - Fresh",
        }
    }

    /// Display color, hex.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "#dc3545",
            Self::High => "#fd7e14",
            Self::Medium => "#ffc107",
            Self::Low => "#28a745",
        }
    }
}

/// Forecast for one ingredient at one storage location.
#[derive(Debug, Clone, Serialize)]
pub struct ExpirationForecast {
    pub ingredient: String,
    pub location: StorageLocation,
    pub days_remaining: f64,
    pub expiration_date: NaiveDate,
    pub urgency: Urgency,
    pub spoilage_signs: Vec<String>,
    pub storage_tips: Vec<String>,
}

fn profile_for<'a>(tables: &'a ReferenceTables, ingredient: &str) -> &'a ExpirationProfile {
    tables
        .expiration_entries()
        .iter()
        .find(|(name, _)| contains_either_way(name, ingredient))
        .map(|(_, profile)| profile)
        .unwrap_or_else(|| tables.default_expiration())
}

const FRIDGE_TIPS: &[&str] = &[
    "Store in airtight container to prevent moisture loss",
    "Keep away from strong-smelling foods",
    "Check regularly for signs of spoilage",
];

const COUNTER_TIPS: &[&str] = &[
    "Keep in cool, dry place away from direct sunlight",
    "Ensure good air circulation",
    "Store away from heat sources",
];

const FREEZER_TIPS: &[&str] = &[
    "Wrap tightly to prevent freezer burn",
    "Label with date for easy tracking",
    "Use freezer-safe containers",
];

const SPECIFIC_TIPS: &[(&str, &str)] = &[
    ("banana", "Store separately as they release ethylene gas"),
    ("tomato", "Store stem-side down to prevent moisture loss"),
    ("potato", "Store in dark place to prevent greening"),
    ("onion", "Store in well-ventilated area"),
    ("bread", "Store in breadbox or sealed container"),
];

/// General tips for the location plus at most one ingredient-specific
/// tip, capped at three lines.
fn optimal_storage_tips(ingredient: &str, location: StorageLocation) -> Vec<String> {
    let general: &[&str] = match location {
        StorageLocation::Fridge | StorageLocation::CookedFridge => FRIDGE_TIPS,
        StorageLocation::Counter => COUNTER_TIPS,
        StorageLocation::Freezer => FREEZER_TIPS,
        StorageLocation::Pantry => &[],
    };

    let mut tips: Vec<String> = general.iter().map(|s| s.to_string()).collect();

    let key = normalize(ingredient);
    for (name, tip) in SPECIFIC_TIPS {
        if key.contains(name) {
            tips.push(tip.to_string());
            break;
        }
    }

    tips.truncate(3);
    tips
}

/// Predict when `ingredient` stored at `location` expires, counting
/// from `today`.
pub fn predict_expiration(
    tables: &ReferenceTables,
    ingredient: &str,
    location: StorageLocation,
    today: NaiveDate,
) -> ExpirationForecast {
    let profile = profile_for(tables, ingredient);
    let days_remaining = profile.days_at(location);
    let expiration_date = today + Duration::days(days_remaining.floor() as i64);

    ExpirationForecast {
        ingredient: display_name(ingredient),
        location,
        days_remaining,
        expiration_date,
        urgency: Urgency::for_days(days_remaining),
        spoilage_signs: profile.spoilage_signs.clone(),
        storage_tips: optimal_storage_tips(ingredient, location),
    }
}

/// Forecast a whole list, most urgent first.
pub fn forecast_all(
    tables: &ReferenceTables,
    ingredients: &[String],
    location: StorageLocation,
    today: NaiveDate,
) -> Vec<ExpirationForecast> {
    let mut forecasts: Vec<ExpirationForecast> = ingredients
        .iter()
        .map(|ing| predict_expiration(tables, ing, location, today))
        .collect();
    forecasts.sort_by(|a, b| {
        a.days_remaining
            .partial_cmp(&b.days_remaining)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    forecasts
}

/// True when a forecast warrants a prominent warning.
pub fn is_urgent(forecast: &ExpirationForecast) -> bool {
    forecast.days_remaining <= 3.0
}
