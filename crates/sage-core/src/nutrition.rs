//! Nutrition-facts and storage-tip lookups.
//!
//! Thin facade over the nutrition table through the shared match
//! primitive. A miss is `None`, never an error; callers skip the
//! missing section.

use crate::tables::{ReferenceTables, TableKind};
use serde::Serialize;

/// Per-100 g facts for a matched ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionFacts {
    pub calories_per_100g: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Facts for `ingredient`, if the table knows something close enough.
pub fn nutrition_facts(
    tables: &ReferenceTables,
    ingredient: &str,
    min_confidence: u32,
) -> Option<NutritionFacts> {
    let hit = tables.lookup(ingredient, TableKind::Nutrition, min_confidence)?;
    let record = tables.nutrition_record(&hit.key)?;
    Some(NutritionFacts {
        calories_per_100g: record.calories_per_100g,
        protein_g: record.protein_g,
        carbs_g: record.carbs_g,
        fat_g: record.fat_g,
    })
}

/// Storage tip for `ingredient`. Empty tips are treated as absent.
pub fn storage_tip(
    tables: &ReferenceTables,
    ingredient: &str,
    min_confidence: u32,
) -> Option<String> {
    let hit = tables.lookup(ingredient, TableKind::Nutrition, min_confidence)?;
    let record = tables.nutrition_record(&hit.key)?;
    record
        .storage_tip
        .as_ref()
        .map(|tip| tip.trim())
        .filter(|tip| !tip.is_empty())
        .map(|tip| tip.to_string())
}
