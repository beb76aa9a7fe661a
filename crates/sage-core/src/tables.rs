//! Immutable reference tables, built once at startup.
//!
//! Every component borrows the same `ReferenceTables`; request
//! processing never mutates it. Anything that looks like mutation
//! (categorizing, personalizing) allocates fresh result structures.
//!
//! The nutrition/storage dataset is the only externally loaded table;
//! a missing or unreadable file degrades to an empty table and every
//! lookup against it simply misses.

use crate::error::SageError;
use crate::matcher::{self, MatchResult};
use crate::recipes::{builtin_recipes, Recipe};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One row of the nutrition/storage dataset, per 100 g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub ingredient: String,
    pub calories_per_100g: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub storage_tip: Option<String>,
}

/// Environmental cost of producing 1 kg of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactors {
    pub water_liters: f64,
    pub co2_kg: f64,
    pub land_m2: f64,
    pub cost_usd: f64,
}

/// Where an ingredient is kept. Shelf-life profiles are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    Fridge,
    Counter,
    Freezer,
    Pantry,
    /// Cooked leftovers in the fridge (grains mostly).
    CookedFridge,
}

impl StorageLocation {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fridge" => Some(Self::Fridge),
            "counter" => Some(Self::Counter),
            "freezer" => Some(Self::Freezer),
            "pantry" => Some(Self::Pantry),
            "cooked_fridge" | "cooked-fridge" => Some(Self::CookedFridge),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fridge => "fridge",
            Self::Counter => "counter",
            Self::Freezer => "freezer",
            Self::Pantry => "pantry",
            Self::CookedFridge => "cooked_fridge",
        };
        write!(f, "{}", s)
    }
}

/// Shelf life per storage location (fractional days allowed) plus the
/// signs that an ingredient has turned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationProfile {
    pub shelf_life_days: Vec<(StorageLocation, f64)>,
    pub spoilage_signs: Vec<String>,
}

impl ExpirationProfile {
    /// Shelf life at `location`, falling back to the fridge figure and
    /// finally to a one-week default.
    pub fn days_at(&self, location: StorageLocation) -> f64 {
        self.shelf_life_days
            .iter()
            .find(|(loc, _)| *loc == location)
            .or_else(|| {
                self.shelf_life_days
                    .iter()
                    .find(|(loc, _)| *loc == StorageLocation::Fridge)
            })
            .map(|(_, days)| *days)
            .unwrap_or(7.0)
    }
}

/// Dietary preferences with substitution support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegan,
    GlutenFree,
    DairyFree,
    Keto,
}

impl DietaryPreference {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "vegan" => Some(Self::Vegan),
            "gluten_free" => Some(Self::GlutenFree),
            "dairy_free" => Some(Self::DairyFree),
            "keto" => Some(Self::Keto),
            _ => None,
        }
    }
}

impl std::fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten_free",
            Self::DairyFree => "dairy_free",
            Self::Keto => "keto",
        };
        write!(f, "{}", s)
    }
}

/// Fixed ingredient categories used by the categorizer and the creative
/// combination synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Proteins,
    Grains,
    Vegetables,
    Dairy,
    Pantry,
}

impl std::fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Proteins => "proteins",
            Self::Grains => "grains",
            Self::Vegetables => "vegetables",
            Self::Dairy => "dairy",
            Self::Pantry => "pantry",
        };
        write!(f, "{}", s)
    }
}

/// Category keyword lists; first matching category wins.
pub const CATEGORY_KEYWORDS: &[(IngredientCategory, &[&str])] = &[
    (
        IngredientCategory::Proteins,
        &["chicken", "beef", "pork", "fish", "eggs", "beans", "tofu", "cheese"],
    ),
    (
        IngredientCategory::Grains,
        &["rice", "pasta", "bread", "quinoa", "oats", "noodles"],
    ),
    (
        IngredientCategory::Vegetables,
        &["tomato", "onion", "garlic", "carrot", "potato", "pepper", "broccoli", "spinach"],
    ),
    (
        IngredientCategory::Dairy,
        &["milk", "cheese", "yogurt", "butter", "cream"],
    ),
    (
        IngredientCategory::Pantry,
        &["oil", "vinegar", "soy_sauce", "herbs", "spices", "salt", "pepper"],
    ),
];

/// Which reference table a generic lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Nutrition,
    Impact,
    Expiration,
}

/// The reference-table object. Built once, shared read-only.
#[derive(Debug)]
pub struct ReferenceTables {
    nutrition: Vec<NutritionRecord>,
    impact: Vec<(String, ImpactFactors)>,
    default_impact: ImpactFactors,
    expiration: Vec<(String, ExpirationProfile)>,
    default_expiration: ExpirationProfile,
    substitutions: Vec<(DietaryPreference, Vec<(String, String)>)>,
    recipes: Vec<Recipe>,
}

impl ReferenceTables {
    /// Build the tables, loading the nutrition dataset from `path`.
    /// Dataset problems are soft: the table loads empty and is logged.
    pub fn load(nutrition_path: &Path) -> Self {
        let nutrition = match load_nutrition_records(nutrition_path) {
            Ok(records) => {
                info!("Loaded {} nutrition records", records.len());
                records
            }
            Err(e) => {
                warn!(
                    "Nutrition dataset unavailable at {}: {e}; lookups will miss",
                    nutrition_path.display()
                );
                Vec::new()
            }
        };
        Self::with_nutrition(nutrition)
    }

    /// Build with explicit nutrition records (tests substitute tables
    /// this way).
    pub fn with_nutrition(nutrition: Vec<NutritionRecord>) -> Self {
        Self {
            nutrition,
            impact: builtin_impact_factors(),
            default_impact: DEFAULT_IMPACT,
            expiration: builtin_expiration_profiles(),
            default_expiration: default_expiration_profile(),
            substitutions: builtin_substitutions(),
            recipes: builtin_recipes(),
        }
    }

    /// Replace the recipe database; substitute tables make component
    /// behavior observable in isolation.
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn nutrition_record(&self, key: &str) -> Option<&NutritionRecord> {
        let key = matcher::normalize(key);
        self.nutrition
            .iter()
            .find(|r| matcher::normalize(&r.ingredient) == key)
    }

    pub fn nutrition_names(&self) -> impl Iterator<Item = &str> {
        self.nutrition.iter().map(|r| r.ingredient.as_str())
    }

    pub fn nutrition_is_empty(&self) -> bool {
        self.nutrition.is_empty()
    }

    pub fn impact_entries(&self) -> &[(String, ImpactFactors)] {
        &self.impact
    }

    pub fn default_impact(&self) -> ImpactFactors {
        self.default_impact
    }

    pub fn expiration_entries(&self) -> &[(String, ExpirationProfile)] {
        &self.expiration
    }

    pub fn default_expiration(&self) -> &ExpirationProfile {
        &self.default_expiration
    }

    pub fn substitutions_for(&self, preference: DietaryPreference) -> &[(String, String)] {
        self.substitutions
            .iter()
            .find(|(pref, _)| *pref == preference)
            .map(|(_, pairs)| pairs.as_slice())
            .unwrap_or(&[])
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Generic lookup through the three-tier match policy against one
    /// table's key set.
    pub fn lookup(
        &self,
        ingredient: &str,
        table: TableKind,
        min_confidence: u32,
    ) -> Option<MatchResult> {
        match table {
            TableKind::Nutrition => matcher::match_ingredient(
                ingredient,
                self.nutrition.iter().map(|r| r.ingredient.as_str()),
                min_confidence,
            ),
            TableKind::Impact => matcher::match_ingredient(
                ingredient,
                self.impact.iter().map(|(k, _)| k.as_str()),
                min_confidence,
            ),
            TableKind::Expiration => matcher::match_ingredient(
                ingredient,
                self.expiration.iter().map(|(k, _)| k.as_str()),
                min_confidence,
            ),
        }
    }
}

fn load_nutrition_records(path: &Path) -> Result<Vec<NutritionRecord>, SageError> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<NutritionRecord> = serde_json::from_str(&contents)?;
    Ok(records)
}

const DEFAULT_IMPACT: ImpactFactors = ImpactFactors {
    water_liters: 1000.0,
    co2_kg: 2.0,
    land_m2: 0.05,
    cost_usd: 3.00,
};

fn builtin_impact_factors() -> Vec<(String, ImpactFactors)> {
    fn entry(name: &str, water: f64, co2: f64, land: f64, cost: f64) -> (String, ImpactFactors) {
        (
            name.to_string(),
            ImpactFactors {
                water_liters: water,
                co2_kg: co2,
                land_m2: land,
                cost_usd: cost,
            },
        )
    }
    vec![
        entry("tomato", 150.0, 0.7, 0.02, 3.50),
        entry("bread", 1100.0, 1.2, 0.15, 2.80),
        entry("cheese", 5000.0, 8.9, 0.25, 12.00),
        entry("chicken", 4325.0, 6.9, 0.18, 8.50),
        entry("beef", 15400.0, 60.0, 1.25, 18.00),
        entry("milk", 1000.0, 3.2, 0.09, 4.20),
        entry("rice", 2500.0, 2.7, 0.07, 2.10),
        entry("potato", 287.0, 0.3, 0.03, 1.80),
        entry("apple", 822.0, 0.4, 0.04, 3.20),
        entry("carrot", 131.0, 0.2, 0.02, 1.90),
        entry("onion", 272.0, 0.3, 0.02, 1.60),
        entry("pasta", 1850.0, 1.1, 0.12, 1.50),
        entry("eggs", 3300.0, 4.8, 0.16, 4.50),
        entry("fish", 2500.0, 3.0, 0.05, 15.00),
    ]
}

fn builtin_expiration_profiles() -> Vec<(String, ExpirationProfile)> {
    use StorageLocation::*;
    fn profile(
        name: &str,
        shelf_life: &[(StorageLocation, f64)],
        signs: &[&str],
    ) -> (String, ExpirationProfile) {
        (
            name.to_string(),
            ExpirationProfile {
                shelf_life_days: shelf_life.to_vec(),
                spoilage_signs: signs.iter().map(|s| s.to_string()).collect(),
            },
        )
    }
    vec![
        // Fresh produce
        profile("tomato", &[(Fridge, 7.0), (Counter, 3.0)], &["soft spots", "wrinkled skin", "mold"]),
        profile("banana", &[(Fridge, 10.0), (Counter, 4.0)], &["brown spots", "mushy texture", "strong odor"]),
        profile("apple", &[(Fridge, 30.0), (Counter, 7.0)], &["brown spots", "soft texture", "wrinkled skin"]),
        profile("lettuce", &[(Fridge, 10.0), (Counter, 2.0)], &["wilted leaves", "brown edges", "slimy texture"]),
        profile("carrot", &[(Fridge, 21.0), (Counter, 7.0)], &["white spots", "rubbery texture", "black spots"]),
        profile("onion", &[(Fridge, 30.0), (Counter, 14.0)], &["soft spots", "sprouting", "mold"]),
        profile("potato", &[(Fridge, 14.0), (Counter, 21.0)], &["green spots", "sprouting", "soft spots"]),
        // Dairy
        profile("milk", &[(Fridge, 7.0), (Counter, 0.5)], &["sour smell", "chunky texture", "separation"]),
        profile("cheese", &[(Fridge, 14.0), (Counter, 2.0)], &["mold growth", "strong odor", "hard texture"]),
        profile("yogurt", &[(Fridge, 14.0), (Counter, 1.0)], &["separation", "mold", "off smell"]),
        // Proteins
        profile("chicken", &[(Fridge, 2.0), (Freezer, 180.0)], &["gray color", "slimy texture", "off odor"]),
        profile("beef", &[(Fridge, 3.0), (Freezer, 240.0)], &["brown color", "sticky texture", "sour smell"]),
        profile("fish", &[(Fridge, 2.0), (Freezer, 90.0)], &["fishy odor", "slimy texture", "cloudy eyes"]),
        profile("eggs", &[(Fridge, 28.0), (Counter, 7.0)], &["cracked shell", "floating in water", "sulfur smell"]),
        // Grains and pantry
        profile("rice", &[(Pantry, 365.0), (CookedFridge, 3.0)], &["insects", "musty smell", "hard texture"]),
        profile("pasta", &[(Pantry, 730.0), (CookedFridge, 5.0)], &["insects", "stale smell", "brittle texture"]),
        profile("bread", &[(Counter, 5.0), (Fridge, 10.0), (Freezer, 90.0)], &["mold spots", "hard texture", "stale smell"]),
    ]
}

fn default_expiration_profile() -> ExpirationProfile {
    ExpirationProfile {
        shelf_life_days: vec![
            (StorageLocation::Fridge, 7.0),
            (StorageLocation::Counter, 3.0),
        ],
        spoilage_signs: vec![
            "changes in texture".to_string(),
            "off odor".to_string(),
            "discoloration".to_string(),
        ],
    }
}

fn builtin_substitutions() -> Vec<(DietaryPreference, Vec<(String, String)>)> {
    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }
    vec![
        (
            DietaryPreference::Vegan,
            pairs(&[
                ("milk", "almond milk"),
                ("butter", "coconut oil"),
                ("cheese", "nutritional yeast"),
                ("eggs", "flax eggs"),
                ("chicken", "tofu"),
                ("beef", "mushrooms"),
            ]),
        ),
        (
            DietaryPreference::GlutenFree,
            pairs(&[
                ("bread", "gluten-free bread"),
                ("pasta", "rice noodles"),
                ("flour", "almond flour"),
                ("soy_sauce", "tamari"),
            ]),
        ),
        (
            DietaryPreference::DairyFree,
            pairs(&[
                ("milk", "oat milk"),
                ("cheese", "dairy-free cheese"),
                ("butter", "vegan butter"),
                ("yogurt", "coconut yogurt"),
            ]),
        ),
        (
            DietaryPreference::Keto,
            pairs(&[
                ("rice", "cauliflower rice"),
                ("pasta", "zucchini noodles"),
                ("potato", "turnip"),
                ("bread", "cloud bread"),
            ]),
        ),
    ]
}
