//! Waste-prevention strategies and sustainability coaching.

use crate::matcher::normalize;
use crate::variety::Variety;
use serde::Serialize;

const FRUIT_KEYWORDS: &[&str] = &["apple", "banana", "berry", "orange", "grape"];
const VEGETABLE_KEYWORDS: &[&str] = &["carrot", "celery", "onion", "potato", "tomato"];
const HERB_KEYWORDS: &[&str] = &["basil", "parsley", "cilantro", "mint"];

const FRUIT_STRATEGIES: &[&str] = &[
    "Freeze overripe fruits for smoothies",
    "Make fruit leather or dried fruit",
    "Create fruit compotes or jams",
    "Blend into ice cream or sorbet",
];

const VEGETABLE_STRATEGIES: &[&str] = &[
    "Blanch and freeze for later use",
    "Make vegetable stock from scraps",
    "Pickle vegetables for preservation",
    "Dehydrate for veggie chips",
];

const HERB_STRATEGIES: &[&str] = &[
    "Freeze in ice cubes with oil",
    "Dry herbs for seasoning blends",
    "Make herb-infused oils",
    "Create pesto or herb butter",
];

const BREAD_STRATEGIES: &[&str] = &[
    "Make breadcrumbs for coating",
    "Create croutons for salads",
    "Transform into bread pudding",
    "Use for stuffing or dressing",
];

const GENERIC_STRATEGIES: &[&str] = &[
    "Store properly to extend freshness",
    "Use in multiple recipes to avoid waste",
    "Share with neighbors or friends",
    "Compost if no longer edible",
];

fn strategies_for(ingredient: &str) -> &'static [&'static str] {
    let key = normalize(ingredient);
    if FRUIT_KEYWORDS.iter().any(|k| key.contains(k)) {
        FRUIT_STRATEGIES
    } else if VEGETABLE_KEYWORDS.iter().any(|k| key.contains(k)) {
        VEGETABLE_STRATEGIES
    } else if HERB_KEYWORDS.iter().any(|k| key.contains(k)) {
        HERB_STRATEGIES
    } else if key.contains("bread") {
        BREAD_STRATEGIES
    } else {
        GENERIC_STRATEGIES
    }
}

/// Preservation strategies per ingredient, family-matched with a
/// generic fallback so every ingredient gets something.
pub fn preservation_strategies(ingredients: &[String]) -> Vec<(String, Vec<String>)> {
    ingredients
        .iter()
        .map(|ingredient| {
            let strategies = strategies_for(ingredient)
                .iter()
                .map(|s| s.to_string())
                .collect();
            (ingredient.clone(), strategies)
        })
        .collect()
}

/// Impact weight of a sustainability fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImpactWeight {
    High,
    Medium,
}

impl std::fmt::Display for ImpactWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
        };
        write!(f, "{}", s)
    }
}

/// A coached sustainability fact with a concrete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SustainabilityFact {
    pub fact: &'static str,
    pub action: &'static str,
    pub impact: ImpactWeight,
}

const SUSTAINABILITY_FACTS: &[SustainabilityFact] = &[
    SustainabilityFact {
        fact: "Food waste accounts for 8-10% of global greenhouse gas emissions",
        action: "Plan your meals to reduce waste",
        impact: ImpactWeight::High,
    },
    SustainabilityFact {
        fact: "Composting food scraps can reduce methane emissions by 50%",
        action: "Start a compost bin for vegetable scraps",
        impact: ImpactWeight::Medium,
    },
    SustainabilityFact {
        fact: "Buying seasonal produce reduces carbon footprint by 30%",
        action: "Choose seasonal ingredients when shopping",
        impact: ImpactWeight::Medium,
    },
    SustainabilityFact {
        fact: "Proper food storage can extend freshness by 50%",
        action: "Learn optimal storage methods for each ingredient",
        impact: ImpactWeight::High,
    },
];

/// The coached fact of the day.
pub fn daily_fact(variety: &mut Variety) -> SustainabilityFact {
    *variety
        .pick(SUSTAINABILITY_FACTS)
        .unwrap_or(&SUSTAINABILITY_FACTS[0])
}

/// Conversational "did you know" lines woven into chat replies.
pub const DID_YOU_KNOW: &[&str] = &[
    "Food waste accounts for 8-10% of global greenhouse gas emissions!",
    "Throwing away 1kg of beef wastes 15,000 liters of water used in production.",
    "Reducing bread waste by 10% could save 3 million slices daily worldwide.",
    "You can save up to 150 liters of water by not wasting 1kg of tomatoes.",
    "Storing leafy greens properly can extend their life by 5-7 days.",
    "One rotten onion can spoil an entire bag - always remove damaged ones first.",
    "Carrot tops are edible and nutritious - perfect for making pesto or salads!",
    "Overripe bananas are perfect for baking and contain more antioxidants.",
    "Cheese rinds can be added to soups for extra flavor instead of throwing away.",
    "Potato skins contain most of the nutrients - clean and cook them instead of peeling.",
];

/// One "did you know" line for a reply.
pub fn did_you_know(variety: &mut Variety) -> String {
    variety
        .pick(DID_YOU_KNOW)
        .copied()
        .unwrap_or(DID_YOU_KNOW[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_family_matching() {
        let strategies = preservation_strategies(&ingredients(&["banana", "carrot", "basil", "bread"]));
        assert_eq!(strategies.len(), 4);
        assert!(strategies[0].1[0].contains("smoothies"));
        assert!(strategies[1].1.iter().any(|s| s.contains("stock")));
        assert!(strategies[2].1.iter().any(|s| s.contains("pesto")));
        assert!(strategies[3].1.iter().any(|s| s.contains("breadcrumbs")));
    }

    #[test]
    fn test_generic_fallback() {
        let strategies = preservation_strategies(&ingredients(&["durian"]));
        assert!(strategies[0].1.iter().any(|s| s.contains("Compost")));
    }

    #[test]
    fn test_daily_fact_deterministic_with_seed() {
        let a = daily_fact(&mut Variety::seeded(21));
        let b = daily_fact(&mut Variety::seeded(21));
        assert_eq!(a, b);
    }

    #[test]
    fn test_did_you_know_pool() {
        let tip = did_you_know(&mut Variety::seeded(2));
        assert!(DID_YOU_KNOW.contains(&tip.as_str()));
    }
}
