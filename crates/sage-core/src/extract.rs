//! Ingredient extraction from free-text messages.
//!
//! Deliberately naive: substring phrase stripping plus cascading splits.
//! The phrase removal is not word-boundary aware, so it can clip pieces
//! of ingredient names that embed a filler phrase. Ranking thresholds
//! downstream were tuned against this loose behavior; keep it as is.

/// Conversational filler stripped before splitting. Order matters:
/// "leftover" runs before "leftovers", so a trailing "s" can survive.
const FILLER_PHRASES: &[&str] = &[
    "i have",
    "i've got",
    "what can i make with",
    "how to use",
    "recipes for",
    "cook with",
    "leftover",
    "leftovers",
];

/// Separators applied as successive split passes, each over the previous
/// pass's fragments. The literal word "and" splits mid-word too.
const SEPARATORS: &[&str] = &[",", ";", "&", "and", "\n", "  "];

/// Request-framing words; any fragment containing one is discarded.
const STOPLIST: &[&str] = &["please", "help", "can", "how", "what", "make"];

/// Upper bound on retained ingredients per request.
pub const MAX_INGREDIENTS: usize = 10;

/// Extract candidate ingredient tokens from a raw user message.
///
/// Pure and deterministic. Empty input, or input where nothing survives
/// filtering, yields an empty vector -- the caller answers with help
/// text, not an error.
pub fn extract(raw: &str) -> Vec<String> {
    let mut text = raw.trim().to_lowercase();

    for phrase in FILLER_PHRASES {
        text = text.replace(phrase, "");
    }

    let mut fragments = vec![text];
    for sep in SEPARATORS {
        let mut next = Vec::new();
        for fragment in &fragments {
            next.extend(fragment.split(sep).map(|part| part.trim().to_string()));
        }
        fragments = next;
    }

    fragments
        .into_iter()
        .filter(|f| f.chars().count() > 1)
        .filter(|f| !STOPLIST.iter().any(|word| f.contains(word)))
        .take(MAX_INGREDIENTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_list() {
        assert_eq!(extract("tomato, bread, cheese"), vec!["tomato", "bread", "cheese"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
    }

    #[test]
    fn test_filler_phrases_removed() {
        assert_eq!(extract("i have tomato and cheese"), vec!["tomato", "cheese"]);
        assert_eq!(
            extract("what can i make with leftover rice, eggs"),
            vec!["rice", "eggs"]
        );
    }

    #[test]
    fn test_stoplist_fragments_dropped() {
        // "please" and "help" framing survives splitting but is filtered.
        assert_eq!(extract("please help, tomato, onion"), vec!["tomato", "onion"]);
    }

    #[test]
    fn test_short_fragments_dropped() {
        assert_eq!(extract("a, eggs, b"), vec!["eggs"]);
    }

    #[test]
    fn test_truncates_to_ten() {
        let input = "one, two, three, four, five, six, seven, eight, nine, ten, eleven, twelve";
        let out = extract(input);
        assert_eq!(out.len(), MAX_INGREDIENTS);
        assert_eq!(out[0], "one");
        assert_eq!(out[9], "ten");
    }

    #[test]
    fn test_and_splits_inside_words() {
        // "and" is a plain substring separator; this is the documented
        // quirk, not a defect to repair.
        let out = extract("sandwich bread");
        assert!(!out.contains(&"sandwich bread".to_string()));
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(
            extract("rice; beans & corn\ntortilla"),
            vec!["rice", "beans", "corn", "tortilla"]
        );
    }

    #[test]
    fn test_properties_hold_for_noisy_input() {
        let out = extract("please, i have eggs and milk and flour and sugar, help me");
        assert!(out.len() <= MAX_INGREDIENTS);
        for token in &out {
            assert!(token.chars().count() > 1);
            for word in STOPLIST {
                assert!(!token.contains(word));
            }
        }
    }
}
