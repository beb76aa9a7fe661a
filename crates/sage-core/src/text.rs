//! Small text helpers shared across components.

/// Canonical token to display form: underscores to spaces, each word
/// capitalized ("olive_oil" -> "Olive Oil").
pub fn display_name(s: &str) -> String {
    s.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
