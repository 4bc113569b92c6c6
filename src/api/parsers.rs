use indexmap::IndexMap;
use log::debug;

use super::models::Perf;

/// How to handle score-only modes (storm, racer, streak), which carry
/// no rating field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreOnlyPolicy {
    /// Show the score where the rating would go.
    #[default]
    Substitute,
    /// Leave the mode out entirely.
    Exclude,
}

/// Flattens a perf map into display (label, value) pairs, keeping the
/// payload's key order. Perfs with neither a rating nor a score are
/// dropped.
pub fn normalize_perfs(
    perfs: &IndexMap<String, Perf>,
    policy: ScoreOnlyPolicy,
) -> Vec<(String, String)> {
    let mut lines = Vec::with_capacity(perfs.len());

    for (key, perf) in perfs {
        let value = match (perf.rating, perf.score) {
            (Some(rating), _) => rating.to_string(),
            (None, Some(score)) => match policy {
                ScoreOnlyPolicy::Substitute => score.to_string(),
                ScoreOnlyPolicy::Exclude => continue,
            },
            (None, None) => {
                debug!("Perf '{key}' has neither rating nor score");
                continue;
            }
        };
        lines.push((humanize_mode_key(key), value));
    }

    lines
}

/// Turns a camelCase perf key into its display label: a space goes in
/// front of every uppercase letter, then the first letter is
/// capitalized. `puzzleRush` → `Puzzle Rush`.
pub fn humanize_mode_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => label,
    }
}
