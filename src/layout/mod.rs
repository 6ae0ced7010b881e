//! Layout engine: pin views relative to their parent and to each other
//!
//! The engine talks to a view hierarchy through [`ViewHost`]. A
//! [`LayoutPass`] fixes the direction for the pass, and each
//! [`LayoutPass::pin`] chain records edges, sizes and margins before
//! [`Pin::layout`] commits one frame. [`compute`] drives a whole parsed
//! script against an in-memory [`ViewTree`].

pub mod anchor;
pub mod config;
pub mod diagnostics;
pub mod direction;
pub mod engine;
pub mod error;
pub mod pin;
pub mod reduce;
pub mod relative;
pub mod resolve;
pub mod tree;
pub mod types;

pub use anchor::{Anchor, AnchorRef, Edge, EdgeRef, HorizontalEdge, VerticalEdge};
pub use config::{ConfigError, LayoutConfig};
pub use diagnostics::{CollectingSink, DiagnosticSink};
pub use direction::{Direction, LayoutDirection, ParseDirectionError};
pub use engine::{build_tree, compute, LayoutResult, ViewLayout};
pub use error::LayoutError;
pub use pin::{LayoutPass, PendingFrame, Pin};
pub use reduce::Coordinates;
pub use relative::RelativeOp;
pub use resolve::{absolute_frame, Resolver};
pub use tree::{ViewHost, ViewId, ViewNode, ViewTree};
pub use types::*;

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=n).collect();
    for i in 1..=m {
        let mut diagonal = row[0];
        row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            let next = (row[j] + 1).min(row[j - 1] + 1).min(diagonal + cost);
            diagonal = row[j];
            row[j] = next;
        }
    }
    row[n]
}

/// Names within `max_distance` edits of `target`, closest first, at most three
pub(crate) fn find_similar<'n>(
    names: impl IntoIterator<Item = &'n str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = names
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("title", "title"), 0);
    }

    #[test]
    fn test_levenshtein_one_off() {
        assert_eq!(levenshtein_distance("below", "belw"), 1);
        assert_eq!(levenshtein_distance("header", "heater"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_different() {
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
    }

    #[test]
    fn test_find_similar_closest_first() {
        let names = ["header", "footer", "heater", "body"];
        let suggestions = find_similar(names, "headr", 2);
        assert_eq!(suggestions, vec!["header".to_string(), "heater".to_string()]);
    }

    #[test]
    fn test_find_similar_skips_exact() {
        assert!(find_similar(["a"], "a", 2).is_empty());
    }
}
