//! Fuzzy search used to filter the condition list.
//!
//! The matching implementation is kept behind [`Matcher`] so the rest of the
//! application does not depend on a particular fuzzy-matching crate.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Match score for ranking, higher is better. `None` if there is no match.
    pub fn score(&self, text: &str, pattern: &str) -> Option<i64> {
        self.inner.fuzzy_match(text, pattern)
    }

    /// Keep the items whose key matches `pattern`, best match first.
    ///
    /// An empty pattern keeps every item in its original order.
    pub fn rank<'a, T, F>(&self, items: &'a [T], pattern: &str, key: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        if pattern.trim().is_empty() {
            return items.iter().collect();
        }

        let mut scored: Vec<(i64, usize, &T)> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.score(key(item), pattern).map(|score| (score, index, item))
            })
            .collect();
        // Stable on ties: equal scores keep catalog order.
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        let matcher = Matcher::new();

        assert!(matcher.score("Heuschnupfen", "heu").is_some());
        assert!(matcher.score("Halsschmerzen", "hlsch").is_some());
        assert!(matcher.score("Übelkeit", "belk").is_some());
        assert!(matcher.score("BURNOUT", "burn").is_some());
        assert!(matcher.score("Burnout", "xyz").is_none());
    }

    #[test]
    fn test_rank_orders_by_score() {
        let matcher = Matcher::new();
        let items = ["Nackenschmerzen", "Halsschmerzen", "Halsweh"];

        let ranked = matcher.rank(&items, "hals", |s| *s);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.starts_with("Hals")));
    }

    #[test]
    fn test_rank_empty_pattern_keeps_order() {
        let matcher = Matcher::new();
        let items = ["b", "a", "c"];

        let ranked = matcher.rank(&items, "  ", |s| *s);
        assert_eq!(ranked, vec![&"b", &"a", &"c"]);
    }
}
