use std::collections::HashSet;

use crate::model::Tab;

/// Keeps the first tab seen for each URL, preserving first-seen order.
pub fn deduplicate_tabs(tabs: Vec<Tab>) -> Vec<Tab> {
    let mut seen = HashSet::new();
    tabs.into_iter()
        .filter(|tab| seen.insert(tab.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str, title: &str) -> Tab {
        Tab {
            title: title.to_string(),
            url: url.to_string(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let tabs = vec![
            tab("https://b.com", "first b"),
            tab("https://a.com", "first a"),
            tab("https://b.com", "second b"),
            tab("https://c.com", "c"),
            tab("https://a.com", "second a"),
        ];

        let unique = deduplicate_tabs(tabs);

        assert_eq!(
            unique,
            vec![
                tab("https://b.com", "first b"),
                tab("https://a.com", "first a"),
                tab("https://c.com", "c"),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let tabs = vec![
            tab("https://a.com", "a"),
            tab("https://a.com", "a again"),
            tab("https://b.com", "b"),
        ];

        let once = deduplicate_tabs(tabs);
        let twice = deduplicate_tabs(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate_tabs(Vec::new()).is_empty());
    }
}
