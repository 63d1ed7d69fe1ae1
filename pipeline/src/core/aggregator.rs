//! Count and percentage views over classified runners
//!
//! Counts tally distinct identifiers per category. Percentages divide by the
//! total of every bucket; normalized percentages leave out
//! [`Category::NORMALIZED_EXCLUDED`] from the denominator and drop `none`
//! from the output entirely. A zero denominator yields undefined shares.

use std::collections::{BTreeMap, HashMap, HashSet};

use shared::{AggregateView, Category, CategoryCounts, Share};

use crate::types::ClassifiedRunner;

/// Distinct identifiers per category bucket
struct Buckets<'a> {
    members: BTreeMap<Category, HashSet<&'a str>>,
}

impl<'a> Buckets<'a> {
    fn new(categories: &[Category]) -> Self {
        Self {
            members: categories.iter().map(|c| (*c, HashSet::new())).collect(),
        }
    }

    fn insert(&mut self, category: Category, identifier: &'a str) {
        self.members.entry(category).or_default().insert(identifier);
    }

    fn counts(&self) -> CategoryCounts {
        self.members
            .iter()
            .map(|(category, ids)| (*category, ids.len() as u64))
            .collect()
    }
}

fn share(count: u64, denominator: u64) -> Share {
    (denominator > 0).then(|| count as f64 / denominator as f64)
}

/// Build the full view from already-tallied counts
pub fn view_from_counts(counts: CategoryCounts) -> AggregateView {
    let total: u64 = counts.values().sum();
    let normalized_total: u64 = counts
        .iter()
        .filter(|(category, _)| !Category::NORMALIZED_EXCLUDED.contains(category))
        .map(|(_, count)| count)
        .sum();

    let percentages = counts
        .iter()
        .map(|(category, count)| (*category, share(*count, total)))
        .collect();

    let normalized_percentages = counts
        .iter()
        .filter(|(category, _)| **category != Category::None)
        .map(|(category, count)| (*category, share(*count, normalized_total)))
        .collect();

    AggregateView {
        counts,
        percentages,
        normalized_percentages,
    }
}

/// Submissions view
pub fn aggregate(classified: &[ClassifiedRunner]) -> AggregateView {
    let mut buckets = Buckets::new(&Category::SUBMISSIONS);
    for entry in classified {
        buckets.insert(entry.category, &entry.identifier);
    }
    view_from_counts(buckets.counts())
}

/// Schedule view; identifiers with no submission land in `notFound`
pub fn aggregate_schedule(
    scheduled: &[String],
    by_identifier: &HashMap<&str, Category>,
) -> AggregateView {
    let mut buckets = Buckets::new(&Category::SCHEDULE);
    for identifier in scheduled {
        let category = by_identifier
            .get(identifier.as_str())
            .copied()
            .unwrap_or(Category::NotFound);
        buckets.insert(category, identifier);
    }
    view_from_counts(buckets.counts())
}

/// Sum counts of several views over the given categories
pub fn combine_counts<'a>(
    views: impl IntoIterator<Item = &'a AggregateView>,
    categories: &[Category],
) -> CategoryCounts {
    let mut combined: CategoryCounts = categories.iter().map(|c| (*c, 0)).collect();
    for view in views {
        for category in categories {
            *combined.entry(*category).or_default() += view.count(*category);
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(identifier: &str, category: Category) -> ClassifiedRunner {
        ClassifiedRunner {
            identifier: identifier.to_string(),
            category,
        }
    }

    fn assert_close(actual: Share, expected: f64) {
        let value = actual.expect("share should be defined");
        assert!(
            (value - expected).abs() < 0.01,
            "expected {expected}, got {value}"
        );
    }

    #[test]
    fn test_mixed_roster_views() {
        let classified = vec![
            entry("a", Category::HeHim),
            entry("b", Category::None),
            entry("c", Category::Other),
        ];

        let view = aggregate(&classified);

        assert_eq!(view.count(Category::HeHim), 1);
        assert_eq!(view.count(Category::SheHer), 0);
        assert_eq!(view.count(Category::Other), 1);
        assert_eq!(view.count(Category::None), 1);
        assert_eq!(view.count(Category::Error), 0);
        assert!(!view.counts.contains_key(&Category::NotFound));

        assert_close(view.percentage(Category::HeHim), 0.33);
        assert_close(view.percentage(Category::Other), 0.33);
        assert_close(view.percentage(Category::None), 0.33);
        assert_close(view.percentage(Category::SheHer), 0.0);
        assert_close(view.percentage(Category::Error), 0.0);

        assert!(!view.normalized_percentages.contains_key(&Category::None));
        assert_close(view.normalized_percentage(Category::HeHim), 0.5);
        assert_close(view.normalized_percentage(Category::Other), 0.5);
        assert_close(view.normalized_percentage(Category::SheHer), 0.0);
        assert_close(view.normalized_percentage(Category::Error), 0.0);
    }

    #[test]
    fn test_sums_hold_for_non_empty_input() {
        let classified = vec![
            entry("a", Category::HeHim),
            entry("b", Category::SheHer),
            entry("c", Category::SheHer),
            entry("d", Category::Error),
            entry("e", Category::None),
            entry("f", Category::Other),
            entry("g", Category::Error),
        ];

        let view = aggregate(&classified);

        assert_eq!(view.total(), classified.len() as u64);

        let percent_sum: f64 = view.percentages.values().map(|s| s.unwrap()).sum();
        assert!((percent_sum - 1.0).abs() < 1e-9);

        let normalized_sum: f64 = view
            .normalized_percentages
            .values()
            .map(|s| s.unwrap())
            .sum();
        // error stays in the output but not in the denominator
        let error_share = view.normalized_percentage(Category::Error).unwrap();
        assert!((normalized_sum - error_share - 1.0).abs() < 1e-9);
        assert_close(view.normalized_percentage(Category::SheHer), 0.5);
    }

    #[test]
    fn test_repeated_identifier_counted_once() {
        let classified = vec![
            entry("a", Category::HeHim),
            entry("a", Category::HeHim),
            entry("b", Category::HeHim),
        ];

        let view = aggregate(&classified);

        assert_eq!(view.count(Category::HeHim), 2);
    }

    #[test]
    fn test_empty_input_is_undefined() {
        let view = aggregate(&[]);

        assert_eq!(view.total(), 0);
        assert_eq!(view.percentages.len(), Category::SUBMISSIONS.len());
        assert!(view.percentages.values().all(Option::is_none));
        assert!(view.normalized_percentages.values().all(Option::is_none));
    }

    #[test]
    fn test_only_unknown_runners_leave_normalized_undefined() {
        let view = aggregate(&[entry("a", Category::None), entry("b", Category::Error)]);

        assert_close(view.percentage(Category::None), 0.5);
        assert!(view.normalized_percentages.values().all(Option::is_none));
    }

    #[test]
    fn test_schedule_unknown_identifier_is_not_found() {
        let by_identifier = HashMap::from([("a", Category::HeHim), ("b", Category::SheHer)]);
        let scheduled = vec!["a".to_string(), "z".to_string()];

        let view = aggregate_schedule(&scheduled, &by_identifier);

        assert_eq!(view.count(Category::NotFound), 1);
        assert_eq!(view.count(Category::HeHim), 1);
        assert_eq!(view.count(Category::SheHer), 0);
        assert_eq!(view.count(Category::None), 0);
        assert_eq!(view.total(), 2);
    }

    #[test]
    fn test_schedule_uses_submission_exclusions() {
        let by_identifier = HashMap::from([
            ("a", Category::HeHim),
            ("b", Category::Error),
            ("c", Category::None),
        ]);
        let scheduled: Vec<String> = ["a", "b", "c", "a", "z"].iter().map(|s| s.to_string()).collect();

        let view = aggregate_schedule(&scheduled, &by_identifier);

        assert_eq!(view.count(Category::Error), 1);
        assert_eq!(view.count(Category::HeHim), 1);
        assert!(!view.normalized_percentages.contains_key(&Category::None));
        // denominator: he/him + notFound
        assert_close(view.normalized_percentage(Category::HeHim), 0.5);
        assert_close(view.normalized_percentage(Category::NotFound), 0.5);
    }

    #[test]
    fn test_combine_counts() {
        let first = aggregate(&[entry("a", Category::HeHim), entry("b", Category::Other)]);
        let second = aggregate(&[entry("a", Category::HeHim), entry("c", Category::SheHer)]);

        let combined = combine_counts([&first, &second], &Category::SUBMISSIONS);

        assert_eq!(combined[&Category::HeHim], 2);
        assert_eq!(combined[&Category::SheHer], 1);
        assert_eq!(combined[&Category::Other], 1);
        assert_eq!(combined[&Category::Error], 0);

        let view = view_from_counts(combined);
        assert_close(view.percentage(Category::HeHim), 0.5);
    }
}
