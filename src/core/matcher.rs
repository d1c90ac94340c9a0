use crate::core::kind::ResourceKind;
use crate::core::models::resource::{MatchSet, ResourceStat};

/// Match count above which only names are listed.
pub const DEFAULT_THRESHOLD: usize = 30;

/// Zero means "not configured".
pub fn effective_threshold(configured: usize) -> usize {
    if configured == 0 {
        DEFAULT_THRESHOLD
    } else {
        configured
    }
}

/// Filter `universe` down to the resources whose name contains `query`.
///
/// An exact name match wins outright: the result becomes that single resource
/// and the scan stops, however many partial matches came before it.
pub fn match_resources(
    kind: ResourceKind,
    query: &str,
    universe: &[String],
    threshold: usize,
) -> MatchSet {
    let mut resources = Vec::new();
    for id in universe {
        let name = kind.name_of(id);
        if !name.contains(query) {
            continue;
        }

        let stat = ResourceStat::new(id.as_str(), name);
        if name == query {
            resources = vec![stat];
            break;
        }
        resources.push(stat);
    }

    MatchSet {
        query: query.to_string(),
        threshold: effective_threshold(threshold),
        resources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substring_matches_keep_scan_order() {
        let set = match_resources(
            ResourceKind::Table,
            "orders",
            &universe(&["orders-prod", "orders-dev", "billing"]),
            30,
        );
        assert_eq!(set.names(), vec!["orders-prod", "orders-dev"]);
        assert!(!set.has_too_many());
    }

    #[test]
    fn exact_match_collapses_even_when_found_last() {
        let set = match_resources(
            ResourceKind::Table,
            "orders",
            &universe(&["orders-prod", "orders-dev", "orders", "orders-old"]),
            30,
        );
        assert_eq!(set.names(), vec!["orders"]);
        assert!(set.single().is_some());
    }

    #[test]
    fn exact_match_wins_over_threshold() {
        let mut names: Vec<String> = (0..50).map(|i| format!("jobs-{i}")).collect();
        names.push("jobs".to_string());
        let set = match_resources(ResourceKind::Table, "jobs", &names, 30);
        assert_eq!(set.len(), 1);
        assert!(!set.has_too_many());
    }

    #[test]
    fn too_many_partial_matches_keeps_all_for_listing() {
        let names: Vec<String> = (0..31).map(|i| format!("jobs-{i}")).collect();
        let set = match_resources(ResourceKind::Table, "jobs", &names, 30);
        assert_eq!(set.len(), 31);
        assert!(set.has_too_many());
    }

    #[test]
    fn empty_query_matches_everything() {
        let set = match_resources(ResourceKind::Table, "", &universe(&["a", "b"]), 30);
        assert_eq!(set.names(), vec!["a", "b"]);
    }

    #[test]
    fn no_match_and_empty_universe() {
        let set = match_resources(ResourceKind::Table, "zzz", &universe(&["a"]), 30);
        assert!(set.is_empty());
        let set = match_resources(ResourceKind::Table, "a", &[], 30);
        assert!(set.is_empty());
    }

    #[test]
    fn queues_match_on_name_but_keep_url() {
        let urls = universe(&[
            "https://sqs.us-east-1.amazonaws.com/1/orders-prod",
            "https://sqs.us-east-1.amazonaws.com/1/orders",
        ]);
        let set = match_resources(ResourceKind::Queue, "orders", &urls, 30);
        let only = set.single().unwrap();
        assert_eq!(only.name, "orders");
        assert_eq!(only.id, "https://sqs.us-east-1.amazonaws.com/1/orders");
    }

    #[test]
    fn queue_url_host_is_not_matched() {
        let urls = universe(&["https://sqs.us-east-1.amazonaws.com/1/jobs"]);
        let set = match_resources(ResourceKind::Queue, "amazonaws", &urls, 30);
        assert!(set.is_empty());
    }

    #[test]
    fn zero_threshold_means_default() {
        let set = match_resources(ResourceKind::Table, "a", &universe(&["a1"]), 0);
        assert_eq!(set.threshold, DEFAULT_THRESHOLD);
    }
}
