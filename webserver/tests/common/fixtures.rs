//! Canned aggregation results

use std::collections::BTreeMap;
use std::net::SocketAddr;

use pipeline::core::view_from_counts;
use shared::{AggregationResult, Category};

pub struct TestFixtures;

impl TestFixtures {
    pub fn bind_address() -> SocketAddr {
        "127.0.0.1:3000".parse().unwrap()
    }

    /// he/him 1, she/her 0, other 1, none 1, error 0
    pub fn mixed_result(name: &str) -> AggregationResult {
        let counts = BTreeMap::from([
            (Category::HeHim, 1),
            (Category::SheHer, 0),
            (Category::Other, 1),
            (Category::None, 1),
            (Category::Error, 0),
        ]);

        AggregationResult {
            name: name.to_string(),
            submissions: view_from_counts(counts),
            schedule: None,
        }
    }

    pub fn scheduled_result(name: &str) -> AggregationResult {
        let schedule = BTreeMap::from([
            (Category::HeHim, 1),
            (Category::SheHer, 0),
            (Category::Other, 0),
            (Category::None, 0),
            (Category::Error, 0),
            (Category::NotFound, 1),
        ]);

        AggregationResult {
            schedule: Some(view_from_counts(schedule)),
            ..Self::mixed_result(name)
        }
    }
}
