mod common;

use common::from_edges;
use limited_infection::{Graph, KernighanLinConfig, LimitedInfectionConfig};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1u64..30)
        .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..60)))
        .prop_map(|(n, edges)| from_edges(n, &edges))
}

proptest! {
    #[test]
    fn total_infection_is_seed_independent(graph in graph_strategy()) {
        for uid in graph.uids() {
            let component = graph.total_infection(uid).unwrap();
            prop_assert!(component.contains(&uid));
            for member in &component {
                prop_assert_eq!(&graph.total_infection(*member).unwrap(), &component);
            }
        }
    }

    #[test]
    fn components_partition_population(graph in graph_strategy()) {
        let mut seen = BTreeSet::new();
        for component in graph.connected_components() {
            prop_assert!(!component.is_empty());
            for uid in component.users() {
                prop_assert!(seen.insert(*uid));
            }
        }
        prop_assert_eq!(seen, graph.uids().collect::<BTreeSet<_>>());
    }

    #[test]
    fn limited_infection_hits_every_target(graph in graph_strategy()) {
        let config = LimitedInfectionConfig::default();
        for target in 0..=graph.len() {
            let result = graph
                .pack_components(graph.connected_components(), target, 0, &config)
                .unwrap();
            prop_assert_eq!(result.infected.len(), target);
            prop_assert!(result.infected.iter().all(|uid| graph.contains(*uid)));
        }
    }

    #[test]
    fn bisection_stays_inside_component(graph in graph_strategy(), share in 0.0..=1.0f64) {
        let largest = graph
            .connected_components()
            .into_iter()
            .max_by_key(|c| c.len())
            .unwrap();
        let count = (share * largest.len() as f64) as usize;
        let split = graph
            .partition_bisection(largest.users(), count, &KernighanLinConfig::default())
            .unwrap();

        prop_assert_eq!(split.infected.len(), count);
        prop_assert!(split.infected.is_subset(largest.users()));
        prop_assert_eq!(split.edge_cut, graph.count_conflicts(&split.infected));
    }
}
