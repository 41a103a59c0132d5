use super::graph::*;
use crate::error::GraphError;
use crate::types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const SQUARE: &str = "\
        A B C D
        A 1 B
        B 1 C
        C 1 D
        D 1 A
        A 1.5 C
    ";

    fn id(graph: &Graph, name: &str) -> CityId {
        graph.city_id(name).unwrap()
    }

    fn route(graph: &Graph, names: &[&str]) -> Vec<CityId> {
        names.iter().map(|n| id(graph, n)).collect()
    }

    #[test]
    fn test_load_cities_and_start() {
        let graph = Graph::parse(SQUARE).unwrap();
        assert_eq!(graph.cities(), &["A", "B", "C", "D"]);
        // Start city is the last token of the first line.
        assert_eq!(graph.city_name(graph.start()), Some("D"));
    }

    #[test]
    fn test_duplicate_cities_keep_first_occurrence() {
        let graph = Graph::parse("B A B C A\nA 1 B\nB 1 C\nC 1 A").unwrap();
        assert_eq!(graph.cities(), &["B", "A", "C"]);
        assert_eq!(graph.city_name(graph.start()), Some("A"));
    }

    #[test]
    fn test_edges_are_symmetric() {
        let graph = Graph::parse(SQUARE).unwrap();
        let (a, c) = (id(&graph, "A"), id(&graph, "C"));
        assert_eq!(graph.direct_distance(a, c), 1.5);
        assert_eq!(graph.direct_distance(c, a), 1.5);
        assert!(graph.is_connected(c, a));
    }

    #[test]
    fn test_missing_edge_is_infeasible() {
        let graph = Graph::parse(SQUARE).unwrap();
        let (b, d) = (id(&graph, "B"), id(&graph, "D"));
        assert_eq!(graph.direct_distance(b, d), INFEASIBLE);
        assert!(!graph.is_connected(b, d));
        assert_eq!(graph.direct_distance(b, CityId::from(99)), INFEASIBLE);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let input = "A B C\nA B\nA x B\nA -2 C\nA 1 B extra\nA 1 B\nB 2 C\nC 3 A\nA 4 Z\n";
        let graph = Graph::parse(input).unwrap();
        let (a, b, c) = (id(&graph, "A"), id(&graph, "B"), id(&graph, "C"));
        assert_eq!(graph.direct_distance(a, b), 1.0);
        assert_eq!(graph.direct_distance(a, c), 3.0);
        assert_eq!(graph.neighbors(a), &[b, c]);
    }

    #[test]
    fn test_two_token_line_excludes_edge() {
        let graph = Graph::parse("A B C\nA B\nB 1 C\nC 1 A\nA 1 C").unwrap();
        let (a, b) = (id(&graph, "A"), id(&graph, "B"));
        assert!(!graph.is_connected(a, b));
    }

    #[test]
    fn test_later_line_overrides_weight() {
        let graph = Graph::parse("A B\nA 1 B\nB 7 A").unwrap();
        let (a, b) = (id(&graph, "A"), id(&graph, "B"));
        assert_eq!(graph.direct_distance(a, b), 7.0);
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(Graph::parse(""), Err(GraphError::EmptyCityList)));
        assert!(matches!(Graph::parse("\n  \n"), Err(GraphError::EmptyCityList)));
    }

    #[test]
    fn test_isolated_city_fails() {
        let err = Graph::parse("A B C D\nA 1 B\nB 1 C\nC 1 A").unwrap_err();
        match err {
            GraphError::NoOutgoingEdges { city } => assert_eq!(city, "D"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Graph::load("/nonexistent/graph.txt").unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }

    #[test]
    fn test_neighbors_of_unknown_city_is_empty() {
        let graph = Graph::parse(SQUARE).unwrap();
        assert!(graph.neighbors(CityId::from(42)).is_empty());
        assert_eq!(graph.city_id("Q"), None);
    }

    #[test]
    fn test_cycle_distance_includes_wrap_edge() {
        let graph = Graph::parse(SQUARE).unwrap();
        let r = route(&graph, &["D", "A", "B", "C"]);
        assert_eq!(graph.cycle_distance(&r), 4.0);
        let r = route(&graph, &["D", "A", "C", "B"]);
        // B -> D does not exist.
        assert_eq!(graph.cycle_distance(&r), INFEASIBLE);
        assert_eq!(graph.cycle_distance(&r), graph.cycle_distance(&r));
    }

    #[test]
    fn test_valid_route() {
        let graph = Graph::parse(SQUARE).unwrap();
        assert!(graph.is_valid_route(&route(&graph, &["D", "A", "B", "C"])));
        assert!(graph.is_valid_route(&route(&graph, &["D", "C", "B", "A"])));
        // Wrong start.
        assert!(!graph.is_valid_route(&route(&graph, &["A", "B", "C", "D"])));
        // Missing city.
        assert!(!graph.is_valid_route(&route(&graph, &["D", "A", "B"])));
        // Repeated city.
        assert!(!graph.is_valid_route(&route(&graph, &["D", "A", "B", "A"])));
        // Missing edge.
        assert!(!graph.is_valid_route(&route(&graph, &["D", "B", "A", "C"])));
        assert!(!graph.is_valid_route(&[]));
    }

    #[test]
    fn test_directed_rotation_changes_validity() {
        let graph = Graph::parse(SQUARE).unwrap();
        let r = route(&graph, &["D", "A", "B", "C"]);
        let mut rotated = r.clone();
        rotated.rotate_left(1);
        assert_eq!(graph.cycle_distance(&rotated), graph.cycle_distance(&r));
        assert!(!graph.is_valid_route(&rotated));
    }

    #[test]
    fn test_describe_lists_connections() {
        let graph = Graph::parse(SQUARE).unwrap();
        let text = graph.describe();
        assert!(text.contains("A: B, C, D"));
        assert!(text.contains("B: A, C"));
        assert!(text.contains("  1.5"));
    }

    #[test]
    fn test_reload_is_identical() {
        let a = Graph::parse(SQUARE).unwrap();
        let b = Graph::parse(SQUARE).unwrap();
        assert_eq!(a.distance_matrix(), b.distance_matrix());
    }

    fn edge_lines() -> impl Strategy<Value = Vec<(usize, u32, usize)>> {
        prop::collection::vec((0..6usize, 1..100u32, 0..6usize), 1..30)
    }

    proptest! {
        #[test]
        fn prop_neighbors_round_trip(edges in edge_lines()) {
            let names = ["C0", "C1", "C2", "C3", "C4", "C5"];
            // Ring keeps every city connected.
            let mut text = names.join(" ");
            for i in 0..names.len() {
                text.push_str(&format!("\n{} 1 {}", names[i], names[(i + 1) % names.len()]));
            }
            for &(a, w, b) in &edges {
                text.push_str(&format!("\n{} {} {}", names[a], w, names[b]));
            }
            let graph = Graph::parse(&text).unwrap();

            let mut expected = vec![BTreeSet::new(); names.len()];
            for i in 0..names.len() {
                let j = (i + 1) % names.len();
                expected[i].insert(j);
                expected[j].insert(i);
            }
            for &(a, _, b) in &edges {
                expected[a].insert(b);
                expected[b].insert(a);
            }

            for (i, name) in names.iter().enumerate() {
                let city = graph.city_id(name).unwrap();
                let got: BTreeSet<usize> = graph.neighbors(city).iter().map(|c| c.index()).collect();
                prop_assert_eq!(&got, &expected[i]);
            }
        }

        #[test]
        fn prop_valid_iff_permutation_from_start_and_finite(
            order in Just((0..5usize).collect::<Vec<_>>()).prop_shuffle(),
        ) {
            let graph = Graph::parse("A B C D E\nA 1 B\nB 1 C\nC 1 D\nD 1 E\nE 1 A\nA 2 C\nB 2 E").unwrap();
            let r: Vec<CityId> = order.iter().map(|&i| CityId::from(i as u16)).collect();
            let expected = r[0] == graph.start() && graph.cycle_distance(&r).is_finite();
            prop_assert_eq!(graph.is_valid_route(&r), expected);
        }
    }
}
