//! Property checks over randomly generated triangular graphs.

use proptest::prelude::*;
use wf_core::{nearly_equal, Tolerances};
use wf_graph::{Graph, Label, QueryError, NO_EDGE};

fn arb_cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => (0.5..10.0f64).prop_map(Some),
        1 => Just(None),
    ]
}

/// Lower-triangular jagged matrix of order 1..7.
fn arb_lower_rows() -> impl Strategy<Value = Vec<Vec<Option<f64>>>> {
    (1usize..7).prop_flat_map(|order| {
        let total = order * (order + 1) / 2;
        proptest::collection::vec(arb_cell(), total).prop_map(move |flat| {
            let mut rows = Vec::with_capacity(order);
            let mut cells = flat.into_iter();
            for i in 0..order {
                rows.push(cells.by_ref().take(i + 1).collect());
            }
            rows
        })
    })
}

fn labels_for(order: usize) -> Vec<Label> {
    (0..order).map(|i| 100 + 3 * i as Label).collect()
}

proptest! {
    #[test]
    fn routes_are_walkable_and_sum_to_distance(rows in arb_lower_rows()) {
        let labels = labels_for(rows.len());
        let graph = Graph::from_matrix(&rows, &labels).unwrap();
        let tol = Tolerances::default();

        for &a in &labels {
            for &b in &labels {
                match graph.shortest_route(a, b) {
                    Ok(route) => {
                        prop_assert_eq!(route.vertices.first().copied(), Some(a));
                        prop_assert_eq!(route.vertices.last().copied(), Some(b));
                        if a == b {
                            prop_assert_eq!(route.distance, 0.0);
                            prop_assert_eq!(route.vertices.len(), 1);
                            continue;
                        }
                        let mut total = 0.0;
                        for pair in route.vertices.windows(2) {
                            prop_assert!(graph.adjacent(pair[0], pair[1]).unwrap());
                            match graph.edge_weight(pair[0], pair[1]).unwrap() {
                                Some(weight) => total += weight,
                                None => prop_assert!(false, "route steps over a missing edge"),
                            }
                        }
                        prop_assert!(
                            nearly_equal(total, route.distance, tol),
                            "edge sum {} differs from distance {}",
                            total,
                            route.distance
                        );
                    }
                    Err(QueryError::Unreachable { .. }) => {}
                    Err(other) => prop_assert!(false, "unexpected error: {}", other),
                }
            }
        }
    }

    #[test]
    fn triangle_inequality_holds(rows in arb_lower_rows()) {
        let labels = labels_for(rows.len());
        let graph = Graph::from_matrix(&rows, &labels).unwrap();

        for &a in &labels {
            for &b in &labels {
                for &c in &labels {
                    let (Ok(ab), Ok(bc), Ok(ac)) = (
                        graph.shortest_route(a, b),
                        graph.shortest_route(b, c),
                        graph.shortest_route(a, c),
                    ) else {
                        continue;
                    };
                    prop_assert!(
                        ac.distance <= ab.distance + bc.distance + 1e-9,
                        "d({a},{c}) = {} exceeds d({a},{b}) + d({b},{c}) = {}",
                        ac.distance,
                        ab.distance + bc.distance
                    );
                }
            }
        }
    }

    #[test]
    fn lower_input_matches_its_mirrored_square(rows in arb_lower_rows()) {
        let order = rows.len();
        let labels = labels_for(order);
        let lower = Graph::from_matrix(&rows, &labels).unwrap();

        let mut square = vec![vec![None; order]; order];
        for i in 0..order {
            for j in 0..=i {
                square[i][j] = rows[i][j];
                square[j][i] = rows[i][j];
            }
        }
        let mirrored = Graph::from_matrix(&square, &labels).unwrap();

        for &a in &labels {
            for &b in &labels {
                prop_assert_eq!(
                    lower.edge_weight(a, b).unwrap(),
                    mirrored.edge_weight(a, b).unwrap()
                );
                match (lower.shortest_route(a, b), mirrored.shortest_route(a, b)) {
                    (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
                    (Err(x), Err(y)) => prop_assert_eq!(x, y),
                    (x, y) => prop_assert!(false, "answers diverge: {:?} vs {:?}", x, y),
                }
            }
        }
    }

    #[test]
    fn raw_sentinel_form_matches_option_form(rows in arb_lower_rows()) {
        let labels = labels_for(rows.len());
        let raw: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.unwrap_or(NO_EDGE)).collect())
            .collect();

        let from_options = Graph::from_matrix(&rows, &labels).unwrap();
        let from_raw = Graph::from_raw_matrix(&raw, &labels).unwrap();

        for &a in &labels {
            for &b in &labels {
                prop_assert_eq!(
                    from_options.edge_weight(a, b).unwrap(),
                    from_raw.edge_weight(a, b).unwrap()
                );
            }
        }
    }

    #[test]
    fn unknown_labels_always_rejected(rows in arb_lower_rows(), probe in 0..50u32) {
        let labels = labels_for(rows.len());
        let graph = Graph::from_matrix(&rows, &labels).unwrap();

        // Generated labels start at 100, so the probe is never one of them.
        prop_assert_eq!(
            graph.shortest_route(probe, labels[0]).unwrap_err(),
            QueryError::UnknownLabel { label: probe }
        );
        prop_assert_eq!(
            graph.shortest_route(labels[0], probe).unwrap_err(),
            QueryError::UnknownLabel { label: probe }
        );
    }
}
