//! Unit tests for mapf-graph.
//!
//! All tests use small hand-built graphs so expected distances can be worked
//! out by hand.

#[cfg(test)]
mod helpers {
    use mapf_core::NodeId;
    use crate::Graph;

    /// Five nodes, undirected edges:
    ///
    /// ```text
    ///   0 —1— 1 —1— 2
    ///   |           |
    ///   5           1
    ///   |           |
    ///   3 ————1———— 4
    /// ```
    ///
    /// Shortest 0→4 is 0→1→2→4 = 3; the direct 0→3→4 costs 6.
    pub fn diamond() -> (Graph, [NodeId; 5]) {
        let n = [NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)];
        let mut g = Graph::new(5);
        g.add_edge_bidirectional(n[0], n[1], 1.0).unwrap();
        g.add_edge_bidirectional(n[1], n[2], 1.0).unwrap();
        g.add_edge_bidirectional(n[2], n[4], 1.0).unwrap();
        g.add_edge_bidirectional(n[0], n[3], 5.0).unwrap();
        g.add_edge_bidirectional(n[3], n[4], 1.0).unwrap();
        (g, n)
    }
}

// ── Graph structure ───────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use mapf_core::{GraphRng, MapfError, NodeId};
    use crate::Graph;

    #[test]
    fn empty_graph() {
        let g = Graph::new(0);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbours(NodeId(0)).is_empty());
    }

    #[test]
    fn bidirectional_adds_two_edges() {
        let (g, [n0, n1, ..]) = super::helpers::diamond();
        assert_eq!(g.edge_count(), 10);
        assert!(g.has_edge(n0, n1));
        assert!(g.has_edge(n1, n0));
    }

    #[test]
    fn re_adding_replaces_weight() {
        let mut g = Graph::new(2);
        g.add_edge(NodeId(0), NodeId(1), 3.0).unwrap();
        g.add_edge(NodeId(0), NodeId(1), 7.0).unwrap();
        assert_eq!(g.neighbours(NodeId(0)).len(), 1);
        assert_eq!(g.edge_weight(NodeId(0), NodeId(1)), Some(7.0));
    }

    #[test]
    fn remove_only_one_direction() {
        let (mut g, [n0, n1, ..]) = super::helpers::diamond();
        assert!(g.remove_edges(n0, n1));
        assert!(!g.has_edge(n0, n1));
        assert!(g.has_edge(n1, n0));
        assert!(!g.remove_edges(n0, n1));
    }

    #[test]
    fn clear_keeps_nodes() {
        let (mut g, _) = super::helpers::diamond();
        g.clear_edges();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn rejects_bad_weights() {
        let mut g = Graph::new(2);
        for w in [-1.0, f64::NAN, f64::INFINITY] {
            let err = g.add_edge(NodeId(0), NodeId(1), w).unwrap_err();
            assert!(matches!(err, MapfError::InvalidWeight { .. }));
        }
        assert!(g.add_edge(NodeId(0), NodeId(1), 0.0).is_ok());
    }

    #[test]
    fn rejects_unknown_nodes() {
        let mut g = Graph::new(2);
        let err = g.add_edge(NodeId(0), NodeId(2), 1.0).unwrap_err();
        assert!(matches!(err, MapfError::NodeOutOfRange { node_count: 2, .. }));
    }

    #[test]
    fn random_graph_is_seeded() {
        let a = Graph::random(30, 80, &mut GraphRng::new(11));
        let b = Graph::random(30, 80, &mut GraphRng::new(11));
        let ea: Vec<_> = a.edges().collect();
        let eb: Vec<_> = b.edges().collect();
        assert_eq!(ea, eb);
        assert!(a.edge_count() <= 80);
        assert!(a.edges().all(|(_, _, w)| w == 1.0));
    }
}

// ── DistanceOracle ────────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle {
    use mapf_core::NodeId;
    use crate::{DistanceOracle, Graph, SearchGraph};

    #[test]
    fn shortest_distance() {
        let (g, [n0, n1, n2, n3, n4]) = super::helpers::diamond();
        let o = DistanceOracle::new(g);
        assert_eq!(o.distance(n0, n4), 3.0);
        assert_eq!(o.distance(n0, n3), 4.0); // via 1, 2, 4
        assert_eq!(o.distance(n2, n0), 2.0);
        assert_eq!(o.distance(n1, n1), 0.0);
    }

    #[test]
    fn unreachable_is_infinite() {
        let o = DistanceOracle::new(Graph::new(3));
        assert_eq!(o.distance(NodeId(0), NodeId(2)), f64::INFINITY);
        assert_eq!(o.distance(NodeId(0), NodeId(0)), 0.0);
        // Out-of-range ids never panic.
        assert_eq!(o.distance(NodeId(0), NodeId(99)), f64::INFINITY);
    }

    #[test]
    fn one_way_edge() {
        let mut g = Graph::new(2);
        g.add_edge(NodeId(0), NodeId(1), 2.5).unwrap();
        let o = DistanceOracle::from(g);
        assert_eq!(o.distance(NodeId(0), NodeId(1)), 2.5);
        assert_eq!(o.distance(NodeId(1), NodeId(0)), f64::INFINITY);
    }

    #[test]
    fn cache_hit_does_not_recompute() {
        let (g, [n0, _, _, n3, n4]) = super::helpers::diamond();
        let o = DistanceOracle::new(g);
        let first = o.distance(n0, n4);
        assert_eq!(o.computations(), 1);
        let second = o.distance(n0, n4);
        // Any destination from a cached origin is a hit.
        let _ = o.distance(n0, n3);
        assert_eq!(first, second);
        assert_eq!(o.computations(), 1);
        assert_eq!(o.cached_origins(), 1);
    }

    #[test]
    fn unrelated_edge_invalidates_everything() {
        let mut g = Graph::new(6);
        g.add_edge_bidirectional(NodeId(0), NodeId(1), 1.0).unwrap();
        let mut o = DistanceOracle::new(g);
        assert_eq!(o.distance(NodeId(0), NodeId(1)), 1.0);
        assert_eq!(o.computations(), 1);

        // Node 5 is not connected to 0 or 1 at all.
        o.add_edge(NodeId(4), NodeId(5), 1.0).unwrap();
        assert_eq!(o.cached_origins(), 0);
        assert_eq!(o.distance(NodeId(0), NodeId(1)), 1.0);
        assert_eq!(o.computations(), 2);
    }

    #[test]
    fn removal_changes_distance() {
        let (g, [n0, n1, _, _, n4]) = super::helpers::diamond();
        let mut o = DistanceOracle::new(g);
        assert_eq!(o.distance(n0, n4), 3.0);
        o.remove_edges(n0, n1);
        assert_eq!(o.distance(n0, n4), 6.0);
        o.clear_edges();
        assert_eq!(o.distance(n0, n4), f64::INFINITY);
    }

    #[test]
    fn precompute_fills_every_origin() {
        let (g, _) = super::helpers::diamond();
        let o = DistanceOracle::new(g);
        o.precompute_all();
        assert_eq!(o.cached_origins(), 5);
        assert_eq!(o.computations(), 5);
    }

    #[test]
    fn default_heuristic_is_exact() {
        let (g, [n0, _, _, _, n4]) = super::helpers::diamond();
        let o = DistanceOracle::new(g);
        assert_eq!(o.distance_heuristic(n0, n4), o.distance(n0, n4));
    }

    #[test]
    fn shared_across_threads() {
        let (g, [n0, _, _, _, n4]) = super::helpers::diamond();
        let o = DistanceOracle::new(g);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(o.distance(n0, n4), 3.0));
            }
        });
        assert!(o.computations() >= 1);
        assert_eq!(o.cached_origins(), 1);
    }
}

// ── GridGraph ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use mapf_core::{MapfError, NodeId};
    use crate::{GridGraph, SearchGraph};

    #[test]
    fn coordinates_roundtrip() {
        let g = GridGraph::open(4, 3);
        let id = g.id_from_coords(3, 2);
        assert_eq!(id, NodeId(11));
        assert_eq!(g.coords_from_id(id), (3, 2));
    }

    #[test]
    fn open_grid_distance_is_manhattan() {
        let g = GridGraph::open(5, 4);
        for a in 0..20u32 {
            for b in 0..20u32 {
                let (a, b) = (NodeId(a), NodeId(b));
                assert_eq!(g.distance(a, b), g.distance_heuristic(a, b), "{a} -> {b}");
            }
        }
    }

    #[test]
    fn interior_cell_has_four_neighbours() {
        let g = GridGraph::open(3, 3);
        assert_eq!(g.neighbours(g.id_from_coords(1, 1)).len(), 4);
        assert_eq!(g.neighbours(g.id_from_coords(0, 0)).len(), 2);
    }

    #[test]
    fn walls_force_detour_and_stay_admissible() {
        // 3x3 with the middle column blocked except the bottom row.
        let g = GridGraph::with_walls(3, 3, &[(1, 0), (1, 1)]).unwrap();
        let from = g.id_from_coords(0, 0);
        let to = g.id_from_coords(2, 0);
        assert_eq!(g.distance(from, to), 6.0);
        assert_eq!(g.distance_heuristic(from, to), 2.0);
        assert!(g.neighbours(g.id_from_coords(1, 1)).is_empty());
        assert_eq!(g.open_nodes().len(), 7);
    }

    #[test]
    fn bad_shapes_rejected() {
        let err = GridGraph::from_cells(3, 3, vec![true; 8]).unwrap_err();
        assert!(matches!(err, MapfError::GridShape { expected: 9, got: 8, .. }));
        assert!(GridGraph::with_walls(3, 3, &[(3, 0)]).is_err());
    }

    #[test]
    fn out_of_range_cell_reports_coordinates() {
        // (3, 0) would flatten to n3, which is a valid cell of a 3x3 grid.
        let err = GridGraph::with_walls(3, 3, &[(3, 0)]).unwrap_err();
        assert!(matches!(err, MapfError::CellOutOfRange { x: 3, y: 0, dim_x: 3, dim_y: 3 }));
        assert_eq!(err.to_string(), "cell (3, 0) outside a 3x3 grid");

        let mut g = GridGraph::open(3, 3);
        let err = g.set_open(0, 5, false).unwrap_err();
        assert!(matches!(err, MapfError::CellOutOfRange { x: 0, y: 5, .. }));
    }

    #[test]
    fn toggling_a_cell_invalidates_distances() {
        let mut g = GridGraph::open(3, 1);
        let (a, c) = (g.id_from_coords(0, 0), g.id_from_coords(2, 0));
        assert_eq!(g.distance(a, c), 2.0);
        g.set_open(1, 0, false).unwrap();
        assert_eq!(g.distance(a, c), f64::INFINITY);
        g.set_open(1, 0, true).unwrap();
        assert_eq!(g.distance(a, c), 2.0);
    }
}
