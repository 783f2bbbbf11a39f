//! Unit tests for mapf-reservation.

#[cfg(test)]
mod claims {
    use mapf_core::{NodeId, Tick};
    use crate::{Reservation, ReservationTable};

    #[test]
    fn empty_table_blocks_nothing() {
        let t = ReservationTable::new();
        assert!(t.is_empty());
        assert!(!t.is_vertex_blocked(Tick(0), NodeId(0)));
        assert!(!t.is_transition_blocked(Tick(3), NodeId(0), NodeId(1)));
        assert_eq!(t.last_tick(), None);
        assert!(t.is_quiet_from(Tick::ZERO));
    }

    #[test]
    fn vertex_claim_is_per_tick() {
        let mut t = ReservationTable::new();
        t.reserve_vertex(Tick(2), NodeId(5));
        assert!(t.is_vertex_blocked(Tick(2), NodeId(5)));
        assert!(!t.is_vertex_blocked(Tick(1), NodeId(5)));
        assert!(!t.is_vertex_blocked(Tick(3), NodeId(5)));
        assert!(!t.is_vertex_blocked(Tick(2), NodeId(4)));
    }

    #[test]
    fn occupied_destination_blocks_transition() {
        let mut t = ReservationTable::new();
        t.reserve_vertex(Tick(1), NodeId(1));
        assert!(t.is_transition_blocked(Tick(1), NodeId(0), NodeId(1)));
        assert!(!t.is_transition_blocked(Tick(2), NodeId(0), NodeId(1)));
    }

    #[test]
    fn reverse_edge_blocks_swap_only() {
        let mut t = ReservationTable::new();
        // Someone moved 1 → 2, arriving at tick 3.
        t.reserve_edge(Tick(3), NodeId(1), NodeId(2));
        assert!(t.is_transition_blocked(Tick(3), NodeId(2), NodeId(1)));
        // Following in the same direction is not a swap.
        assert!(!t.is_transition_blocked(Tick(3), NodeId(1), NodeId(2)));
        // Same reverse move one tick later is fine.
        assert!(!t.is_transition_blocked(Tick(4), NodeId(2), NodeId(1)));
    }

    #[test]
    fn duplicates_counted_once() {
        let mut t = ReservationTable::new();
        t.reserve_vertex(Tick(1), NodeId(1));
        t.reserve_vertex(Tick(1), NodeId(1));
        t.reserve_edge(Tick(1), NodeId(1), NodeId(1));
        assert_eq!(t.timed_len(), 1);
        assert_eq!(t.tick_count(), 1);
    }

    #[test]
    fn listing_is_sorted_and_typed() {
        let mut t = ReservationTable::new();
        t.reserve_edge(Tick(1), NodeId(0), NodeId(1));
        t.reserve_vertex(Tick(1), NodeId(1));
        t.reserve_vertex(Tick(0), NodeId(0));
        assert_eq!(
            t.reservations_at(Tick(1)),
            vec![
                Reservation::Vertex(NodeId(1)),
                Reservation::Edge { from: NodeId(0), to: NodeId(1) },
            ]
        );
        let ticks: Vec<Tick> = t.iter().map(|(tick, _)| tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(1), Tick(1)]);
        assert_eq!(t.last_tick(), Some(Tick(1)));
    }

    #[test]
    fn last_vertex_claim_ignores_edges() {
        let mut t = ReservationTable::new();
        t.reserve_vertex(Tick(2), NodeId(3));
        t.reserve_vertex(Tick(5), NodeId(3));
        t.reserve_edge(Tick(7), NodeId(3), NodeId(4));
        assert_eq!(t.last_vertex_claim(NodeId(3)), Some(Tick(5)));
        assert_eq!(t.last_vertex_claim(NodeId(9)), None);
    }
}

#[cfg(test)]
mod parking {
    use mapf_core::{NodeId, Tick};
    use crate::ReservationTable;

    #[test]
    fn parked_vertex_blocked_from_tick_on() {
        let mut t = ReservationTable::new();
        t.park(NodeId(4), Tick(3));
        assert!(!t.is_vertex_blocked(Tick(2), NodeId(4)));
        assert!(t.is_vertex_blocked(Tick(3), NodeId(4)));
        assert!(t.is_vertex_blocked(Tick(1_000_000), NodeId(4)));
        assert_eq!(t.timed_len(), 0);
        assert!(!t.is_empty());
    }

    #[test]
    fn earliest_parking_kept() {
        let mut t = ReservationTable::new();
        t.park(NodeId(1), Tick(5));
        t.park(NodeId(1), Tick(2));
        t.park(NodeId(1), Tick(9));
        assert_eq!(t.parked_since(NodeId(1)), Some(Tick(2)));
        assert_eq!(t.parked(), vec![(NodeId(1), Tick(2))]);
    }

    #[test]
    fn blocked_forever_only_past_timed_claims() {
        let mut t = ReservationTable::new();
        t.reserve_vertex(Tick(4), NodeId(7));
        t.park(NodeId(2), Tick(1));
        // A timed claim still exists at tick 4, so things may change.
        assert!(!t.is_blocked_forever(Tick(3), NodeId(1), NodeId(2)));
        // Past tick 4 only parking is left.
        assert!(t.is_blocked_forever(Tick(5), NodeId(1), NodeId(2)));
        assert!(!t.is_blocked_forever(Tick(5), NodeId(1), NodeId(3)));
    }
}

#[cfg(test)]
mod commit {
    use mapf_core::{NodeId, Path, PlanError, Tick};
    use crate::ReservationTable;

    fn p(ids: &[u32]) -> Path {
        Path::new(ids.iter().map(|&i| NodeId(i)).collect()).unwrap()
    }

    #[test]
    fn claims_every_vertex_and_move() {
        let mut t = ReservationTable::new();
        t.commit_path(&p(&[0, 1, 1, 2]), None).unwrap();
        for (tick, node) in [(0, 0), (1, 1), (2, 1), (3, 2)] {
            assert!(t.is_vertex_blocked(Tick(tick), NodeId(node)));
        }
        // 1 → 2 landed at tick 3: nobody may go 2 → 1 at tick 3.
        assert!(t.is_transition_blocked(Tick(3), NodeId(2), NodeId(1)));
        // 0 → 1 landed at tick 1.
        assert!(t.is_transition_blocked(Tick(1), NodeId(1), NodeId(0)));
    }

    #[test]
    fn forever_parks_goal_at_arrival() {
        let mut t = ReservationTable::new();
        t.commit_path(&p(&[0, 1, 2]), None).unwrap();
        assert_eq!(t.parked_since(NodeId(2)), Some(Tick(2)));
        assert!(t.is_vertex_blocked(Tick(500), NodeId(2)));
    }

    #[test]
    fn fixed_horizon_reserves_tick_by_tick() {
        let mut t = ReservationTable::new();
        t.commit_path(&p(&[0, 1, 2]), Some(Tick(5))).unwrap();
        assert!(t.is_vertex_blocked(Tick(3), NodeId(2)));
        assert!(t.is_vertex_blocked(Tick(4), NodeId(2)));
        assert!(!t.is_vertex_blocked(Tick(5), NodeId(2)));
        assert_eq!(t.parked_since(NodeId(2)), None);
    }

    #[test]
    fn horizon_exceeded_still_commits_path() {
        let mut t = ReservationTable::new();
        let err = t.commit_path(&p(&[0, 1, 2, 3]), Some(Tick(3))).unwrap_err();
        assert_eq!(err, PlanError::HorizonExceeded { arrival: Tick(3), horizon: Tick(3) });
        assert!(t.is_vertex_blocked(Tick(3), NodeId(3)));
        assert!(!t.is_vertex_blocked(Tick(4), NodeId(3)));
    }
}
