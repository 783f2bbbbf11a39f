//! Plain data row types written by output backends.

use mapf_core::{AgentId, Path, PlanError};
use mapf_reservation::{Reservation, ReservationTable};

/// One agent's planning outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSummaryRow {
    pub agent_id: u32,
    pub start:    u32,
    pub goal:     u32,
    pub solved:   bool,
    /// Arrival tick; `None` for unsolved agents.
    pub arrival:  Option<u64>,
    pub waits:    u64,
    /// Display form of the agent's `PlanError`, empty if none.
    pub error:    String,
}

impl AgentSummaryRow {
    pub fn new(
        agent: AgentId,
        start: u32,
        goal:  u32,
        path:  Option<&Path>,
        error: Option<PlanError>,
    ) -> Self {
        Self {
            agent_id: agent.0,
            start,
            goal,
            solved:   path.is_some(),
            arrival:  path.map(|p| p.arrival().0),
            waits:    path.map_or(0, |p| p.wait_count() as u64),
            error:    error.map(|e| e.to_string()).unwrap_or_default(),
        }
    }
}

/// Where one agent stands at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub node:     u32,
}

impl PathRow {
    /// One row per tick of `path`, up to and including arrival.
    pub fn from_path(agent: AgentId, path: &Path) -> Vec<PathRow> {
        path.iter()
            .map(|(tick, node)| PathRow { agent_id: agent.0, tick: tick.0, node: node.0 })
            .collect()
    }
}

/// One reservation table entry.
///
/// Vertex claims have `from == to`.  Rows with `parked` set stand for an
/// open-ended parking entry: the vertex is taken from `tick` onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationRow {
    pub tick:   u64,
    pub from:   u32,
    pub to:     u32,
    pub parked: bool,
}

impl ReservationRow {
    /// Timed claims in tick order, followed by parking entries by vertex.
    pub fn from_table(table: &ReservationTable) -> Vec<ReservationRow> {
        let timed = table.iter().map(|(tick, r)| {
            let (from, to) = match r {
                Reservation::Vertex(n)        => (n, n),
                Reservation::Edge { from, to } => (from, to),
            };
            ReservationRow { tick: tick.0, from: from.0, to: to.0, parked: false }
        });
        let parked = table.parked().into_iter().map(|(node, since)| ReservationRow {
            tick:   since.0,
            from:   node.0,
            to:     node.0,
            parked: true,
        });
        timed.chain(parked).collect()
    }
}
