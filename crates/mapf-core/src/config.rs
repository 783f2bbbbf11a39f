//! Planner configuration.
//!
//! Typically built in code with struct-update syntax over
//! `PlannerConfig::default()`, or loaded from JSON by the application crate
//! (feature `serde`).

use crate::Tick;

/// How long a finished agent's goal vertex stays reserved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParkingHorizon {
    /// Reserve the goal for every tick from arrival onward, with no upper
    /// bound.  Stored as a single parking entry, not one entry per tick.
    #[default]
    Forever,

    /// Reserve the goal up to (exclusive) a tick equal to the graph's node
    /// count.  Plans that need more ticks than there are nodes are reported
    /// with `PlanError::HorizonExceeded`.
    NodeCount,

    /// Reserve the goal up to (exclusive) the given tick.
    Fixed(u64),
}

impl ParkingHorizon {
    /// The exclusive end tick of parking reservations for a graph of
    /// `node_count` nodes, or `None` for unbounded parking.
    pub fn end_tick(self, node_count: usize) -> Option<Tick> {
        match self {
            ParkingHorizon::Forever   => None,
            ParkingHorizon::NodeCount => Some(Tick(node_count as u64)),
            ParkingHorizon::Fixed(n)  => Some(Tick(n)),
        }
    }
}

/// Tunables for the single-agent search and the team orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Goal parking policy applied when committing a path.
    pub parking: ParkingHorizon,

    /// Upper bound on consecutive wait steps before a move is given up.
    /// `None` waits as long as the reservation table could still change;
    /// a move blocked past the table's last timed entry is always abandoned.
    pub max_wait: Option<u64>,

    /// Use the exact shortest distance as heuristic even when the graph
    /// offers a cheaper estimate (e.g. Manhattan on grids).
    pub exact_heuristic: bool,
}

impl PlannerConfig {
    /// Parse a config from a JSON document.  Missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::MapfResult<Self> {
        serde_json::from_str(json).map_err(|e| crate::MapfError::Config(e.to_string()))
    }

    /// `true` if waiting `waited` steps already exhausts `max_wait`.
    #[inline]
    pub fn wait_exhausted(&self, waited: u64) -> bool {
        self.max_wait.is_some_and(|max| waited > max)
    }
}
