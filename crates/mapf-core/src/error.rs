//! Error types shared by the `mapf-*` crates.
//!
//! Two layers:
//!
//! - [`MapfError`]: structural problems with the inputs (bad edge weights,
//!   node ids outside the graph, mismatched agent lists, bad config).  These
//!   abort the call that produced them.
//! - [`PlanError`]: why a single agent got no usable plan.  A team run
//!   records one per failed agent and keeps going.

use thiserror::Error;

use crate::{NodeId, Tick};

/// The top-level error type for `mapf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MapfError {
    #[error("node {node} out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("cell ({x}, {y}) outside a {dim_x}x{dim_y} grid")]
    CellOutOfRange {
        x:     usize,
        y:     usize,
        dim_x: usize,
        dim_y: usize,
    },

    #[error("a path needs at least one node")]
    EmptyPath,

    #[error("edge {from} -> {to} has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("a {dim_x}x{dim_y} grid needs {expected} cells, got {got}")]
    GridShape {
        dim_x:    usize,
        dim_y:    usize,
        expected: usize,
        got:      usize,
    },

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `mapf-*` crates.
pub type MapfResult<T> = Result<T, MapfError>;

/// Why one agent's plan is missing or incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanError {
    /// No chain of edges leads from start to goal, even ignoring other agents.
    #[error("goal {goal} unreachable from {start}")]
    UnreachableGoal { start: NodeId, goal: NodeId },

    /// A chain exists, but every timing of it collides with earlier agents.
    #[error("every route {start} -> {goal} is blocked by earlier reservations")]
    BlockedByReservations { start: NodeId, goal: NodeId },

    /// The agent arrives at or after the parking horizon, so its goal is not
    /// reserved for every later tick.  The path itself was still committed.
    #[error("arrival at {arrival} is not before the parking horizon {horizon}")]
    HorizonExceeded { arrival: Tick, horizon: Tick },
}
