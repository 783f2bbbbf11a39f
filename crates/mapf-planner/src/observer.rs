//! Planning observer trait for progress reporting and data collection.

use mapf_core::{AgentId, NodeId, Path, PlanError};
use mapf_reservation::ReservationTable;

/// Callbacks invoked by [`TeamPlanner::plan_team_with`][crate::TeamPlanner::plan_team_with]
/// as agents are planned in priority order.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl PlanObserver for ProgressPrinter {
///     fn on_agent_planned(&mut self, agent: AgentId, path: Option<&Path>, _: Option<PlanError>) {
///         match path {
///             Some(p) => println!("{agent}: arrives at {}", p.arrival()),
///             None    => println!("{agent}: no path"),
///         }
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called before agent `agent` is handed to the single-agent planner.
    fn on_agent_start(&mut self, _agent: AgentId, _start: NodeId, _goal: NodeId) {}

    /// Called once the agent's outcome is known and, on success, its path has
    /// been committed to the reservation table.
    ///
    /// `error` is set both for agents without a path and for agents whose
    /// path was committed with a finite parking horizon it overran.
    fn on_agent_planned(
        &mut self,
        _agent: AgentId,
        _path:  Option<&Path>,
        _error: Option<PlanError>,
    ) {}

    /// Called once after the last agent, with the final reservation table.
    fn on_team_end(&mut self, _solved: usize, _reservations: &ReservationTable) {}
}

/// A [`PlanObserver`] that does nothing.  Use when you need to call
/// `plan_team_with` but don't want callbacks.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
