//! `TeamPlanner`: fixed-priority sequencing of single-agent searches.
//!
//! # Loop
//!
//! ```text
//! table = ∅
//! for agent i in input order:
//!     plan i against table            (agents 0..i-1 only)
//!     Ok(path)  → commit path, park i on its goal
//!     Err(e)    → record e, i contributes nothing
//! ```
//!
//! Later agents always defer to earlier ones.  There is no reordering and no
//! backtracking, so swapping two agents in the input can change who waits
//! and who fails.

use tracing::{debug, info, warn};

use mapf_core::{AgentId, MapfError, MapfResult, NodeId, Path, PlanError, PlannerConfig, Tick};
use mapf_graph::SearchGraph;
use mapf_reservation::ReservationTable;

use crate::observer::{NoopObserver, PlanObserver};
use crate::single::{CooperativeAStar, SingleAgentPlanner};
use crate::validate::{find_conflicts, Conflict};

// ── AgentPlan ─────────────────────────────────────────────────────────────────

/// One agent's outcome.
///
/// `path` is `None` when the agent could not be planned.  `error` is also
/// set alongside a path when it overran a finite parking horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPlan {
    pub agent: AgentId,
    pub start: NodeId,
    pub goal:  NodeId,
    pub path:  Option<Path>,
    pub error: Option<PlanError>,
}

impl AgentPlan {
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }
}

// ── TeamPlan ──────────────────────────────────────────────────────────────────

/// Result of a team run: one [`AgentPlan`] per input agent, in input order,
/// plus the reservation table every committed path went into.
#[derive(Debug, Clone)]
pub struct TeamPlan {
    pub agents:       Vec<AgentPlan>,
    pub reservations: ReservationTable,
}

impl TeamPlan {
    /// Per-agent paths, `None` for failed agents.
    pub fn paths(&self) -> Vec<Option<&Path>> {
        self.agents.iter().map(|a| a.path.as_ref()).collect()
    }

    pub fn solved_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_solved()).count()
    }

    /// Latest arrival over all solved agents.
    pub fn makespan(&self) -> Option<Tick> {
        self.agents
            .iter()
            .filter_map(|a| a.path.as_ref())
            .map(Path::arrival)
            .max()
    }

    /// Sum of arrival ticks over all solved agents.
    pub fn sum_of_costs(&self) -> u64 {
        self.agents
            .iter()
            .filter_map(|a| a.path.as_ref())
            .map(|p| p.arrival().0)
            .sum()
    }

    /// Vertex and swap conflicts between solved agents.  Empty for any team
    /// planned with unbounded parking.
    pub fn conflicts(&self) -> Vec<Conflict> {
        find_conflicts(&self.agents)
    }

    /// `(paths, reservations)`, the shape presentation layers consume.
    pub fn into_parts(self) -> (Vec<Option<Path>>, ReservationTable) {
        let paths = self.agents.into_iter().map(|a| a.path).collect();
        (paths, self.reservations)
    }
}

// ── TeamPlanner ───────────────────────────────────────────────────────────────

/// Plans a team in fixed priority order with a pluggable single-agent search.
#[derive(Debug, Clone, Default)]
pub struct TeamPlanner<P: SingleAgentPlanner = CooperativeAStar> {
    planner: P,
    config:  PlannerConfig,
}

impl TeamPlanner<CooperativeAStar> {
    /// A team planner using [`CooperativeAStar`] configured with `config`.
    pub fn new(config: PlannerConfig) -> Self {
        Self { planner: CooperativeAStar::new(config.clone()), config }
    }
}

impl<P: SingleAgentPlanner> TeamPlanner<P> {
    /// A team planner driving a custom single-agent search.  `config` still
    /// decides goal parking.
    pub fn with_planner(planner: P, config: PlannerConfig) -> Self {
        Self { planner, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan every agent `i` from `starts[i]` to `goals[i]`.
    ///
    /// Only a length mismatch between `starts` and `goals` fails the whole
    /// run; per-agent failures are recorded in the returned [`TeamPlan`].
    pub fn plan_team(
        &self,
        graph:  &dyn SearchGraph,
        starts: &[NodeId],
        goals:  &[NodeId],
    ) -> MapfResult<TeamPlan> {
        self.plan_team_with(graph, starts, goals, &mut NoopObserver)
    }

    /// Like [`plan_team`](Self::plan_team), reporting progress to `observer`.
    pub fn plan_team_with<O: PlanObserver + ?Sized>(
        &self,
        graph:    &dyn SearchGraph,
        starts:   &[NodeId],
        goals:    &[NodeId],
        observer: &mut O,
    ) -> MapfResult<TeamPlan> {
        if starts.len() != goals.len() {
            return Err(MapfError::AgentCountMismatch {
                expected: starts.len(),
                got:      goals.len(),
                what:     "goals",
            });
        }

        let parking_end = self.config.parking.end_tick(graph.node_count());
        let mut reservations = ReservationTable::new();
        let mut agents = Vec::with_capacity(starts.len());

        for (i, (&start, &goal)) in starts.iter().zip(goals).enumerate() {
            let agent = AgentId(i as u32);
            observer.on_agent_start(agent, start, goal);

            let plan = match self.planner.plan(graph, start, goal, &reservations) {
                Ok(path) => {
                    let error = reservations.commit_path(&path, parking_end).err();
                    if let Some(err) = error {
                        warn!(agent = agent.0, %err, "committed without full goal parking");
                    }
                    debug!(agent = agent.0, arrival = %path.arrival(), "committed");
                    AgentPlan { agent, start, goal, path: Some(path), error }
                }
                Err(err) => {
                    debug!(agent = agent.0, %err, "no path");
                    AgentPlan { agent, start, goal, path: None, error: Some(err) }
                }
            };

            observer.on_agent_planned(agent, plan.path.as_ref(), plan.error);
            agents.push(plan);
        }

        let team = TeamPlan { agents, reservations };
        info!(
            agents = team.agents.len(),
            solved = team.solved_count(),
            makespan = team.makespan().map_or(0, |t| t.0),
            sum_of_costs = team.sum_of_costs(),
            "team planned"
        );
        observer.on_team_end(team.solved_count(), &team.reservations);
        Ok(team)
    }
}

/// Plan a team with the default [`TeamPlanner`].
pub fn plan_team(
    graph:  &dyn SearchGraph,
    starts: &[NodeId],
    goals:  &[NodeId],
) -> MapfResult<TeamPlan> {
    TeamPlanner::<CooperativeAStar>::default().plan_team(graph, starts, goals)
}
