//! Independent checks of planned paths.
//!
//! Nothing here trusts the reservation table: paths are re-walked against the
//! graph and against each other, so the checks also catch bugs in the
//! planner itself.

use std::fmt;

use thiserror::Error;

use mapf_core::{AgentId, NodeId, Path, Tick};
use mapf_graph::SearchGraph;

use crate::team::{AgentPlan, TeamPlan};

// ── Path validity ─────────────────────────────────────────────────────────────

/// Why a path does not fit its agent or its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathDefect {
    #[error("path starts at {found}, agent starts at {expected}")]
    WrongStart { expected: NodeId, found: NodeId },

    #[error("path ends at {found}, agent's goal is {expected}")]
    WrongGoal { expected: NodeId, found: NodeId },

    #[error("step {from} -> {to} arriving at {tick} is neither a wait nor an edge")]
    MissingEdge { tick: Tick, from: NodeId, to: NodeId },
}

/// Check that `path` runs from `start` to `goal` and that every step is a
/// wait or an edge of `graph`.
pub fn check_path(
    graph: &dyn SearchGraph,
    path:  &Path,
    start: NodeId,
    goal:  NodeId,
) -> Result<(), PathDefect> {
    if path.start() != start {
        return Err(PathDefect::WrongStart { expected: start, found: path.start() });
    }
    if path.goal() != goal {
        return Err(PathDefect::WrongGoal { expected: goal, found: path.goal() });
    }
    for (tick, from, to) in path.steps() {
        if from != to && !graph.neighbours(from).iter().any(|e| e.to == to) {
            return Err(PathDefect::MissingEdge { tick, from, to });
        }
    }
    Ok(())
}

// ── Inter-agent conflicts ─────────────────────────────────────────────────────

/// Two agents colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Both agents stand on `node` at `tick`.
    Vertex { tick: Tick, node: NodeId, first: AgentId, second: AgentId },

    /// `first` moves `from → to` while `second` moves `to → from`, both
    /// arriving at `tick`.
    Swap { tick: Tick, first: AgentId, second: AgentId, from: NodeId, to: NodeId },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Vertex { tick, node, first, second } => {
                write!(f, "{first} and {second} both on {node} at {tick}")
            }
            Conflict::Swap { tick, first, second, from, to } => {
                write!(f, "{first} ({from} -> {to}) swaps with {second} at {tick}")
            }
        }
    }
}

/// Every vertex and swap conflict between pairs of solved agents.
///
/// Each agent is taken to stay on its goal after arriving, so a pair is
/// checked up to the later of their two arrivals.
pub fn find_conflicts(agents: &[AgentPlan]) -> Vec<Conflict> {
    let solved: Vec<(AgentId, &Path)> = agents
        .iter()
        .filter_map(|a| a.path.as_ref().map(|p| (a.agent, p)))
        .collect();

    let mut out = Vec::new();
    for (i, &(first, a)) in solved.iter().enumerate() {
        for &(second, b) in &solved[i + 1..] {
            let horizon = a.arrival().max(b.arrival());
            for t in 0..=horizon.0 {
                let tick = Tick(t);
                let (pa, pb) = (a.position_at(tick), b.position_at(tick));
                if pa == pb {
                    out.push(Conflict::Vertex { tick, node: pa, first, second });
                    continue;
                }
                if t == 0 {
                    continue;
                }
                let prev = Tick(t - 1);
                let (qa, qb) = (a.position_at(prev), b.position_at(prev));
                if qa == pb && qb == pa {
                    out.push(Conflict::Swap { tick, first, second, from: qa, to: pa });
                }
            }
        }
    }
    out
}

// ── Whole-team report ─────────────────────────────────────────────────────────

/// Outcome of [`validate_team`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamReport {
    pub defects:   Vec<(AgentId, PathDefect)>,
    pub conflicts: Vec<Conflict>,
}

impl TeamReport {
    pub fn is_clean(&self) -> bool {
        self.defects.is_empty() && self.conflicts.is_empty()
    }
}

/// Check every solved path of `team` and every pair of solved agents.
pub fn validate_team(graph: &dyn SearchGraph, team: &TeamPlan) -> TeamReport {
    let defects = team
        .agents
        .iter()
        .filter_map(|a| {
            let path = a.path.as_ref()?;
            check_path(graph, path, a.start, a.goal).err().map(|d| (a.agent, d))
        })
        .collect();
    TeamReport { defects, conflicts: team.conflicts() }
}
