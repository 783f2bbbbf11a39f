//! `mapf-planner`: cooperative single-agent search and fixed-priority team
//! planning.
//!
//! # Pipeline
//!
//! ```text
//! Graph ─▶ DistanceOracle ─▶ CooperativeAStar ◀─ ReservationTable ◀─ TeamPlanner
//!                              (heuristic)          (claims so far)     (commits)
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`single`]   | `SingleAgentPlanner` trait, `CooperativeAStar`, `plan_single` |
//! | [`team`]     | `TeamPlanner`, `TeamPlan`, `AgentPlan`, `plan_team`        |
//! | [`observer`] | `PlanObserver` callbacks, `NoopObserver`                   |
//! | [`validate`] | Path and conflict checks independent of the table         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mapf_graph::GridGraph;
//! use mapf_planner::plan_team;
//!
//! let grid = GridGraph::open(3, 3);
//! let team = plan_team(&grid, &[NodeId(3), NodeId(1)], &[NodeId(5), NodeId(7)])?;
//! assert!(team.conflicts().is_empty());
//! ```

pub mod observer;
pub mod single;
pub mod team;
pub mod validate;


pub use observer::{NoopObserver, PlanObserver};
pub use single::{plan_single, CooperativeAStar, SingleAgentPlanner};
pub use team::{plan_team, AgentPlan, TeamPlan, TeamPlanner};
pub use validate::{check_path, find_conflicts, validate_team, Conflict, PathDefect, TeamReport};
