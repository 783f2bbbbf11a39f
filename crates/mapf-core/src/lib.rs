//! `mapf-core`: foundational types for cooperative multi-agent path planning.
//!
//! This crate is a dependency of every other `mapf-*` crate.  It has no
//! `mapf-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`                                   |
//! | [`time`]        | `Tick`                                                |
//! | [`path`]        | `Path`: one agent's time-indexed node sequence       |
//! | [`config`]      | `PlannerConfig`, `ParkingHorizon`                     |
//! | [`rng`]         | `GraphRng` (seeded scenario generation)               |
//! | [`error`]       | `MapfError`, `MapfResult`, `PlanError`                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types   |
//! |         | and enables `PlannerConfig::from_json_str`.                |

pub mod config;
pub mod error;
pub mod ids;
pub mod path;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ParkingHorizon, PlannerConfig};
pub use error::{MapfError, MapfResult, PlanError};
pub use ids::{AgentId, NodeId};
pub use path::Path;
pub use rng::GraphRng;
pub use time::Tick;
