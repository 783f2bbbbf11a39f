//! `mapf-output`: writers for planned paths and reservation tables.
//!
//! The planning core owns no file format; this crate is one adapter on top of
//! it.  The CSV backend creates three files:
//!
//! | File               | One row per                                          |
//! |--------------------|------------------------------------------------------|
//! | `agents.csv`       | agent: start, goal, outcome, arrival                 |
//! | `paths.csv`        | `(agent, tick)` position of every solved agent       |
//! | `reservations.csv` | timed claim, plus one flagged row per parked goal    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`PlanOutputObserver`], which implements `mapf_planner::PlanObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mapf_output::{CsvWriter, PlanOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PlanOutputObserver::new(writer);
//! planner.plan_team_with(&graph, &starts, &goals, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PlanOutputObserver;
pub use row::{AgentSummaryRow, PathRow, ReservationRow};
pub use writer::OutputWriter;
