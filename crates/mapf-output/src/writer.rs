//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSummaryRow, OutputResult, PathRow, ReservationRow};

/// Sink for plan output.
///
/// Errors surface here, but [`PlanOutputObserver`][crate::PlanOutputObserver]
/// stores them instead of interrupting planning; fetch them with
/// `take_error` afterwards.
pub trait OutputWriter {
    /// Write one agent's outcome.
    fn write_agent(&mut self, row: &AgentSummaryRow) -> OutputResult<()>;

    /// Write the tick-by-tick positions of one agent.
    fn write_path(&mut self, rows: &[PathRow]) -> OutputResult<()>;

    /// Write the final reservation table.
    fn write_reservations(&mut self, rows: &[ReservationRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
