//! `PlanOutputObserver<W>`: bridges `PlanObserver` to an `OutputWriter`.

use mapf_core::{AgentId, NodeId, Path, PlanError};
use mapf_planner::PlanObserver;
use mapf_reservation::ReservationTable;

use crate::row::{AgentSummaryRow, PathRow, ReservationRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`PlanObserver`] that writes every agent's outcome and path as it is
/// planned, and the final reservation table once the team is done.
///
/// Errors from the writer are stored internally because `PlanObserver`
/// methods have no return value.  After planning returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct PlanOutputObserver<W: OutputWriter> {
    writer:     W,
    /// Endpoints of the agent currently being planned.
    current:    (NodeId, NodeId),
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> PlanOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current:    (NodeId::INVALID, NodeId::INVALID),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after planning returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after planning).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> PlanObserver for PlanOutputObserver<W> {
    fn on_agent_start(&mut self, _agent: AgentId, start: NodeId, goal: NodeId) {
        self.current = (start, goal);
    }

    fn on_agent_planned(&mut self, agent: AgentId, path: Option<&Path>, error: Option<PlanError>) {
        let (start, goal) = self.current;
        let row = AgentSummaryRow::new(agent, start.0, goal.0, path, error);
        let result = self.writer.write_agent(&row);
        self.store_err(result);

        if let Some(path) = path {
            let result = self.writer.write_path(&PathRow::from_path(agent, path));
            self.store_err(result);
        }
    }

    fn on_team_end(&mut self, _solved: usize, reservations: &ReservationTable) {
        let result = self.writer.write_reservations(&ReservationRow::from_table(reservations));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
