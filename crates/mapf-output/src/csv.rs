//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agents.csv`
//! - `paths.csv`
//! - `reservations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSummaryRow, OutputResult, PathRow, ReservationRow};
use crate::writer::OutputWriter;

/// Writes plan output to three CSV files.
pub struct CsvWriter {
    agents:       Writer<File>,
    paths:        Writer<File>,
    reservations: Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.  `dir` is created if missing.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut agents = Writer::from_path(dir.join("agents.csv"))?;
        agents.write_record(["agent_id", "start", "goal", "solved", "arrival", "waits", "error"])?;

        let mut paths = Writer::from_path(dir.join("paths.csv"))?;
        paths.write_record(["agent_id", "tick", "node"])?;

        let mut reservations = Writer::from_path(dir.join("reservations.csv"))?;
        reservations.write_record(["tick", "from", "to", "parked"])?;

        Ok(Self {
            agents,
            paths,
            reservations,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agent(&mut self, row: &AgentSummaryRow) -> OutputResult<()> {
        self.agents.write_record(&[
            row.agent_id.to_string(),
            row.start.to_string(),
            row.goal.to_string(),
            (row.solved as u8).to_string(),
            row.arrival.map(|t| t.to_string()).unwrap_or_default(),
            row.waits.to_string(),
            row.error.clone(),
        ])?;
        Ok(())
    }

    fn write_path(&mut self, rows: &[PathRow]) -> OutputResult<()> {
        for row in rows {
            self.paths.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.node.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_reservations(&mut self, rows: &[ReservationRow]) -> OutputResult<()> {
        for row in rows {
            self.reservations.write_record(&[
                row.tick.to_string(),
                row.from.to_string(),
                row.to.to_string(),
                (row.parked as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.paths.flush()?;
        self.reservations.flush()?;
        Ok(())
    }
}
