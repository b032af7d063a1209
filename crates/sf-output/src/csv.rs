//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `agent_paths.csv`
//! - `agent_outcomes.csv`
//! - `popular_zones.csv`
//! - `shelf_statistics.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use sf_agent::AgentOutcome;
use sf_sim::SimReport;

use crate::row::{OutcomeRow, PathRow, ShelfRow, ZoneRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    paths:    Writer<File>,
    outcomes: Writer<File>,
    zones:    Writer<File>,
    shelves:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut paths = Writer::from_path(dir.join("agent_paths.csv"))?;
        paths.write_record(["agent_id", "seq", "x", "z", "time_ms", "step", "event"])?;

        let mut outcomes = Writer::from_path(dir.join("agent_outcomes.csv"))?;
        outcomes.write_record([
            "agent_id", "client", "arrival_ms", "end_time_ms", "status", "steps", "purchases",
        ])?;

        let mut zones = Writer::from_path(dir.join("popular_zones.csv"))?;
        zones.write_record(["x", "z", "visits"])?;

        let mut shelves = Writer::from_path(dir.join("shelf_statistics.csv"))?;
        shelves.write_record([
            "shelf_id", "category", "x", "z", "visits", "purchases", "conversion_rate",
        ])?;

        Ok(Self { paths, outcomes, zones, shelves, finished: false })
    }
}

impl ReportWriter for CsvWriter {
    fn write_outcomes(&mut self, outcomes: &[AgentOutcome]) -> OutputResult<()> {
        for outcome in outcomes {
            for row in PathRow::from_outcome(outcome) {
                self.paths.write_record(&[
                    row.agent_id.to_string(),
                    row.seq.to_string(),
                    row.x.to_string(),
                    row.z.to_string(),
                    row.time_ms.to_string(),
                    (row.step as u8).to_string(),
                    row.event,
                ])?;
            }

            let row = OutcomeRow::from(outcome);
            self.outcomes.write_record(&[
                row.agent_id.to_string(),
                row.client,
                row.arrival_ms.to_string(),
                row.end_time_ms.to_string(),
                row.status.to_owned(),
                row.steps.to_string(),
                row.purchases.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_report(&mut self, report: &SimReport) -> OutputResult<()> {
        for row in report.popular_zones.iter().map(ZoneRow::from) {
            self.zones.write_record(&[row.x.to_string(), row.z.to_string(), row.visits.to_string()])?;
        }
        for row in report.shelf_statistics.iter().map(ShelfRow::from) {
            self.shelves.write_record(&[
                row.shelf_id.to_string(),
                row.category,
                row.x.to_string(),
                row.z.to_string(),
                row.visits.to_string(),
                row.purchases.to_string(),
                row.conversion_rate.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.paths.flush()?;
        self.outcomes.flush()?;
        self.zones.flush()?;
        self.shelves.flush()?;
        Ok(())
    }
}
