//! JSON output backend.
//!
//! Writes one `report.json` holding the complete [`SimReport`] when the run
//! ends.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sf_agent::AgentOutcome;
use sf_sim::SimReport;

use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes the full report as pretty-printed JSON.
///
/// The report passed to [`write_report`][ReportWriter::write_report] already
/// carries every outcome, so streamed outcomes are only counted.
pub struct JsonWriter {
    path:     PathBuf,
    streamed: usize,
}

impl JsonWriter {
    /// Target `report.json` in `dir`.  The file is created by `write_report`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        if !dir.is_dir() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self { path: dir.join("report.json"), streamed: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Outcomes seen through `write_outcomes` so far.
    pub fn streamed(&self) -> usize {
        self.streamed
    }
}

impl ReportWriter for JsonWriter {
    fn write_outcomes(&mut self, outcomes: &[AgentOutcome]) -> OutputResult<()> {
        self.streamed += outcomes.len();
        Ok(())
    }

    fn write_report(&mut self, report: &SimReport) -> OutputResult<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
