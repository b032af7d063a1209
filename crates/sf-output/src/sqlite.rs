//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `agent_paths`, `agent_outcomes`, `popular_zones` and
//! `shelf_statistics`.

use std::path::Path;

use rusqlite::Connection;

use sf_agent::AgentOutcome;
use sf_sim::SimReport;

use crate::row::{OutcomeRow, PathRow, ShelfRow, ZoneRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_paths (
                 agent_id INTEGER NOT NULL,
                 seq      INTEGER NOT NULL,
                 x        INTEGER NOT NULL,
                 z        INTEGER NOT NULL,
                 time_ms  INTEGER NOT NULL,
                 step     INTEGER NOT NULL,
                 event    TEXT    NOT NULL,
                 PRIMARY KEY (agent_id, seq)
             );
             CREATE TABLE IF NOT EXISTS agent_outcomes (
                 agent_id    INTEGER PRIMARY KEY,
                 client      TEXT    NOT NULL,
                 arrival_ms  INTEGER NOT NULL,
                 end_time_ms INTEGER NOT NULL,
                 status      TEXT    NOT NULL,
                 steps       INTEGER NOT NULL,
                 purchases   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS popular_zones (
                 x      INTEGER NOT NULL,
                 z      INTEGER NOT NULL,
                 visits INTEGER NOT NULL,
                 PRIMARY KEY (x, z)
             );
             CREATE TABLE IF NOT EXISTS shelf_statistics (
                 shelf_id        INTEGER PRIMARY KEY,
                 category        TEXT    NOT NULL,
                 x               INTEGER NOT NULL,
                 z               INTEGER NOT NULL,
                 visits          INTEGER NOT NULL,
                 purchases       INTEGER NOT NULL,
                 conversion_rate REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl ReportWriter for SqliteWriter {
    fn write_outcomes(&mut self, outcomes: &[AgentOutcome]) -> OutputResult<()> {
        if outcomes.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut path_stmt = tx.prepare_cached(
                "INSERT INTO agent_paths (agent_id, seq, x, z, time_ms, step, event) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            let mut outcome_stmt = tx.prepare_cached(
                "INSERT INTO agent_outcomes \
                 (agent_id, client, arrival_ms, end_time_ms, status, steps, purchases) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for outcome in outcomes {
                for row in PathRow::from_outcome(outcome) {
                    path_stmt.execute(rusqlite::params![
                        row.agent_id,
                        row.seq,
                        row.x,
                        row.z,
                        row.time_ms as i64,
                        row.step as i64,
                        row.event,
                    ])?;
                }
                let row = OutcomeRow::from(outcome);
                outcome_stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.client,
                    row.arrival_ms as i64,
                    row.end_time_ms as i64,
                    row.status,
                    row.steps as i64,
                    row.purchases as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_report(&mut self, report: &SimReport) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut zone_stmt = tx.prepare_cached(
                "INSERT INTO popular_zones (x, z, visits) VALUES (?1, ?2, ?3)",
            )?;
            for row in report.popular_zones.iter().map(ZoneRow::from) {
                zone_stmt.execute(rusqlite::params![row.x, row.z, row.visits as i64])?;
            }

            let mut shelf_stmt = tx.prepare_cached(
                "INSERT INTO shelf_statistics \
                 (shelf_id, category, x, z, visits, purchases, conversion_rate) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in report.shelf_statistics.iter().map(ShelfRow::from) {
                shelf_stmt.execute(rusqlite::params![
                    row.shelf_id,
                    row.category,
                    row.x,
                    row.z,
                    row.visits as i64,
                    row.purchases as i64,
                    row.conversion_rate,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
