//! Integration tests for sf-output.

#[cfg(test)]
mod fixtures {
    use sf_agent::{AgentOutcome, AgentProfile, AgentRun, PathEntry, PathEvent, ProfileBuilder, TerminalStatus};
    use sf_core::{AgentId, Cell, SimConfig, SimTime};
    use sf_sim::{NoopObserver, SimBuilder, SimObserver, SimReport};
    use sf_spatial::{ProductInfo, Register, Shelf, StoreLayout};

    /// Two steps and one queue marker.
    pub fn outcome() -> AgentOutcome {
        let t = SimTime::from_hms(9, 0, 0);
        let mut run = AgentRun::new(AgentId(0), "anna", t);
        run.extend_steps([PathEntry::step(Cell::new(0, 0), t)]);
        run.annotate(PathEvent::EnteredStore);
        run.extend_steps([PathEntry::step(Cell::new(1, 0), t + 600)]);
        run.mark(PathEvent::FinishedQueue { register: 1, waited_ms: 0 });
        run.finish(TerminalStatus::Completed)
    }

    pub fn config() -> SimConfig {
        let mut config = SimConfig::default();
        config.num_threads = Some(1);
        config.grid.width = 10;
        config.grid.height = 10;
        config.checkout.breakdown_probability = 0.0;
        config
    }

    pub fn layout() -> StoreLayout {
        let mut dairy = Shelf::new("Dairy", Cell::new(3, 3));
        dairy.products = vec![ProductInfo::new("milk")];
        let mut bakery = Shelf::new("Bakery", Cell::new(6, 5));
        bakery.products = vec![ProductInfo::new("bread")];
        StoreLayout {
            shelves:   vec![dairy, bakery],
            registers: vec![Register { x: 9, z: 0 }],
        }
    }

    pub fn profiles() -> Vec<AgentProfile> {
        vec![
            ProfileBuilder::new("anna")
                .shopping_list(["milk", "bread"])
                .budget("Dairy", 1.0)
                .arriving_at(SimTime::from_hms(9, 0, 0))
                .build(),
            ProfileBuilder::new("boris")
                .shopping_list(["bread"])
                .arriving_at(SimTime::from_hms(12, 30, 0))
                .build(),
            ProfileBuilder::new("clara")
                .shopping_list(["caviar"])
                .arriving_at(SimTime::from_hms(18, 0, 0))
                .build(),
        ]
    }

    pub fn run_with<O: SimObserver>(observer: &mut O) -> SimReport {
        SimBuilder::standard(config(), layout(), profiles())
            .build()
            .unwrap()
            .run(observer)
            .unwrap()
    }

    pub fn report() -> SimReport {
        run_with(&mut NoopObserver)
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use crate::row::{OutcomeRow, PathRow};

    use super::fixtures::outcome;

    #[test]
    fn path_rows_keep_markers_apart_from_steps() {
        let outcome = outcome();
        let rows: Vec<PathRow> = PathRow::from_outcome(&outcome).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].seq, rows[0].step, rows[0].event.as_str()), (0, true, "entered_store"));
        assert_eq!((rows[1].x, rows[1].step, rows[1].event.as_str()), (1, true, ""));
        assert!(!rows[2].step);
        assert_eq!(rows[2].event, "finished queue at register 1");
        assert_eq!(rows[1].time_ms - rows[0].time_ms, 600);
    }

    #[test]
    fn outcome_row_counts_steps_not_markers() {
        let row = OutcomeRow::from(&outcome());
        assert_eq!(row.client, "anna");
        assert_eq!(row.status, "completed");
        assert_eq!(row.steps, 2);
        assert_eq!(row.purchases, 0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::ReportObserver;
    use crate::writer::ReportWriter;

    use super::fixtures::{outcome, run_with};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for file in ["agent_paths.csv", "agent_outcomes.csv", "popular_zones.csv", "shelf_statistics.csv"] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir, "agent_paths.csv"), ["agent_id", "seq", "x", "z", "time_ms", "step", "event"]);
        assert_eq!(
            headers(&dir, "agent_outcomes.csv"),
            ["agent_id", "client", "arrival_ms", "end_time_ms", "status", "steps", "purchases"]
        );
        assert_eq!(headers(&dir, "popular_zones.csv"), ["x", "z", "visits"]);
        assert_eq!(
            headers(&dir, "shelf_statistics.csv"),
            ["shelf_id", "category", "x", "z", "visits", "purchases", "conversion_rate"]
        );
    }

    #[test]
    fn csv_outcome_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_outcomes(&[outcome()]).unwrap();
        w.finish().unwrap();

        let paths = records(&dir, "agent_paths.csv");
        assert_eq!(paths.len(), 3);
        assert_eq!(&paths[0][6], "entered_store");
        assert_eq!(&paths[2][5], "0"); // marker

        let outcomes = records(&dir, "agent_outcomes.csv");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(&outcomes[0][1], "anna");
        assert_eq!(&outcomes[0][2], "32400000"); // 09:00
        assert_eq!(&outcomes[0][4], "completed");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_outcomes(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap());
        let report = run_with(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.written(), 3);

        let outcomes = records(&dir, "agent_outcomes.csv");
        assert_eq!(outcomes.len(), 3);
        // Cohorts are written in chronological order.
        let clients: Vec<&str> = outcomes.iter().map(|r| r.get(1).unwrap()).collect();
        assert_eq!(clients, ["anna", "boris", "clara"]);

        let path_rows: usize = report.results.iter().map(|o| o.path.len()).sum();
        assert_eq!(records(&dir, "agent_paths.csv").len(), path_rows);

        let zones = records(&dir, "popular_zones.csv");
        assert_eq!(zones.len(), report.popular_zones.len());
        assert_eq!(zones[0][2].parse::<u64>().unwrap(), report.popular_zones[0].visits);

        let shelves = records(&dir, "shelf_statistics.csv");
        assert_eq!(shelves.len(), 2);
        assert_eq!(&shelves[0][1], "Dairy");
    }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod json_tests {
    use sf_sim::SimReport;

    use crate::json::JsonWriter;
    use crate::observer::ReportObserver;
    use crate::writer::ReportWriter;

    use super::fixtures::{report, run_with};

    #[test]
    fn report_json_written_on_run_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = ReportObserver::new(JsonWriter::new(dir.path()).unwrap());
        let report = run_with(&mut obs);
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.streamed(), 3);
        let text = std::fs::read_to_string(writer.path()).unwrap();
        let back: SimReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.statistics, report.statistics);
        assert_eq!(back.popular_zones, report.popular_zones);
        assert_eq!(back.results.len(), 3);
        assert_eq!(back.recommendations, report.recommendations);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("runs").join("today");
        let mut w = JsonWriter::new(&nested).unwrap();
        w.write_report(&report()).unwrap();
        assert!(nested.join("report.json").exists());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use sf_agent::AgentOutcome;
    use sf_sim::SimReport;

    use crate::observer::ReportObserver;
    use crate::writer::ReportWriter;
    use crate::{OutputError, OutputResult};

    /// Fails every outcome batch after the first; records what it saw.
    #[derive(Default)]
    struct Flaky {
        batches:  Vec<usize>,
        reports:  usize,
        finishes: usize,
    }

    impl ReportWriter for Flaky {
        fn write_outcomes(&mut self, outcomes: &[AgentOutcome]) -> OutputResult<()> {
            self.batches.push(outcomes.len());
            if self.batches.len() > 1 {
                let msg = format!("batch {}", self.batches.len());
                return Err(OutputError::Io(io::Error::other(msg)));
            }
            Ok(())
        }

        fn write_report(&mut self, _report: &SimReport) -> OutputResult<()> {
            self.reports += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn one_batch_per_cohort_and_first_error_kept() {
        let mut obs = ReportObserver::new(Flaky::default());
        super::fixtures::run_with(&mut obs);

        let err = obs.take_error().expect("second batch fails");
        assert_eq!(err.to_string(), "I/O error: batch 2");
        assert!(obs.take_error().is_none(), "error is taken");
        assert_eq!(obs.written(), 1);

        let writer = obs.into_writer();
        // Morning, peak and evening cohorts, one customer each.
        assert_eq!(writer.batches, [1, 1, 1]);
        assert_eq!(writer.reports, 1);
        assert_eq!(writer.finishes, 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::observer::ReportObserver;
    use crate::sqlite::SqliteWriter;
    use crate::writer::ReportWriter;

    use super::fixtures::{outcome, run_with};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_outcome_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_outcomes(&[outcome()]).unwrap();
        w.finish().unwrap();

        assert_eq!(count(&dir, "agent_paths"), 3);
        assert_eq!(count(&dir, "agent_outcomes"), 1);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (status, steps): (String, i64) = conn
            .query_row("SELECT status, steps FROM agent_outcomes WHERE agent_id = 0", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(status, "completed");
        assert_eq!(steps, 2);
    }

    #[test]
    fn integration_sqlite() {
        let dir = tmp();
        let mut obs = ReportObserver::new(SqliteWriter::new(dir.path()).unwrap());
        let report = run_with(&mut obs);
        assert!(obs.take_error().is_none());
        drop(obs);

        assert_eq!(count(&dir, "agent_outcomes"), 3);
        assert_eq!(count(&dir, "popular_zones"), report.popular_zones.len() as i64);
        assert_eq!(count(&dir, "shelf_statistics"), 2);
    }
}
