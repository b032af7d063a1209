//! `small_store`: one trading day in a 20×20 corner shop.
//!
//! The built-in store has six shelves and two registers.  Five hand-written
//! customers are joined by a generated crowd, and the path logs, heatmap and
//! shelf figures are written to `./output` as CSV plus a full `report.json`.
//!
//! Run with:
//!   cargo run -p small-store --release
//!
//! See `--help` for the options.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sf_agent::{load_profiles_json, load_profiles_reader, AgentOutcome, AgentProfile, ProfileBuilder, TerminalStatus};
use sf_core::{SimConfig, SimTime};
use sf_output::{CsvWriter, JsonWriter, ReportObserver, ReportWriter};
use sf_schedule::{Cohort, CohortKind};
use sf_sim::{SimBuilder, SimObserver, SimReport};
use sf_spatial::{load_layout_json, load_layout_reader};

const STORE_JSON:     &str = include_str!("../data/store.json");
const CUSTOMERS_JSON: &str = include_str!("../data/customers.json");

const DEFAULT_CROWD: usize = 60;

// ── Command line ──────────────────────────────────────────────────────────────

/// One simulated trading day in a small store
#[derive(Parser, Debug)]
#[command(name = "small_store")]
#[command(about = "Simulate a trading day and write path logs, heatmap and shelf figures")]
struct Args {
    /// Simulation configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store layout with shelves and registers (JSON); built-in store if absent
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Customer profiles (JSON); built-in customers if absent
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Generated customers added to the profiles
    #[arg(long, default_value_t = DEFAULT_CROWD)]
    crowd: usize,

    /// Override the run seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

// ── Generated crowd ───────────────────────────────────────────────────────────

const ITEMS: [&str; 10] = [
    "milk", "bread", "apples", "chips", "kefir", "chocolate", "soap", "bananas", "croissant", "caviar",
];

/// Deterministic filler customers with mixed lists and traits.  Arrival times
/// are left to the scheduler.
fn crowd(n: usize) -> Vec<AgentProfile> {
    (0..n)
        .map(|i| {
            let list: Vec<&str> = (0..1 + i % 4).map(|k| ITEMS[(i + 3 * k) % ITEMS.len()]).collect();
            let mut b = ProfileBuilder::new(format!("shopper-{i:03}"))
                .shopping_list(list)
                .budget("Dairy", 0.2 + (i % 3) as f64 / 10.0)
                .budget("Snacks", (i % 5) as f64 / 5.0);
            if i % 2 == 0 {
                b = b.motive("looking for something cheap");
            }
            if i % 3 == 0 {
                b = b.fear("no discount on the usual brand");
            }
            if i % 4 == 1 {
                b = b.preference(ITEMS[i % ITEMS.len()]);
            }
            b.build()
        })
        .collect()
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints one line per cohort and forwards everything to the report writer.
struct Progress<W: ReportWriter> {
    inner:   ReportObserver<W>,
    started: Instant,
    served:  usize,
}

impl<W: ReportWriter> SimObserver for Progress<W> {
    fn on_run_start(&mut self, agents: usize, cohorts: usize) {
        println!("  {agents} customers in {cohorts} cohorts");
        self.inner.on_run_start(agents, cohorts);
    }

    fn on_cohort_start(&mut self, cohort: &Cohort, clock: SimTime) {
        self.served = 0;
        self.inner.on_cohort_start(cohort, clock);
    }

    fn on_agent_finished(&mut self, outcome: &AgentOutcome) {
        if outcome.status == TerminalStatus::Completed {
            self.served += 1;
        }
        self.inner.on_agent_finished(outcome);
    }

    fn on_cohort_end(&mut self, kind: CohortKind, clock: SimTime) {
        println!(
            "  {kind:<8} done at {clock}  served={:>4}  ({:.2}s)",
            self.served,
            self.started.elapsed().as_secs_f64()
        );
        self.inner.on_cohort_end(kind, clock);
    }

    fn on_run_end(&mut self, report: &SimReport) {
        self.inner.on_run_end(report);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path).with_context(|| format!("reading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let layout = match &args.layout {
        Some(path) => load_layout_json(path).with_context(|| format!("reading {}", path.display()))?,
        None => load_layout_reader(STORE_JSON.as_bytes()).context("built-in store layout")?,
    };
    let mut profiles = match &args.profiles {
        Some(path) => load_profiles_json(path).with_context(|| format!("reading {}", path.display()))?,
        None => load_profiles_reader(CUSTOMERS_JSON.as_bytes()).context("built-in customers")?,
    };
    profiles.extend(crowd(args.crowd));

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    println!("=== small_store ===");
    println!(
        "  {}x{} floor, {} shelves, {} registers, open {} to {}",
        config.grid.width,
        config.grid.height,
        layout.shelves.len(),
        layout.registers.len(),
        config.hours.open,
        config.hours.close,
    );

    let t0 = Instant::now();
    let sim = SimBuilder::standard(config, layout, profiles).build()?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "store ready");

    let mut progress = Progress {
        inner:   ReportObserver::new(CsvWriter::new(&args.out)?),
        started: Instant::now(),
        served:  0,
    };
    let report = sim.run(&mut progress)?;
    if let Some(e) = progress.inner.take_error() {
        return Err(e).context("writing CSV output");
    }

    let mut json = JsonWriter::new(&args.out)?;
    json.write_report(&report)?;
    json.finish()?;

    print_summary(&report, &args.out, json.path());
    Ok(())
}

fn print_summary(report: &SimReport, out: &Path, json: &Path) {
    let stats = &report.statistics;

    println!();
    println!("=== Outcomes ===");
    for status in TerminalStatus::ALL {
        let n = stats.count(status);
        if n > 0 {
            println!("  {:<20} {n:>5}", status.as_str());
        }
    }
    println!("  {:<20} {:>5}", "total", stats.total_clients);
    println!(
        "  purchases={}  motive={}  fear={}  discount={}  breakdowns={}",
        stats.total_purchases,
        stats.motive_trigger_count,
        stats.fear_trigger_count,
        stats.discount_trigger_count,
        stats.kassa_breakdowns,
    );

    println!();
    println!("=== Busiest cells ===");
    for zone in report.popular_zones.iter().take(5) {
        println!("  ({:>2}, {:>2})  {:>5} visits", zone.x, zone.z, zone.visits);
    }

    println!();
    println!("=== Shelves ===");
    for shelf in &report.shelf_statistics {
        println!(
            "  {:<10} ({:>2}, {:>2})  visits={:>4}  purchases={:>4}  conversion={:.3}",
            shelf.category, shelf.x, shelf.z, shelf.visits, shelf.purchases, shelf.conversion_rate
        );
    }

    println!();
    println!("=== Registers ===");
    for register in &report.register_statistics {
        println!(
            "  #{} ({:>2}, {:>2})  served={:>4}  peak queue={}",
            register.register, register.x, register.z, register.served, register.peak_queue_length
        );
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("=== Recommendations ===");
        for line in &report.recommendations {
            println!("  - {line}");
        }
    }

    println!();
    println!("  CSV files in {}", out.display());
    println!("  full report  {}", json.display());
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, DEFAULT_CROWD};

    #[test]
    fn defaults_use_the_built_in_store() {
        let args = Args::try_parse_from(["small_store"]).unwrap();
        assert!(args.layout.is_none() && args.profiles.is_none() && args.config.is_none());
        assert_eq!(args.crowd, DEFAULT_CROWD);
        assert_eq!(args.out.to_str(), Some("output"));
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::try_parse_from([
            "small_store", "--layout", "store.json", "--crowd", "5", "--seed", "9", "--out", "runs",
        ])
        .unwrap();
        assert_eq!(args.layout.as_deref().and_then(|p| p.to_str()), Some("store.json"));
        assert_eq!((args.crowd, args.seed), (5, Some(9)));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["small_store", "--crowd", "abc"]).is_err());
        assert!(Args::try_parse_from(["small_store", "--shelves", "3"]).is_err());
    }
}
