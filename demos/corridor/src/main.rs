//! corridor: cooperative path planning on a small warehouse floor.
//!
//! Plans 8 agents through one-lane aisles in fixed priority order, checks
//! the result independently, and writes `agents.csv`, `paths.csv` and
//! `reservations.csv` to `output/corridor`.
//!
//! Usage: `corridor [config.json]`.  The optional JSON file holds a
//! `PlannerConfig`, e.g. `{"parking": "NodeCount", "max_wait": 4}`.
//! Log verbosity follows `RUST_LOG` (default `info`).

mod network;

use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mapf_core::{AgentId, NodeId, Path, PlanError, PlannerConfig};
use mapf_output::{CsvWriter, OutputWriter, PlanOutputObserver};
use mapf_planner::{validate_team, PlanObserver, TeamPlanner};
use mapf_reservation::ReservationTable;

use network::{build_floor, AGENTS};

const OUTPUT_DIR: &str = "output/corridor";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     PlanOutputObserver<W>,
    path_rows: usize,
    failed:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: PlanOutputObserver<W>) -> Self {
        Self { inner, path_rows: 0, failed: 0 }
    }
}

impl<W: OutputWriter> PlanObserver for CountingObserver<W> {
    fn on_agent_start(&mut self, agent: AgentId, start: NodeId, goal: NodeId) {
        self.inner.on_agent_start(agent, start, goal);
    }

    fn on_agent_planned(
        &mut self,
        agent: AgentId,
        path:  Option<&Path>,
        error: Option<PlanError>,
    ) {
        match path {
            Some(p) => self.path_rows += p.len(),
            None => self.failed += 1,
        }
        self.inner.on_agent_planned(agent, path, error);
    }

    fn on_team_end(&mut self, solved: usize, reservations: &ReservationTable) {
        self.inner.on_team_end(solved, reservations);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<PlannerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = PlannerConfig::from_json_str(&json)?;
            info!(%path, ?config, "loaded planner config");
            Ok(config)
        }
        None => Ok(PlannerConfig::default()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== corridor — cooperative multi-agent planning ===");

    // 1. Config.
    let config = load_config()?;
    println!(
        "Parking: {:?}  |  max wait: {}  |  exact heuristic: {}",
        config.parking,
        config.max_wait.map_or_else(|| "unbounded".to_owned(), |w| w.to_string()),
        config.exact_heuristic,
    );

    // 2. Floor.
    let floor = build_floor()?;
    let (dim_x, dim_y) = floor.dims();
    println!(
        "Floor: {dim_x}x{dim_y}, {} open cells, {} agents",
        floor.open_nodes().len(),
        AGENTS.len()
    );
    println!();

    let starts: Vec<NodeId> = AGENTS.iter().map(|&((x, y), _)| floor.id_from_coords(x, y)).collect();
    let goals:  Vec<NodeId> = AGENTS.iter().map(|&(_, (x, y))| floor.id_from_coords(x, y)).collect();

    // 3. Output.
    let writer = CsvWriter::new(std::path::Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(PlanOutputObserver::new(writer));

    // 4. Plan.
    let t0 = Instant::now();
    let team = TeamPlanner::new(config).plan_team_with(&floor, &starts, &goals, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Independent check.
    let report = validate_team(&floor, &team);
    for (agent, defect) in &report.defects {
        warn!(agent = agent.0, %defect, "invalid path");
    }
    for conflict in &report.conflicts {
        warn!(%conflict, "conflict");
    }

    // 6. Summary.
    println!("Planning complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  solved        : {}/{}", team.solved_count(), team.agents.len());
    println!("  makespan      : {}", team.makespan().map_or(0, |t| t.0));
    println!("  sum of costs  : {}", team.sum_of_costs());
    println!("  conflicts     : {}", report.conflicts.len());
    println!("  paths.csv     : {} rows", obs.path_rows);
    println!("  reservations  : {} timed, {} parked", team.reservations.timed_len(), team.reservations.parked().len());
    println!();

    // 7. Per-agent table.
    println!("{:<6} {:<9} {:<9} {:<8} {:<6} {}", "Agent", "Start", "Goal", "Arrival", "Waits", "Outcome");
    println!("{}", "-".repeat(60));
    for a in &team.agents {
        let (sx, sy) = floor.coords_from_id(a.start);
        let (gx, gy) = floor.coords_from_id(a.goal);
        let (arrival, waits) = match &a.path {
            Some(p) => (p.arrival().0.to_string(), p.wait_count().to_string()),
            None => ("-".to_owned(), "-".to_owned()),
        };
        let outcome = match a.error {
            Some(err) => err.to_string(),
            None => "ok".to_owned(),
        };
        println!(
            "{:<6} {:<9} {:<9} {:<8} {:<6} {}",
            a.agent.0,
            format!("({sx},{sy})"),
            format!("({gx},{gy})"),
            arrival,
            waits,
            outcome,
        );
    }

    if obs.failed > 0 {
        println!();
        println!("{} agent(s) yielded to higher-priority agents and got no path.", obs.failed);
    }

    Ok(())
}
