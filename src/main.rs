use std::fs::File;
use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use partition_sim::domain::memory_model::placement::placement_policy::PlacementPolicy;
use partition_sim::domain::memory_model::scenario::Scenario;
use partition_sim::domain::memory_model::statistics::simulation_result::SimulationResult;
use partition_sim::domain::memory_model::utils::statistics::StatsWriter;
use partition_sim::loader::parser::parse_scenario_csv_files;
use partition_sim::{load_scenario, logger};

/// Fixed-partition memory allocation simulator (first-fit, best-fit, worst-fit).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Scenario JSON file. Without any input file the built-in reference scenario is used.
    #[arg(long, conflicts_with_all = ["jobs", "partitions"])]
    scenario: Option<String>,

    /// Jobs CSV file (id,size,duration,arrivalTime).
    #[arg(long, requires = "partitions")]
    jobs: Option<String>,

    /// Partitions CSV file (id,capacity).
    #[arg(long, requires = "jobs")]
    partitions: Option<String>,

    /// Placement policy to simulate, or "all".
    #[arg(long, default_value = "all")]
    policy: String,

    /// Write per-job and summary statistics as CSV to this file.
    #[arg(long)]
    stats_out: Option<String>,

    /// Print the results as JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let scenario = match (&cli.scenario, &cli.jobs, &cli.partitions) {
        (Some(path), _, _) => load_scenario(path).with_context(|| format!("loading scenario '{}'", path))?,
        (None, Some(jobs), Some(partitions)) => {
            let dto = parse_scenario_csv_files(jobs, partitions).context("loading CSV input")?;
            Scenario::try_from(dto)?
        }
        _ => {
            log::info!("No input given, using the reference scenario.");
            Scenario::reference()?
        }
    };

    let policies: Vec<PlacementPolicy> = if cli.policy.eq_ignore_ascii_case("all") {
        PlacementPolicy::ALL.to_vec()
    } else {
        vec![cli.policy.parse::<PlacementPolicy>()?]
    };

    let results = scenario.run_policies(&policies)?;

    if let Some(path) = &cli.stats_out {
        let file = File::create(path).with_context(|| format!("creating '{}'", path))?;
        let mut writer = StatsWriter::new(file)?;
        for result in &results {
            writer.write_result(result)?;
        }
        writer.into_inner()?;
        log::info!("Statistics written to '{}'.", path);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &results)?;
        writeln!(out)?;
    } else {
        for result in &results {
            print_summary(&mut out, result)?;
        }
    }

    Ok(())
}

fn print_summary(out: &mut impl Write, result: &SimulationResult) -> io::Result<()> {
    writeln!(out, "{}", format!("Strategy: {}", result.policy).bold())?;
    writeln!(out, "Completed Jobs: {} of {}", result.completed_jobs, result.total_jobs)?;
    writeln!(out, "Total Simulation Time: {}", result.total_simulation_time)?;
    writeln!(out, "Throughput: {:.4} jobs per time unit", result.throughput)?;
    writeln!(out, "Average Queue Length: {:.2} (max {})", result.avg_queue_length, result.max_queue_length)?;
    writeln!(out, "Average Waiting Time: {:.2} time units", result.avg_waiting_time)?;
    writeln!(out, "Average Turnaround Time: {:.2} time units", result.avg_turnaround_time)?;
    writeln!(out, "Average Internal Fragmentation: {:.2} memory units", result.avg_fragmentation)?;
    writeln!(out, "Unused Partitions: {:.2}%", result.unused_partitions_fraction * 100.0)?;
    writeln!(out, "Heavily Used Partitions: {:.2}%", result.heavily_used_partitions_fraction * 100.0)?;

    let usage: Vec<String> = result.partition_usage.iter().map(|usage| format!("{}: {}", usage.partition, usage.usage_count)).collect();
    writeln!(out, "Partition Usage: {{{}}}", usage.join(", "))?;

    for unplaceable in &result.unplaceable {
        writeln!(out, "{}", format!("Unplaceable: {}", unplaceable).yellow())?;
    }

    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out)
}
