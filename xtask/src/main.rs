use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "graph-paths workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the traversal benchmarks once per feature set
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH: &str = "traversal_benchmark";

/// Baseline name and the cargo feature flags that select it.
const FEATURE_SETS: &[(&str, &[&str])] = &[
    ("default", &[]),
    ("no-tracing", &["--no-default-features"]),
];

/// Directories criterion writes next to named baselines.
const CRITERION_RESERVED: &[&str] = &["new", "base", "change", "report"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running traversal benchmarks...");

    for (baseline, flags) in FEATURE_SETS {
        println!("\n>>> Benchmarking feature set: {baseline}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.arg("bench").arg("--bench").arg(BENCH).args(*flags);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        cmd.arg("--save-baseline").arg(baseline);

        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run bench for {baseline}"))?;

        if status.success() {
            println!("Finished {baseline} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: Benchmark failed for {baseline}");
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(report_path, render_report(&results))
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn render_report(results: &BTreeMap<String, BTreeMap<String, f64>>) -> String {
    use std::fmt::Write;

    let (reference, _) = FEATURE_SETS[0];
    let mut out = String::new();

    let _ = writeln!(out, "# Traversal Benchmark Report\n");

    let _ = write!(out, "| Workload |");
    for (baseline, _) in FEATURE_SETS {
        let _ = write!(out, " {baseline} (Ops/s) | vs {reference} |");
    }
    let _ = writeln!(out);

    let _ = write!(out, "|---|");
    for _ in FEATURE_SETS {
        let _ = write!(out, "---|---|");
    }
    let _ = writeln!(out);

    for (workload, by_baseline) in results {
        let _ = write!(out, "| {workload} |");
        let reference_ops = by_baseline.get(reference).copied().unwrap_or(0.0);

        for (baseline, _) in FEATURE_SETS {
            match by_baseline.get(*baseline) {
                Some(&ops) => {
                    let rel = if reference_ops > 0.0 { ops / reference_ops } else { 0.0 };
                    let _ = write!(out, " {} | **{rel:.2}x** |", format_ops(ops));
                }
                None => {
                    let _ = write!(out, " N/A | - |");
                }
            }
        }
        let _ = writeln!(out);
    }

    out
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks `dir` for `<workload...>/<baseline>/estimates.json` and records ops/s
/// (or elements/s for throughput benchmarks) per workload and baseline.
fn collect_results(
    root: &Path,
    dir: &Path,
    results: &mut BTreeMap<String, BTreeMap<String, f64>>,
) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(baseline) = file_name(baseline_dir) else { continue };
        if CRITERION_RESERVED.contains(&baseline.as_str()) {
            continue;
        }
        let Some(workload) = baseline_dir.parent().and_then(|dir| workload_name(root, dir)) else {
            continue;
        };

        let Some(time_ns) = read_json(&path)?
            .and_then(|json| json.get("mean")?.get("point_estimate")?.as_f64())
        else {
            continue;
        };
        if time_ns <= 0.0 {
            continue;
        }

        let elements = read_json(&baseline_dir.join("benchmark.json"))?
            .and_then(|json| json.get("throughput")?.get("Elements")?.as_f64());
        let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;

        results.entry(workload).or_default().insert(baseline, metric);
    }

    Ok(())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_owned)
}

fn workload_name(root: &Path, dir: &Path) -> Option<String> {
    let relative: PathBuf = dir.strip_prefix(root).ok()?.to_path_buf();
    let parts: Vec<_> = relative.iter().filter_map(|part| part.to_str()).collect();
    if parts.is_empty() || parts.contains(&"report") {
        return None;
    }
    Some(parts.join("/"))
}

fn read_json(path: &Path) -> Result<Option<serde_json::Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content).ok())
}
