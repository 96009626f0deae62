use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "uniq workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark target under each global allocator and write a report
    Bench {
        /// Benchmark target to run
        #[arg(long, default_value = "suite")]
        target: String,

        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const ALLOCATORS: &[&str] = &["alloc-system", "alloc-mimalloc", "alloc-snmalloc", "alloc-jemalloc"];

const REPORT_PATH: &str = "benchmark_results/report.md";

/// Mean nanoseconds per iteration, keyed by benchmark then by allocator.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            target,
            quick,
            report_only,
        } => {
            if !report_only {
                run_benchmarks(&target, quick)?;
            }
            write_report(Path::new(REPORT_PATH))?;
        }
    }

    Ok(())
}

fn baseline_name(feature: &str) -> &str {
    feature.trim_start_matches("alloc-")
}

fn run_benchmarks(target: &str, quick: bool) -> Result<()> {
    println!("Compiling bench target `{target}`...");
    let status = Command::new("cargo")
        .args(["build", "--bench", target, "--release"])
        .status()
        .context("failed to spawn cargo build")?;
    if !status.success() {
        bail!("failed to compile bench target `{target}`");
    }

    for feature in ALLOCATORS {
        println!("\n>>> {target} with {feature}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0")
            .args(["bench", "--bench", target, "--features", feature])
            .args(["--", "--save-baseline", baseline_name(feature)]);

        if quick {
            cmd.args(["--measurement-time", "0.1", "--sample-size", "10", "--noplot"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run `{target}` with {feature}"))?;

        if status.success() {
            println!("Finished {feature} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: `{target}` failed with {feature}");
        }
    }

    Ok(())
}

fn write_report(report_path: &Path) -> Result<()> {
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("failed to create {}", report_path.display()))?;

    writeln!(file, "# UniquePtr Allocator Report")?;
    writeln!(file)?;

    write!(file, "| Benchmark |")?;
    for feature in ALLOCATORS {
        write!(file, " {} (ns) | vs system |", baseline_name(feature))?;
    }
    writeln!(file)?;

    write!(file, "|---|")?;
    for _ in ALLOCATORS {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    for (bench, by_alloc) in &results {
        write!(file, "| {bench} |")?;
        let system = by_alloc.get("system").copied();

        for feature in ALLOCATORS {
            match by_alloc.get(baseline_name(feature)) {
                Some(ns) => {
                    let relative = system.map_or(0.0, |sys| sys / ns);
                    write!(file, " {ns:.1} | **{relative:.2}x** |")?;
                }
                None => write!(file, " N/A | - |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

/// Walks criterion's output tree: `<group>/<bench>/<baseline>/estimates.json`.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(bench_dir) = baseline_dir.parent() else { continue };
        let (Some(baseline), Some(bench)) = (dir_name(baseline_dir), dir_name(bench_dir)) else {
            continue;
        };
        if baseline == "report" || baseline == "new" || baseline == "base" || bench == "report" {
            continue;
        }

        let content = fs::read_to_string(&path)?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("malformed {}", path.display()))?;

        if let Some(ns) = json
            .get("mean")
            .and_then(|mean| mean.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        {
            results.entry(bench).or_default().insert(baseline, ns);
        }
    }

    Ok(())
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|s| s.to_str()).map(str::to_owned)
}
