mod cli;

use clap::Parser;
use esg_bench::config;
use esg_bench::engine::directions::DirectionTable;
use esg_bench::engine::percentile::validate_benchmark;
use esg_bench::engine::ScoringEngine;
use esg_bench::error::{EsgError, Result};
use esg_bench::input::{self, ScoringRequest};
use esg_bench::report::{self, OutputFormat, ScoreReport};
use esg_bench::telemetry;
use esg_bench::types::benchmark::Benchmark;
use esg_bench::types::config::EsgConfig;
use std::path::{Path, PathBuf};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn load_settings(config_dir: Option<&Path>, verbose: u8, quiet: bool) -> Result<EsgConfig> {
    let root = config_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    if !root.exists() {
        return Err(EsgError::PathNotFound(root.display().to_string()));
    }
    let loaded = config::load_config(&root)?;
    let level = telemetry::verbosity_level(verbose, quiet)
        .map(ToString::to_string)
        .unwrap_or_else(|| loaded.log_level());
    telemetry::init(&level)?;
    Ok(loaded)
}

fn score_request(
    engine: &ScoringEngine,
    request: ScoringRequest,
    benchmarks: &[Benchmark],
) -> Result<ScoreReport> {
    let segment = request.segment();
    let evaluation = engine.evaluate(
        &request.company_id,
        request.period_year,
        &request.metrics,
        benchmarks,
        &segment,
    )?;
    ScoreReport::new(&request.company_id, request.period_year, segment, evaluation)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Score(cmd) => {
            let loaded = load_settings(cmd.config.as_deref(), cli.verbose, cli.quiet)?;
            let engine = ScoringEngine::new(DirectionTable::from_config(&loaded));

            let request = input::load_request(&cmd.input)?;
            let benchmarks = input::load_benchmarks(&cmd.benchmarks)?;
            tracing::info!(
                input = %cmd.input.display(),
                metrics = request.metrics.len(),
                benchmarks = benchmarks.len(),
                "scoring request"
            );

            let score_report = score_request(&engine, request, &benchmarks)?;
            let rendered = report::render(&score_report, output_format(&cmd.format))?;
            println!("{rendered}");

            if score_report.diagnostics.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                eprintln!(
                    "warning: {} record(s) rejected, see diagnostics",
                    score_report.diagnostics.len()
                );
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Batch(cmd) => {
            let loaded = load_settings(cmd.config.as_deref(), cli.verbose, cli.quiet)?;
            let engine = ScoringEngine::new(DirectionTable::from_config(&loaded));

            let paths = input::discover_requests(&cmd.dir, &[cmd.benchmarks.as_path()])?;
            let benchmarks = input::load_benchmarks(&cmd.benchmarks)?;

            let mut reports = Vec::new();
            let mut failures = 0usize;
            for path in &paths {
                let scored = input::load_request(path)
                    .and_then(|request| score_request(&engine, request, &benchmarks));
                match scored {
                    Ok(score_report) => reports.push(score_report),
                    Err(err) => {
                        failures += 1;
                        tracing::warn!(path = %path.display(), error = %err, "request skipped");
                        eprintln!("warning: skipped {}: {}", path.display(), err);
                    }
                }
            }

            match output_format(&cmd.format) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Md => {
                    for score_report in &reports {
                        println!("{}", report::render(score_report, OutputFormat::Md)?);
                    }
                }
            }

            let has_diagnostics = reports
                .iter()
                .any(|score_report| !score_report.diagnostics.is_empty());
            if failures > 0 || has_diagnostics {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Check(cmd) => {
            let level = telemetry::verbosity_level(cli.verbose, cli.quiet).unwrap_or("warn");
            telemetry::init(level)?;

            let benchmarks = input::load_benchmarks(&cmd.benchmarks)?;
            let rejected = benchmarks
                .iter()
                .filter_map(|benchmark| validate_benchmark(benchmark).err())
                .collect::<Vec<_>>();

            if rejected.is_empty() {
                println!("check: {} band(s) valid", benchmarks.len());
                return Ok(exit_code::SUCCESS);
            }

            for err in &rejected {
                println!("[INVALID] {err}");
            }
            println!(
                "check: {} of {} band(s) rejected",
                rejected.len(),
                benchmarks.len()
            );
            Ok(exit_code::WARNINGS)
        }
        cli::Commands::Directions(cmd) => {
            let loaded = load_settings(cmd.config.as_deref(), cli.verbose, cli.quiet)?;
            let table = DirectionTable::from_config(&loaded);

            println!("default: {}", table.default_direction().as_str());
            for (key, kind, direction) in table.entries() {
                match direction {
                    Some(direction) => println!("{key}: numeric, {}", direction.as_str()),
                    None => println!("{key}: {}", kind.as_str()),
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
