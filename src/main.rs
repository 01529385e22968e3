//! memory-order-bench - atomic memory ordering benchmark
//!
//! Times a shared counter incremented by many threads under SeqCst, Relaxed
//! and AcqRel orderings, and checks every ordering still counts exactly.

use anyhow::{bail, Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use memory_order_bench::benchmark::{OrderResult, Orchestrator};
use memory_order_bench::config::{BenchmarkConfig, CliArgs};
use memory_order_bench::metrics::{write_csv_file, write_json_file, MetricsReporter};
use memory_order_bench::utils::format_count;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchmarkConfig) {
    if config.quiet {
        return;
    }

    println!("memory-order-bench v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!(
        "Threads: {}, Iterations/thread: {}, Trials: {}",
        config.params.threads,
        format_count(config.params.iterations),
        config.params.trials
    );
    println!(
        "Orders: {}",
        config
            .orders
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("====================================\n");
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();

    setup_logging(args.verbose, args.quiet);

    let config = BenchmarkConfig::from_cli(&args).context("Invalid benchmark parameters")?;

    print_banner(&config);

    let orchestrator = Orchestrator::new(config.clone());
    let results = orchestrator.run_all()?;

    let reporter = MetricsReporter::new(config.verbose);
    if !config.quiet {
        println!();
        reporter.report_final_values(&results);
        reporter.report_summary(&results);
        reporter.report_trials(&results);
    }

    if let Some(ref csv_path) = config.csv_output {
        info!("Writing CSV to: {:?}", csv_path);
        write_csv_file(csv_path, &results)
            .with_context(|| format!("Failed to write CSV to {:?}", csv_path))?;
    }

    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        write_json_file(output_path, &config.params, &results)
            .with_context(|| format!("Failed to write JSON to {:?}", output_path))?;
    }

    let mismatched: Vec<&OrderResult> = results.iter().filter(|r| !r.is_correct()).collect();
    if !mismatched.is_empty() {
        let names: Vec<_> = mismatched.iter().map(|r| r.order.as_str()).collect();
        bail!("Final counter mismatch for: {}", names.join(", "));
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
