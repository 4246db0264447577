use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use http_latency_probe::config::{self, Overrides};
use http_latency_probe::metrics::METRICS;
use http_latency_probe::probe;

/// Measure reachability and latency of an HTTP endpoint.
#[derive(Debug, Parser)]
#[command(name = "latency-probe", version)]
struct Cli {
    /// Endpoint to probe (http or https URL)
    endpoint: Option<String>,

    /// Number of sequential GET requests
    #[arg(short = 'n', long)]
    ping_times: Option<u32>,

    /// Deadline for the whole run, in seconds
    #[arg(short = 't', long = "max-secs")]
    max_sec_pinging_time: Option<u64>,

    /// JSON config file
    #[arg(short, long, env = "PROBE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    /// Print Prometheus text metrics after the summary
    #[arg(long)]
    metrics: bool,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let code = exit_code(run(Cli::parse()).await);
    let _ = std::io::stdout().flush();
    std::process::exit(code);
}

/// Setup failures (unreadable config, missing endpoint) count as errors.
fn exit_code(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            println!("[ERROR] {:#}", e);
            2
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let probe_config = config::resolve(
        cli.config.as_deref(),
        Overrides {
            endpoint: cli.endpoint,
            ping_times: cli.ping_times,
            max_sec_pinging_time: cli.max_sec_pinging_time,
            log_level: cli.log_level,
            emit_metrics: cli.metrics,
        },
    )
    .await?;
    let log_level = probe_config.get_tracing_level()?;

    // Init tracing with configured log level; a second run in-process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
                         .add_directive(format!("http_latency_probe={}", log_level.as_str().to_lowercase()).parse()?))
        .try_init();

    let outcome = probe(&probe_config).await;

    for line in outcome.summary_lines() {
        println!("{}", line);
    }

    METRICS.record(&outcome);
    if probe_config.emit_metrics {
        print!("{}", METRICS.render()?);
    }

    Ok(outcome.exit_code())
}
