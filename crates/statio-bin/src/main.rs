use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use statio_core::config::StatioConfig;
use statio_core::report::{render_report, render_summary};
use statio_core::snapshot::{SnapshotCollector, SnapshotEnvelope};
use statio_platform::system_info::SystemInfo;

#[derive(Parser, Debug)]
#[command(name = "statio")]
#[command(about = "Point-in-time hardware and OS inventory")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, env = "STATIO_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Print the snapshot as JSON instead of the text report
    #[arg(long, conflicts_with = "summary")]
    json: bool,

    /// Indent JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Print the compact overview instead of the full report
    #[arg(long)]
    summary: bool,

    /// Re-collect every SECS seconds until Ctrl+C (config interval when omitted)
    #[arg(long, value_name = "SECS", num_args = 0..=1)]
    watch: Option<Option<u64>>,

    /// Write a default config file to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "STATIO_LOG_LEVEL")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Report,
    Summary,
    Json { pretty: bool },
}

impl OutputFormat {
    fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            Self::Json { pretty: cli.pretty }
        } else if cli.summary {
            Self::Summary
        } else {
            Self::Report
        }
    }

    fn render(self, envelope: &SnapshotEnvelope) -> Result<String> {
        match self {
            Self::Report => Ok(render_report(&envelope.snapshot)),
            Self::Summary => Ok(render_summary(&envelope.snapshot)),
            Self::Json { pretty: true } => Ok(serde_json::to_string_pretty(envelope)?),
            Self::Json { pretty: false } => Ok(serde_json::to_string(envelope)?),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("statio error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config_path
        .clone()
        .unwrap_or_else(StatioConfig::default_path);

    if cli.write_default_config {
        StatioConfig::default().save(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = StatioConfig::load_or_default(&config_path)?;
    let format = OutputFormat::from_cli(&cli);
    let collector = Arc::new(create_snapshot_collector(&config)?);

    debug!(
        "statio v{} (os={}, arch={}, format={:?})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        format,
    );

    match cli.watch {
        Some(period) => {
            let period = period.unwrap_or(config.refresh_interval_secs).max(1);
            run_watch(collector, format, period).await
        }
        None => {
            let text = render_once(&collector, format).await?;
            print_output(format, &text);
            Ok(())
        }
    }
}

/// Collect on the blocking pool; a panic inside a collector surfaces here as
/// an error instead of tearing down the runtime.
async fn render_once(collector: &Arc<SnapshotCollector>, format: OutputFormat) -> Result<String> {
    let collector = Arc::clone(collector);
    let envelope = tokio::task::spawn_blocking(move || collector.collect_envelope())
        .await
        .context("snapshot collection failed")?;
    format.render(&envelope)
}

fn print_output(format: OutputFormat, text: &str) {
    match format {
        OutputFormat::Json { .. } => println!("{}", text),
        _ => print!("{}", text),
    }
}

async fn run_watch(collector: Arc<SnapshotCollector>, format: OutputFormat, period: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(period));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut refreshes: u64 = 0;

    info!("watching every {}s, press Ctrl+C to stop", period);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let text = render_once(&collector, format).await?;
                refreshes += 1;
                let redraw = !matches!(format, OutputFormat::Json { .. });
                if redraw {
                    // Clear screen and home the cursor
                    print!("\x1b[2J\x1b[H");
                }
                print_output(format, &text);
                if redraw {
                    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                    println!("\n{}", status_line(&stamp, period, refreshes));
                }
            }
            _ = &mut ctrl_c => {
                info!("received Ctrl+C, stopping after {} refreshes", refreshes);
                break;
            }
        }
    }

    Ok(())
}

fn status_line(stamp: &str, period: u64, refreshes: u64) -> String {
    format!(
        "Last update: {} | Auto-refresh: {}s | refresh #{} | Ctrl+C to stop",
        stamp, period, refreshes
    )
}

fn create_snapshot_collector(config: &StatioConfig) -> Result<SnapshotCollector> {
    let sys_info = create_platform_system_info(config)?;
    Ok(SnapshotCollector::new(sys_info))
}

#[cfg(target_os = "linux")]
fn create_platform_system_info(config: &StatioConfig) -> Result<Box<dyn SystemInfo>> {
    use statio_linux::system_info::{LinuxSystemInfo, SourceRoots};

    let roots = SourceRoots {
        proc: config.proc_root.clone(),
        sys: config.sys_root.clone(),
        etc: config.etc_root.clone(),
    };
    Ok(Box::new(
        LinuxSystemInfo::with_roots(roots).gpu_scan_slots(config.gpu_scan_slots),
    ))
}

#[cfg(not(target_os = "linux"))]
fn create_platform_system_info(_config: &StatioConfig) -> Result<Box<dyn SystemInfo>> {
    anyhow::bail!("system inventory not yet implemented for {}", std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("statio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_text_report() {
        let cli = parse(&[]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Report);
        assert!(cli.watch.is_none());
    }

    #[test]
    fn test_output_format_selection() {
        assert_eq!(OutputFormat::from_cli(&parse(&["--summary"])), OutputFormat::Summary);
        assert_eq!(
            OutputFormat::from_cli(&parse(&["--json", "--pretty"])),
            OutputFormat::Json { pretty: true }
        );
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["statio", "--json", "--summary"]).is_err());
        assert!(Cli::try_parse_from(["statio", "--pretty"]).is_err());
    }

    #[test]
    fn test_watch_with_and_without_period() {
        assert_eq!(parse(&["--watch"]).watch, Some(None));
        assert_eq!(parse(&["--watch", "3"]).watch, Some(Some(3)));
    }

    #[test]
    fn test_status_line_carries_timestamp() {
        assert_eq!(
            status_line("2024-01-01 00:00:00", 5, 3),
            "Last update: 2024-01-01 00:00:00 | Auto-refresh: 5s | refresh #3 | Ctrl+C to stop"
        );
    }

    #[test]
    fn test_json_render_is_single_line() {
        let envelope = SnapshotEnvelope {
            collected_at: 1,
            uptime_seconds: None,
            snapshot: Default::default(),
        };
        let text = OutputFormat::Json { pretty: false }.render(&envelope).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.contains("\"collected_at\":1"));
    }
}
