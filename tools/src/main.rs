use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use tracing_subscriber::EnvFilter;
use uisync_tools::{format_pretty, parse_trace, replay_trace, ReplayReport};

#[derive(Parser)]
#[command(
    name = "uisync-tools",
    version,
    about = "uisync trace replay and debugging tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a request trace and print the operations each cycle sends.
    Replay {
        /// Path to a trace JSON file, or a directory of traces.
        trace_path: PathBuf,
        /// Optional glob filter when replaying a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        /// Use the small limits from the test suite.
        #[arg(long)]
        testing_limits: bool,
    },
    /// Show how a font name list is split into family names.
    Font {
        /// Raw font name, e.g. `"Segoe UI", Arial`.
        name: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay {
            trace_path,
            glob,
            format,
            testing_limits,
        } => {
            let (limits, wire_limits) = if testing_limits {
                (codec::CodecLimits::for_testing(), wire::Limits::for_testing())
            } else {
                (codec::CodecLimits::default(), wire::Limits::default())
            };
            if trace_path.is_dir() {
                for path in collect_traces(&trace_path, glob.as_deref())? {
                    let report = replay_file(&path, &limits, &wire_limits)?;
                    println!("== {} ==", path.display());
                    print_report(&report, format)?;
                }
            } else {
                let report = replay_file(&trace_path, &limits, &wire_limits)?;
                print_report(&report, format)?;
            }
        }
        Command::Font { name } => {
            for family in codec::parse_font_name(&name).iter() {
                println!("{family}");
            }
        }
    }
    Ok(())
}

fn replay_file(
    path: &Path,
    limits: &codec::CodecLimits,
    wire_limits: &wire::Limits,
) -> Result<ReplayReport> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read trace {}", path.display()))?;
    let trace = parse_trace(&contents)?;
    replay_trace(&trace, limits.clone(), wire_limits.clone())
        .with_context(|| format!("replay {}", path.display()))
}

fn print_report(report: &ReplayReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", format_pretty(report)),
    }
    Ok(())
}

fn collect_traces(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !pattern.matches_path(&path) && !matches_name {
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}
