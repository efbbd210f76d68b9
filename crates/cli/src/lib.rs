use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use dmst_graph::{ArborescenceSolver, SolverConfig};
use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod flags;
mod input;
mod report;

pub use flags::OutputFormat;
pub use input::{parse_graph_input, read_graph_input, GraphInput, InputError};
pub use report::{render_report, RunReport};

const DEADLINE_ENV: &str = "DMST_DEADLINE_MS";

#[derive(Parser)]
#[command(name = "dmst")]
#[command(about = "Minimum spanning arborescence of a weighted directed graph", long_about = None)]
#[command(version)]
struct Cli {
    /// Graph description file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Print the arborescence edges as `(u,v)` lines after the weight
    #[arg(long)]
    print_tree: bool,

    /// Wall-clock budget in milliseconds (overrides DMST_DEADLINE_MS)
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Maximum number of cycle contractions
    #[arg(long)]
    max_contractions: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for the result)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// How a single run should solve and render
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub print_tree: bool,
    pub config: SolverConfig,
}

/// Solve one graph description and render the result.
///
/// Returns `Ok(None)` for an empty description, which produces no output.
pub fn run(text: &str, options: &RunOptions) -> Result<Option<String>> {
    let Some(input) = parse_graph_input(text).context("Failed to parse graph description")? else {
        log::debug!("Empty graph description, nothing to solve");
        return Ok(None);
    };

    let solver = ArborescenceSolver::new(options.config.clone())?;
    let vertices = input.vertex_count;
    let edges = input.edges.len();
    let graph = input.into_graph().context("Failed to build graph")?;

    let started = Instant::now();
    let solution = solver
        .solve(graph)
        .context("Failed to compute minimum arborescence")?;
    let report = RunReport::new(vertices, edges, solution, started.elapsed());

    log::debug!("Rendering {} output", options.format.as_str());
    render_report(&report, options.format, options.print_tree).map(Some)
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let deadline_ms = match cli.deadline_ms {
        Some(ms) => Some(ms),
        None => deadline_from_env()?,
    };
    let options = RunOptions {
        format: cli.format,
        print_tree: cli.print_tree,
        config: SolverConfig {
            deadline_ms,
            max_contractions: cli.max_contractions,
        },
    };

    let text = read_text(cli.input.as_deref())?;
    if let Some(out) = run(&text, &options)? {
        print!("{out}");
    }
    Ok(())
}

fn read_text(path: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            io::Read::read_to_string(&mut io::BufReader::new(file), &mut text)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            io::Read::read_to_string(&mut io::stdin().lock(), &mut text)
                .context("Failed to read stdin")?;
        }
    }
    Ok(text)
}

fn deadline_from_env() -> Result<Option<u64>> {
    match env::var(DEADLINE_ENV) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {DEADLINE_ENV} value {raw:?}")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "3 4 1\n1 2 4\n1 3 10\n2 3 1\n3 2 1\n";

    #[test]
    fn test_run_prints_weight() {
        let out = run(TRIANGLE, &RunOptions::default()).unwrap();
        assert_eq!(out.as_deref(), Some("5\n"));
    }

    #[test]
    fn test_run_empty_input() {
        assert!(run("", &RunOptions::default()).unwrap().is_none());
    }

    #[test]
    fn test_run_reports_unreachable_vertices() {
        let err = run("3 1 1\n1 2 4\n", &RunOptions::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("No arborescence"), "{message}");
        assert!(message.contains("[3]"), "{message}");
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let options = RunOptions {
            config: SolverConfig::with_deadline(0),
            ..Default::default()
        };
        assert!(run(TRIANGLE, &options).is_err());
    }
}
