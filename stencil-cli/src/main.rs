//! Stencil CLI - inspect pass pipelines
//!
//! Loads a pass configuration and prints which passes would run, in order.

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::{Path, PathBuf};
use std::process;

use stencil_config::{ContinuationRule, PassConfig};
use stencil_passes::{is_known_pass, PassPlan, PipelineBuilder};
use tracing::{debug, info, warn};

mod config;
mod logging;

use crate::config::{parse_level, parse_phase_level, LogConfig};
use crate::logging::LogFormat;

/// 输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Stencil template compiler - show the pass pipeline for a configuration",
    version = "0.1.0"
)]
struct Cli {
    /// Pass configuration file (JSON); defaults are used when omitted
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Halt assembly before the named pass (repeatable)
    #[arg(long = "stop-before", value_name = "PASS")]
    stop_before: Vec<String>,

    /// Halt assembly after the named pass (repeatable)
    #[arg(long = "stop-after", value_name = "PASS")]
    stop_after: Vec<String>,

    /// Plan output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Global log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Per-phase log level override, e.g. `assembly=trace` (repeatable)
    #[arg(long = "log-phase", value_name = "PHASE=LEVEL")]
    log_phase: Vec<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let log_config = match build_log_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    logging::init(&log_config, cli.log_format);

    let mut pass_config = match &cli.config {
        Some(path) => match read_pass_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => PassConfig::default(),
    };
    debug!(
        target: "stencil::cli",
        stop_before = ?cli.stop_before,
        stop_after = ?cli.stop_after,
        "command line continuation rules"
    );
    apply_rule_flags(&mut pass_config, rule_flags(&matches));

    for name in pass_config.continuation_rules.keys() {
        if !is_known_pass(name) {
            warn!(target: "stencil::cli", pass = %name, "continuation rule names no known pass");
        }
    }

    let plan = match PipelineBuilder::from_config(&pass_config).plan() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if plan.is_empty() {
        warn!(target: "stencil::cli", "continuation rules leave no pass to run");
    }
    info!(
        target: "stencil::cli",
        single_file = plan.single_file_passes.len(),
        fileset = plan.cross_template_checking_passes.len(),
        "plan ready"
    );

    match cli.output {
        OutputFormat::Text => print!("{}", render_text(&plan)),
        OutputFormat::Json => match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }
}

fn build_log_config(cli: &Cli) -> Result<LogConfig, String> {
    let global = parse_level(&cli.log_level)
        .ok_or_else(|| format!("unknown log level '{}'", cli.log_level))?;
    let mut config = LogConfig::with_global(global);
    for entry in &cli.log_phase {
        let (phase, level) = parse_phase_level(entry)
            .ok_or_else(|| format!("invalid phase log level '{}'", entry))?;
        config.set(phase, level);
    }
    Ok(config)
}

/// Read and parse a pass configuration file
fn read_pass_config(path: &Path) -> Result<PassConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    PassConfig::from_json(&content).map_err(|e| format!("failed to parse '{}': {}", path.display(), e))
}

/// `--stop-before` / `--stop-after` values in command line order
fn rule_flags(matches: &ArgMatches) -> Vec<(String, ContinuationRule)> {
    let mut flags: Vec<(usize, String, ContinuationRule)> = Vec::new();
    for (id, rule) in [
        ("stop_before", ContinuationRule::StopBeforePass),
        ("stop_after", ContinuationRule::StopAfterPass),
    ] {
        if let (Some(names), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        {
            flags.extend(indices.zip(names).map(|(i, name)| (i, name.clone(), rule)));
        }
    }
    flags.sort_by_key(|(i, _, _)| *i);
    flags.into_iter().map(|(_, name, rule)| (name, rule)).collect()
}

/// Command line rules override rules from the file; for a pass named
/// more than once, the last flag wins
fn apply_rule_flags(config: &mut PassConfig, rules: Vec<(String, ContinuationRule)>) {
    for (name, rule) in rules {
        config.continuation_rules.insert(name, rule);
    }
}

fn render_text(plan: &PassPlan) -> String {
    let mut out = format!("single-file passes ({}):\n", plan.single_file_passes.len());
    for (i, id) in plan.single_file_passes.iter().enumerate() {
        out.push_str(&format!("{:3}  {}\n", i + 1, id));
    }
    out.push_str(&format!(
        "fileset passes ({}):\n",
        plan.cross_template_checking_passes.len()
    ));
    for (i, id) in plan.cross_template_checking_passes.iter().enumerate() {
        out.push_str(&format!("{:3}  {:<32} {}\n", i + 1, id.name(), id.phase()));
    }
    out
}
