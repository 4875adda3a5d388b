use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use unitmatch_conformance::{
    bundled_cases, parse_call, parse_cases, Case, ConformanceReport, Runner, RunnerConfig,
};
use unitmatch_matcher::{MatchErrorKind, Operation, StringMatcher};

#[derive(Parser)]
#[command(name = "unitmatch")]
#[command(
    about = "Evaluate startsWith/endsWith/includes over UTF-16 code units",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single call, e.g. "'foo bar'.includes('bar', 4)"
    Eval(EvalArgs),

    /// Run a case file and report mismatches
    Check(CheckArgs),

    /// Run the bundled conformance suite
    Builtin(BuiltinArgs),
}

#[derive(Args)]
struct EvalArgs {
    /// Call expression in case syntax
    expression: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Runner config file (JSON or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop at the first failing case
    #[arg(long)]
    fail_fast: bool,

    /// Only run cases for this method (repeatable)
    #[arg(long = "operation", value_name = "METHOD")]
    operations: Vec<String>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Case file to run
    file: PathBuf,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct BuiltinArgs {
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Serialize)]
struct EvalOutput {
    expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<EvalError>,
}

#[derive(Serialize)]
struct EvalError {
    kind: MatchErrorKind,
    message: String,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Eval(args) => args.json,
        Commands::Check(args) => args.run.json,
        Commands::Builtin(args) => args.run.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Eval(args) => run_eval(args)?,
        Commands::Check(args) => run_check(args)?,
        Commands::Builtin(args) => run_builtin(args)?,
    }

    Ok(())
}

fn run_eval(args: EvalArgs) -> Result<()> {
    let call = parse_call(&args.expression).context("Invalid call expression")?;
    let result = call.try_evaluate(&StringMatcher::new());

    let output = EvalOutput {
        expression: call.to_string(),
        result: result.as_ref().ok().copied(),
        error: result.as_ref().err().map(|err| EvalError {
            kind: err.kind(),
            message: err.to_string(),
        }),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    match result {
        Ok(matched) => {
            if !args.json {
                println!("{matched}");
            }
        }
        Err(err) => {
            if !args.json {
                eprintln!("Error: {} ({err})", err.kind());
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read case file {}", args.file.display()))?;
    let cases = parse_cases(&text)
        .with_context(|| format!("Failed to parse case file {}", args.file.display()))?;
    run_cases(&cases, &args.run)
}

fn run_builtin(args: BuiltinArgs) -> Result<()> {
    let cases = bundled_cases().context("Bundled suite failed to parse")?;
    run_cases(&cases, &args.run)
}

fn run_cases(cases: &[Case], args: &RunArgs) -> Result<()> {
    let config = runner_config(args)?;
    log::debug!("Running {} cases with {config:?}", cases.len());
    let report = Runner::new(config).run(cases);

    print_report(&report, args.json)?;
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn runner_config(args: &RunArgs) -> Result<RunnerConfig> {
    let mut config = match &args.config {
        Some(path) => RunnerConfig::from_path(path)
            .with_context(|| format!("Failed to load runner config {}", path.display()))?,
        None => RunnerConfig::default(),
    };

    if args.fail_fast {
        config.fail_fast = true;
    }
    if !args.operations.is_empty() {
        config.operations = args
            .operations
            .iter()
            .map(|name| parse_operation(name))
            .collect::<Result<_>>()?;
    }

    config.validate().context("Invalid runner options")?;
    Ok(config)
}

fn parse_operation(name: &str) -> Result<Operation> {
    Operation::from_method_name(name).ok_or_else(|| {
        let known: Vec<_> = Operation::ALL.iter().map(|op| op.method_name()).collect();
        anyhow!("Unknown operation '{name}' (expected one of: {})", known.join(", "))
    })
}

fn print_report(report: &ConformanceReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_operation_names() {
        assert_eq!(parse_operation("endsWith").unwrap(), Operation::EndsWith);
        let err = parse_operation("indexOf").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown operation 'indexOf' (expected one of: startsWith, endsWith, includes)"
        );
    }
}
