//! CLI entry point for the wire cutter search.
//!
//! Usage:
//!   wire-cutter search [options]
//!   wire-cutter solve <COLORS>... [options]
//!   wire-cutter check <COLORS>... --cuts <POSITIONS>... [--explain]
//!
//! Search options:
//!   --config <file>              TOML settings file
//!   --wires <n>                  Wires per configuration (default: 8)
//!   --min-cuts <n>               Minimum cuts for an accepted game (default: 6)
//!   --max-cuts <n>               Longest cut sequence to try (default: 7)
//!   --workers <n>                Worker threads (default: available cores)
//!   --progress-interval <secs>   Time between progress reports (default: 10)
//!   --seed <n>                   Shuffle seed
//!   --no-shuffle                 Search in enumeration order
//!   --time-limit <secs>          Abort the search after this long (Ctrl-C also aborts)
//!   --limit <n>                  Stop after this many accepted games
//!   --json                       Machine-readable output

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::{info, warn, LevelFilter};
use serde::Serialize;

use wire_cutter::{
    execute, generate, legal_rules, run, solve, CancelToken, Configuration, CutSequence,
    ExecutionStatus, Outcome, Rejection, RunEvent, RunSummary, SearchOverrides, SearchSettings,
    SolverConfig, WireError, WireState,
};

/// Exit code for a search that was aborted before finishing
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(name = "wire-cutter")]
#[command(about = "Search for wire cutting puzzles that need enough cuts to be interesting")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every configuration that uses all colors
    Search {
        /// TOML settings file, overridden by the flags below
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Wires per configuration
        #[arg(long)]
        wires: Option<usize>,

        /// Minimum cuts for an accepted game
        #[arg(long)]
        min_cuts: Option<usize>,

        /// Longest cut sequence to try
        #[arg(long)]
        max_cuts: Option<usize>,

        /// Worker threads
        #[arg(long)]
        workers: Option<usize>,

        /// Seconds between progress reports
        #[arg(long)]
        progress_interval: Option<u64>,

        /// Shuffle seed
        #[arg(long)]
        seed: Option<u64>,

        /// Search in enumeration order
        #[arg(long)]
        no_shuffle: bool,

        /// Abort the search after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,

        /// Stop after this many accepted games
        #[arg(long)]
        limit: Option<usize>,

        /// Print accepted games and the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify a single configuration
    Solve {
        /// Wire colors in order (red, green, blue, yellow or r, g, b, y)
        #[arg(required = true, value_name = "COLORS")]
        colors: Vec<String>,

        /// Minimum cuts for an accepted game
        #[arg(long, default_value = "6")]
        min_cuts: usize,

        /// Longest cut sequence to try
        #[arg(long, default_value = "7")]
        max_cuts: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a cut sequence against a configuration
    Check {
        /// Wire colors in order (red, green, blue, yellow or r, g, b, y)
        #[arg(required = true, value_name = "COLORS")]
        colors: Vec<String>,

        /// Positions to cut, in order
        #[arg(long, num_args = 0.., value_name = "POSITIONS")]
        cuts: Vec<usize>,

        /// List the rules that allow each cut
        #[arg(long)]
        explain: bool,
    },
}

/// One accepted game, printed as a JSON line
#[derive(Debug, Serialize)]
struct AcceptedOutput<'a> {
    wires: &'a Configuration,
    solution: &'a CutSequence,
}

/// Final statistics of a search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput {
    total: usize,
    checked: usize,
    accepted: usize,
    too_easy: usize,
    impossible: usize,
    accepted_percent: f64,
    too_easy_percent: f64,
    impossible_percent: f64,
    games_per_second: f64,
    time_elapsed_ms: u64,
    stop_reason: wire_cutter::StopReason,
}

/// Classification of one configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    wires: Configuration,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<CutSequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortest: Option<CutSequence>,
    permutations_tested: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let result = match cli.command {
        Commands::Search {
            config,
            wires,
            min_cuts,
            max_cuts,
            workers,
            progress_interval,
            seed,
            no_shuffle,
            time_limit,
            limit,
            json,
        } => {
            let overrides = SearchOverrides {
                num_wires: wires,
                min_cuts,
                max_cuts,
                workers,
                progress_interval,
                seed,
                no_shuffle,
                time_limit,
                limit,
            };
            SearchSettings::resolve(config.as_deref(), &overrides)
                .and_then(|settings| search(&settings, json))
        }
        Commands::Solve {
            colors,
            min_cuts,
            max_cuts,
            json,
        } => solve_one(&colors, SolverConfig { min_cuts, max_cuts }, json),
        Commands::Check {
            colors,
            cuts,
            explain,
        } => check(&colors, &cuts, explain),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn search(settings: &SearchSettings, json: bool) -> Result<i32, WireError> {
    settings.validate()?;

    let seed = settings.shuffle.then(|| settings.seed.unwrap_or_else(rand::random));
    if let Some(seed) = seed {
        info!("Shuffling configurations with seed {seed}");
    }

    if !json {
        println!("Generating game configurations...");
    }
    let games = generate(settings.num_wires, seed);
    if !json {
        println!(
            "Searching for acceptable games from {} configurations...",
            games.len()
        );
    }

    let cancel = CancelToken::new();
    if let Err(e) = cancel.cancel_on_interrupt() {
        warn!("{e}, Ctrl-C will end the process without a summary");
    }

    let summary = run(
        games,
        &settings.solver(),
        &settings.dispatch(),
        &cancel,
        |event| match event {
            RunEvent::Accepted { config, cuts } => {
                if json {
                    print_json_line(&AcceptedOutput {
                        wires: config,
                        solution: cuts,
                    });
                } else {
                    println!();
                    println!("{}", config.listing());
                    println!("Solution: {cuts}");
                }
            }
            RunEvent::Progress(progress) => {
                if !json {
                    println!();
                    println!(
                        "Progress: {:.1} % at {:.2} games per second",
                        progress.percent_done(),
                        progress.rate()
                    );
                    print!("{}", progress.tally);
                }
            }
        },
    );

    if json {
        print_json_line(&format_summary(&summary));
    } else {
        println!();
        if summary.interrupted() {
            println!("Aborting...");
        }
        println!(
            "Checked {} games at {:.2} games per second",
            summary.tally().total_checked,
            summary.progress.rate()
        );
        print!("{}", summary.tally());
    }

    Ok(if summary.interrupted() {
        EXIT_INTERRUPTED
    } else {
        0
    })
}

fn solve_one(colors: &[String], solver: SolverConfig, json: bool) -> Result<i32, WireError> {
    let config = Configuration::parse(colors, colors.len())?;
    solver.validate(config.len())?;

    let Some(report) = solve(&config, &solver, &CancelToken::new()) else {
        return Ok(EXIT_INTERRUPTED);
    };

    if json {
        print_json_line(&SolveOutput {
            outcome: outcome_label(&report.outcome),
            solution: report.outcome.solution().cloned(),
            shortest: report.shortest.clone(),
            permutations_tested: report.permutations_tested,
            time_elapsed_ms: report.time_elapsed_ms,
            wires: config,
        });
        return Ok(0);
    }

    println!("{}", config.listing());
    match (&report.outcome, &report.shortest) {
        (Outcome::Solved(cuts), _) => println!("Accepted\nSolution: {cuts}"),
        (Outcome::Rejected(Rejection::TooEasy), Some(cuts)) => {
            println!("Too easy: solved with {} cuts\nSolution: {cuts}", cuts.len())
        }
        (Outcome::Rejected(_), _) => {
            println!("Impossible within {} cuts", solver.max_cuts)
        }
    }
    println!(
        "Tested {} cut sequences in {} ms",
        report.permutations_tested, report.time_elapsed_ms
    );
    Ok(0)
}

fn check(colors: &[String], cuts: &[usize], explain: bool) -> Result<i32, WireError> {
    let config = Configuration::parse(colors, colors.len())?;
    let cuts = CutSequence::new(cuts, config.len())?;

    println!("{}", config.listing());

    let result = execute(&config, cuts.positions());

    if explain {
        let mut state = WireState::from_configuration(&config);
        for (step, &cut) in cuts.positions().iter().enumerate().take(result.cuts_applied) {
            let rules: Vec<String> = legal_rules(&state, cut)
                .iter()
                .map(|rule| format!("rule {}", rule.number))
                .collect();
            println!(
                "Step {step}: cut {cut} ({}) allowed by {}",
                config.get(cut).map_or("?", |c| c.name()),
                rules.join(", ")
            );
            state.cut(cut);
        }
    }

    match (result.status, result.failed_step) {
        (ExecutionStatus::Victory, _) => println!("Result: victory"),
        (ExecutionStatus::DangerRemaining, _) => println!("Result: red wires remain"),
        (ExecutionStatus::IllegalCut, Some(step)) => println!(
            "Result: no rule allows cutting {} at step {step}",
            cuts.positions()[step]
        ),
        (ExecutionStatus::CutAfterVictory, Some(step)) => {
            println!("Result: cut at step {step} comes after victory")
        }
        (status, None) => println!("Result: {status:?}"),
    }

    Ok(0)
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Solved(_) => "accepted",
        Outcome::Rejected(Rejection::TooEasy) => "too_easy",
        Outcome::Rejected(Rejection::Impossible) => "impossible",
    }
}

fn format_summary(summary: &RunSummary) -> SummaryOutput {
    let tally = summary.tally();
    SummaryOutput {
        total: summary.progress.total,
        checked: tally.total_checked,
        accepted: tally.accepted,
        too_easy: tally.too_easy,
        impossible: tally.impossible,
        accepted_percent: tally.percentage(tally.accepted),
        too_easy_percent: tally.percentage(tally.too_easy),
        impossible_percent: tally.percentage(tally.impossible),
        games_per_second: summary.progress.rate(),
        time_elapsed_ms: summary.progress.elapsed.as_millis() as u64,
        stop_reason: summary.stop_reason,
    }
}

fn print_json_line<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => eprintln!("Error formatting JSON output: {e}"),
    }
}
