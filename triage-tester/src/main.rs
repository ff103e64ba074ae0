mod logic;
mod scenarios;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{GameTester, LogicTester, ScenarioResult, reports, resolve_seed_inputs};
use scenarios::{ALL_SCENARIOS, get_scenario, list_scenarios};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for terminals
    Console,
    /// Machine-readable array of scenario results
    Json,
    /// Table for pasting into reviews
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "triage-tester", version = "0.1.0")]
#[command(about = "Automated playthrough testing for Triage Trail")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated numbers, ranges like 1..8, or `sweep`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let game_tester = GameTester::try_new(args.verbose)?;
    log::debug!(
        "content fingerprint {:016x}",
        game_tester.context().catalog.fingerprint()
    );
    log::info!(
        "running {} scenario(s) over {} seed(s), {} iteration(s) each",
        scenarios.len(),
        seeds.len(),
        args.iterations
    );

    let results = run_logic_scenarios(&args, &scenarios, &seeds, game_tester);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut sink = ReportSink::open(args.output.as_deref())?;
    writeln!(sink, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(sink, "  {key:15} - {description}")?;
    }
    sink.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎮 Triage Trail Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for name in ALL_SCENARIOS {
            if !scenarios.iter().any(|s| s == name) {
                scenarios.push(name.to_string());
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    game_tester: GameTester,
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(game_tester, args.verbose);
    let mut results = Vec::new();

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(logic_tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut sink = ReportSink::open(args.output.as_deref())?;
    let results_empty = results.is_empty();

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut sink, results)?,
        ReportFormat::Markdown if results_empty => writeln!(
            sink,
            "# Triage Trail Logic Test Results\n\n_No scenarios executed._"
        )?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut sink, results)?,
        ReportFormat::Console => {
            if results_empty {
                writeln!(sink, "No logic scenarios executed.")?;
            } else {
                reports::generate_console_report(&mut sink, results, start_time.elapsed())?;
            }
            writeln!(sink, "\n🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    sink.flush()?;
    Ok(())
}

/// Report destination: stdout or a file, always buffered.
struct ReportSink(Box<dyn Write>);

impl ReportSink {
    fn open(path: Option<&Path>) -> Result<Self> {
        let inner: Box<dyn Write> = match path {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(stdout())),
        };
        Ok(Self(inner))
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}
