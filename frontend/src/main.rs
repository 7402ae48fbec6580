use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use phosphor_ict_boards::registry::{self, GameEntry};
use phosphor_ict_core::engine::{self, Step};
use phosphor_ict_core::sim::SimBoard;

mod config;
mod logger;
mod report;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "phosphor-ict",
    about = "In-circuit diagnostics for Z80 arcade boards (simulated target)."
)]
struct Cli {
    /// Config file (defaults to <config dir>/phosphor-ict/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the ROM sets the selector offers.
    List,
    /// Run a diagnostic session on one ROM set.
    Run {
        /// ROM set key, as shown by `list`.
        game: String,

        /// Limit the session to these step groups (can repeat).
        #[arg(long, value_enum, value_delimiter = ',')]
        only: Vec<Scope>,

        /// End the session at the first failing check.
        #[arg(long, default_value_t = false)]
        stop_on_failure: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Ram,
    Rom,
    Io,
    Custom,
    Interrupt,
}

impl From<Scope> for Step {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Ram => Step::Ram,
            Scope::Rom => Step::Rom,
            Scope::Io => Step::Io,
            Scope::Custom => Step::Custom,
            Scope::Interrupt => Step::Interrupt,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logger::init(logger::level_for(config.level_filter(), cli.verbose));

    match cli.command {
        Command::List => {
            for entry in registry::all() {
                println!("{}", report::entry_line(entry));
            }
            ExitCode::SUCCESS
        }
        Command::Run {
            game,
            only,
            stop_on_failure,
        } => {
            let Some(entry) = registry::find(&game) else {
                let keys: Vec<_> = registry::all().iter().map(|e| e.key).collect();
                eprintln!("Unknown game: {game}");
                eprintln!("Available: {}", keys.join(", "));
                return ExitCode::FAILURE;
            };
            let steps: Vec<Step> = if only.is_empty() {
                Step::ALL.to_vec()
            } else {
                only.into_iter().map(Step::from).collect()
            };
            run(entry, &config, &steps, stop_on_failure || config.stop_on_failure)
        }
    }
}

/// Bring up a simulated board for `entry` and walk it.
fn run(entry: &GameEntry, config: &Config, steps: &[Step], stop_on_failure: bool) -> ExitCode {
    let sim = simulated_target(entry, config);
    let mut game = match (entry.create)(&mut sim.probe()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{}: {} {e}", entry.variant.name, e.code());
            return ExitCode::FAILURE;
        }
    };

    println!("{}", game.name());
    let findings = engine::walk(game.as_mut(), steps, stop_on_failure);
    for finding in &findings {
        println!("{}", report::finding_line(finding));
    }
    println!("{}", report::summary(&findings));

    if findings.iter().all(|f| f.passed()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// A healthy board of the variant's family, with any configured faults.
fn simulated_target(entry: &GameEntry, config: &Config) -> SimBoard {
    let family = entry.variant.family;
    let period = config
        .sim
        .interrupt_period_ms
        .unwrap_or(family.interrupt_period_ms);

    let sim = SimBoard::for_protocol(&family.interrupt, period);
    sim.seed_spot_checks(entry.variant.roms);
    sim.assert_while_masked(config.sim.assert_while_masked);
    if let Some(n) = config.sim.fail_write_at {
        sim.fail_write_at(n);
    }
    sim
}
