//! Lexiplay - rules engine for gamified language drills
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lexiplay::cli::threat::ThreatOptions;
use lexiplay::cli::{
    LevelCommand, OutputOptions, ReplayCommand, SessionMode, SimilarityCommand, StartCommand,
    ThreatCommand, TokenizeCommand,
};
use lexiplay::config::{lexiplay_home, Config};
use lexiplay::error::exit_codes;

// =============================================================================
// CLI Definition
// =============================================================================

/// Lexiplay - rules engine for gamified language drills
#[derive(Parser)]
#[command(name = "lexiplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, short, global = true)]
    json: bool,
    /// Suppress output
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show player level, title and progress for an XP total
    Level {
        /// Experience total
        xp: u64,
        /// Previous total, to check for a level-up
        #[arg(long)]
        previous: Option<u64>,
    },

    /// Split a sentence into reorder tokens
    Tokenize {
        /// Sentence to split
        text: String,
    },

    /// Compare an expected answer with a given one
    Similarity {
        /// Expected answer
        expected: String,
        /// Given answer
        given: String,
    },

    /// Rank grammar-error patterns for the next practice batch
    Threat {
        /// JSON file with pattern statistics
        stats: PathBuf,
        /// JSON file with pattern definitions
        #[arg(long)]
        patterns: Option<PathBuf>,
        /// Maximum number of patterns
        #[arg(long, short)]
        limit: Option<usize>,
        /// Scoring time in Unix milliseconds
        #[arg(long)]
        now: Option<i64>,
    },

    /// Open a session from a content file with the configured time limits
    Start {
        /// Game mode
        #[arg(value_enum)]
        mode: ModeArg,
        /// JSON content file (exercise list, drill or batch)
        content: PathBuf,
    },

    /// Apply a recorded event script and print the final session state
    Replay {
        /// JSON file with `mode` and `events`
        script: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum ModeArg {
    Reorder,
    Blank,
    Sniper,
}

impl From<ModeArg> for SessionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Reorder => SessionMode::Reorder,
            ModeArg::Blank => SessionMode::Blank,
            ModeArg::Sniper => SessionMode::Sniper,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("lexiplay error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Install the log subscriber. `RUST_LOG` overrides the default directive.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexiplay=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Set up the global panic handler.
///
/// On panic, logs to `<lexiplay_home>/crash.log` and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("lexiplay panic: {}", info);

        if let Some(home) = lexiplay_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = OutputOptions {
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Level { xp, previous } => {
            let cmd = LevelCommand::new();
            let output = cmd.run(xp, previous);
            print_formatted(&cmd.format_output(&output, &options));
            Ok(success_to_exit_code(true))
        }
        Commands::Tokenize { text } => {
            let cmd = TokenizeCommand::new();
            let output = cmd.run(&text);
            print_formatted(&cmd.format_output(&output, &options));
            Ok(success_to_exit_code(true))
        }
        Commands::Similarity { expected, given } => {
            let cmd = SimilarityCommand::new(Config::load());
            let output = cmd.run(&expected, &given);
            print_formatted(&cmd.format_output(&output, &options));
            Ok(success_to_exit_code(true))
        }
        Commands::Threat {
            stats,
            patterns,
            limit,
            now,
        } => {
            let cmd = ThreatCommand::new(Config::load());
            let threat_options = ThreatOptions {
                json: options.json,
                quiet: options.quiet,
                patterns,
                limit,
                now_ms: now,
            };
            let output = cmd.run(&stats, &threat_options);
            print_formatted(&cmd.format_output(&output, &threat_options));
            Ok(success_to_exit_code(output.success))
        }
        Commands::Start { mode, content } => {
            let cmd = StartCommand::new(Config::load());
            let output = cmd.run(mode.into(), &content);
            print_formatted(&cmd.format_output(&output, &options));
            Ok(success_to_exit_code(output.success))
        }
        Commands::Replay { script } => {
            let cmd = ReplayCommand::new();
            let output = cmd.run(&script);
            print_formatted(&cmd.format_output(&output, &options));
            Ok(success_to_exit_code(output.success))
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        print!("{}", formatted);
        if !formatted.ends_with('\n') {
            println!();
        }
    }
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}
