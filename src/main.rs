use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket_ledger::cli::{handle_ledger_command, run_shell, show_history, Console, Context};
use pocket_ledger::config::LedgerPaths;
use pocket_ledger::display::format_category_tree;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Terminal-based personal income and expense ledger",
    long_about = "pocket keeps a running balance and a list of income and expense \
                  records, filed under a fixed category tree. Run without a \
                  subcommand for the interactive shell."
)]
struct Cli {
    /// Data directory (defaults to $POCKET_LEDGER_DIR, then the current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    #[command(flatten)]
    Ledger(pocket_ledger::cli::LedgerCommands),

    /// Show the category tree
    Categories,

    /// Show recent ledger changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Write a default settings file to the data directory
    Init,

    /// Show resolved paths and settings
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new(cli.dir)?;
    let ctx = Context::load(paths)?;
    let mut console = Console::stdio();

    match cli.command {
        None | Some(Commands::Shell) => {
            run_shell(&ctx, &mut console)?;
        }
        Some(Commands::Ledger(cmd)) => {
            handle_ledger_command(&ctx, &mut console, cmd)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_tree(&ctx.taxonomy));
        }
        Some(Commands::History { limit }) => {
            show_history(&ctx, &mut console, limit)?;
        }
        Some(Commands::Init) => {
            let settings_file = ctx.paths().settings_file();
            if settings_file.exists() {
                println!("Settings already exist at: {}", settings_file.display());
            } else {
                ctx.settings.save(ctx.paths())?;
                println!("Wrote default settings to: {}", settings_file.display());
                println!("Edit the \"categories\" tree there to change the category list.");
            }
        }
        Some(Commands::Config) => {
            let paths = ctx.paths();
            println!("pocket-ledger Configuration");
            println!("===========================");
            println!("Data directory: {}", paths.base_dir().display());
            let ledger_state = if paths.has_ledger() { "" } else { " (not created yet)" };
            println!(
                "Ledger file:    {}{}",
                paths.records_file().display(),
                ledger_state
            );
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled:  {}", ctx.settings.audit_enabled);
            println!("  Schema version: {}", ctx.settings.schema_version);
        }
    }

    Ok(())
}
