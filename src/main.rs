//! Harbor Ledger - Entry Point
//!
//! Loads the ledger, runs the command loop on stdin, and saves on exit.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use harbor_ledger::command::{parse_command, CommandExecutor, Flow, Session};
use harbor_ledger::core::error::Result;
use harbor_ledger::core::LedgerConfig;
use harbor_ledger::economy::RecipeCatalog;
use harbor_ledger::ledger::persist;
use harbor_ledger::ui::Renderer;
use tracing_subscriber::EnvFilter;

/// Track production buildings and supply balances of your cities
#[derive(Parser, Debug)]
#[command(name = "harbor-ledger")]
#[command(about = "Track production buildings and supply balances of cities and city groups")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ledger data file (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML recipe table replacing the built-in recipes
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Disable colored balances
    #[arg(long)]
    no_color: bool,
}

fn resolve_config(args: &Args) -> Result<LedgerConfig> {
    let mut config = match &args.config {
        Some(path) => LedgerConfig::load(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if let Some(recipes) = &args.recipes {
        config.recipes_path = Some(recipes.clone());
    }
    if args.no_color {
        config.color = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Logs go to stderr so they never interleave with command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let recipes = match &config.recipes_path {
        Some(path) => {
            let catalog = RecipeCatalog::load_from_toml(path)?;
            tracing::info!("Loaded {} recipes from {}", catalog.len(), path.display());
            catalog
        }
        None => RecipeCatalog::with_defaults(),
    };

    // A corrupt data file aborts here rather than starting from partial state
    let ledger = persist::load(&config.data_path)?;

    let mut session = Session::new(
        ledger,
        recipes,
        config.data_path.clone(),
        Renderer::new(config.color),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!(">> ");
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let reply = CommandExecutor::execute(&mut session, command);
        print!("{}", reply.output);
        if reply.flow == Flow::Exit {
            break;
        }
    }

    session.save()?;
    Ok(())
}
