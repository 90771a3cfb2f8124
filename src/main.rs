use std::sync::Arc;

use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use uniscout::bookmarks::BookmarkLedger;
use uniscout::cli::args::{Cli, Commands, CompletionsArgs};
use uniscout::cli::{commands, OutputFormat};
use uniscout::config::{Config, Paths};
use uniscout::error::UniscoutError;
use uniscout::remote::OpenLibraryClient;
use uniscout::repository::ContentRepository;
use uniscout::session::SessionStore;
use uniscout::store::{FileStore, KeyValueStore};

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), UniscoutError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle completions command early (no config or store needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let paths = Paths::new()?;
    let mut config = Config::load_from(&paths)?;
    let format = cli
        .output
        .or_else(|| OutputFormat::parse(&config.output.format))
        .unwrap_or_default();

    // Config commands never touch the store
    if let Commands::Config(args) = &cli.command {
        let output = commands::config(&mut config, &paths, args, format)?;
        println!("{output}");
        return Ok(());
    }

    paths.ensure_dirs()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&paths.store_dir));
    let ledger = BookmarkLedger::new(Arc::clone(&store));
    let session = SessionStore::new(Arc::clone(&store));
    let repo = ContentRepository::new(
        Arc::clone(&store),
        Box::new(OpenLibraryClient::new(&config)?),
        config.cache_ttl(),
    );

    if matches!(cli.command, Commands::Login(_) | Commands::Register(_)) {
        if let Err(e) = session.seed_demo_user() {
            warn!(error = %e, "could not seed demo account");
        }
    }

    let output = match &cli.command {
        Commands::Courses(args) => commands::courses(&repo, args, format)?,
        Commands::Events(args) => commands::events(&repo, args, format)?,
        Commands::Course(args) => commands::course(&repo, &ledger, args, format)?,
        Commands::Event(args) => commands::event(&repo, &ledger, args, format)?,
        Commands::Search(args) => commands::search(&repo, args, format)?,
        Commands::Category(args) => commands::category(&repo, args, format)?,
        Commands::Save(args) => commands::save(&repo, &ledger, args, format)?,
        Commands::Unsave(args) => commands::unsave(&ledger, args, format)?,
        Commands::Toggle(args) => commands::toggle(&repo, &ledger, args, format)?,
        Commands::Saved(args) => commands::saved(&repo, &ledger, args, format)?,
        Commands::Register(args) => commands::register(&session, args, format)?,
        Commands::Login(args) => commands::login(&session, args, format)?,
        Commands::Logout => commands::logout(&session, format)?,
        Commands::Whoami => commands::whoami(&session, format)?,
        Commands::Profile(args) => commands::profile(&session, args, format)?,
        Commands::Cache(args) => commands::cache::handle(&repo, &paths, args, format)?,
        Commands::Config(_) | Commands::Completions(_) => unreachable!(), // Handled above
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
