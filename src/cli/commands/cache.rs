//! Cache management commands

use colored::Colorize;

use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::Paths;
use crate::error::Result;
use crate::output;
use crate::repository::ContentRepository;

/// Handle cache commands
pub fn handle(
    repo: &ContentRepository,
    paths: &Paths,
    args: &CacheArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        CacheCommands::Status => status(repo, paths, format),
        CacheCommands::Clear => clear(repo, format),
    }
}

fn status(repo: &ContentRepository, paths: &Paths, format: OutputFormat) -> Result<String> {
    let status = repo.cache_status();
    output::format_cache_status(&status, &paths.store_dir.to_string_lossy(), format)
}

fn clear(repo: &ContentRepository, format: OutputFormat) -> Result<String> {
    repo.clear_cache()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
