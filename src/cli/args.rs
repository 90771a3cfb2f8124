use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use serde::{Deserialize, Serialize};

use crate::catalog::{ContentKind, Level};

/// Browse, search and bookmark university courses and events
#[derive(Parser)]
#[command(name = "uniscout")]
#[command(version, propagate_version = true)]
#[command(about = "Browse, search and bookmark university courses and events")]
pub struct Cli {
    /// Output format for command results [default: from config, else pretty]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Write shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    /// Parse a config value; matching is case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List courses
    #[command(alias = "c")]
    Courses(CoursesArgs),

    /// List events
    #[command(alias = "e")]
    Events(EventsArgs),

    /// Show details of a course
    Course(ShowArgs),

    /// Show details of an event
    Event(ShowArgs),

    /// Search courses and events by title, description, category or tag
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List categories, or show everything in one category
    Category(CategoryArgs),

    /// Bookmark a course or event
    Save(BookmarkArgs),

    /// Remove a bookmark
    Unsave(BookmarkArgs),

    /// Flip the bookmark on a course or event
    Toggle(BookmarkArgs),

    /// List bookmarked courses and events
    Saved(SavedArgs),

    /// Create an account and log in
    Register(RegisterArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Log out of the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage your profile
    Profile(ProfileArgs),

    /// Manage the local catalog cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the courses command
#[derive(Args)]
pub struct CoursesArgs {
    /// Only show courses in this category (exact match)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only show courses at this level
    #[arg(short = 'L', long, value_enum)]
    pub level: Option<Level>,

    /// Only show free courses
    #[arg(long)]
    pub free: bool,

    /// Maximum number of courses to show
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the events command
#[derive(Args)]
pub struct EventsArgs {
    /// Only show events in this category (exact match)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only show online events
    #[arg(long)]
    pub online: bool,

    /// Maximum number of events to show
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the course and event commands
#[derive(Args)]
pub struct ShowArgs {
    /// Record id
    pub id: String,
}

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Search text; empty lists everything
    #[arg(default_value = "")]
    pub query: String,
}

/// Arguments for the category command
#[derive(Args)]
pub struct CategoryArgs {
    /// Category name (exact match)
    pub name: Option<String>,
}

/// Arguments for the save, unsave and toggle commands
#[derive(Args)]
pub struct BookmarkArgs {
    /// Kind of record
    #[arg(value_enum)]
    pub kind: ContentKind,

    /// Record id
    pub id: String,
}

/// Arguments for the saved command
#[derive(Args)]
pub struct SavedArgs {
    /// Only show one kind
    #[arg(short, long, value_enum)]
    pub kind: Option<ContentKind>,
}

/// Arguments for the register command
#[derive(Args)]
pub struct RegisterArgs {
    /// Email address
    #[arg(long)]
    pub email: String,

    /// Full name
    #[arg(long)]
    pub name: String,

    /// Student id
    #[arg(long)]
    pub student_id: String,

    /// Faculty
    #[arg(long, default_value = "")]
    pub faculty: String,

    /// Year of study
    #[arg(long, default_value = "")]
    pub year: String,

    /// Password (prompted for when omitted)
    #[arg(long, env = "UNISCOUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Password confirmation (defaults to --password)
    #[arg(long)]
    pub confirm_password: Option<String>,
}

/// Arguments for the login command
#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(long, env = "UNISCOUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the profile command
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the logged-in user's profile
    Show,
    /// Update fields of the logged-in user's profile
    Update {
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New faculty
        #[arg(long)]
        faculty: Option<String>,
        /// New year of study
        #[arg(long)]
        year: Option<String>,
    },
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cached entries, their age and freshness
    Status,
    /// Drop cached catalogs so the next read refetches
    Clear,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., remote.base_url)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("PRETTY"), Some(OutputFormat::Pretty));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn test_parse_bookmark_args() {
        let cli = Cli::try_parse_from(["uniscout", "save", "event", "fallback_0"]).unwrap();
        match cli.command {
            Commands::Save(args) => {
                assert_eq!(args.kind, ContentKind::Event);
                assert_eq!(args.id, "fallback_0");
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["uniscout", "-vv", "courses"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_search_query_defaults_to_empty() {
        let cli = Cli::try_parse_from(["uniscout", "search"]).unwrap();
        match cli.command {
            Commands::Search(args) => assert!(args.query.is_empty()),
            _ => panic!("expected search"),
        }
    }
}
