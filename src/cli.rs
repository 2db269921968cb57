//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use sereto::output::OutputMode;

/// sereto - Security reporting tool
#[derive(Parser, Debug)]
#[command(
    name = "sereto",
    version,
    about = "Security reporting tool",
    long_about = "Manage the versioned configuration of security assessment projects.\n\n\
                  Every project version tracks its targets, dates and people.\n\
                  The configuration lives in config.json inside the project directory."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (default: nearest directory with config.json)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project in the project directory
    New {
        /// Project ID, e.g. PT01234
        id: String,

        /// Project name
        #[arg(short, long)]
        name: String,
    },

    /// Manage the project configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Add a retest version (copy of the latest version)
    Retest,

    /// Show version
    Version,
}

/// Version selection shared by commands reading the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Use a specific version, e.g. v1.0 (default: latest)
    #[arg(long)]
    pub at: Option<String>,

    /// Use all versions
    #[arg(short, long, conflicts_with = "at")]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show a summary of the configuration
    Show {
        #[command(flatten)]
        versions: VersionArgs,
    },

    /// List project versions
    Versions,

    /// Manage targets
    Targets {
        #[command(subcommand)]
        action: TargetAction,
    },

    /// Manage dates
    Dates {
        #[command(subcommand)]
        action: DateAction,
    },

    /// Manage people
    People {
        #[command(subcommand)]
        action: PersonAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum TargetAction {
    /// Show targets
    Show {
        #[command(flatten)]
        versions: VersionArgs,

        /// Only these categories
        #[arg(short, long, value_delimiter = ',')]
        category: Vec<String>,

        /// Regular expression searched in the target name
        #[arg(short, long)]
        name: Option<String>,

        /// Show targets NOT matching the filters
        #[arg(long)]
        inverse: bool,
    },

    /// Add a target
    Add {
        /// Category, e.g. dast, sast
        category: String,

        /// Target name
        name: String,

        /// Extra field as key=value (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete a target by its index (see `targets show`)
    Delete {
        /// 1-based index
        #[arg(short, long)]
        index: usize,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },

    /// Resolve a single target by index, category or unique name
    Select {
        /// Index, category or unique name (optional with a single target)
        selector: Option<String>,

        /// Version to select from (default: latest)
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DateAction {
    /// Show dates
    Show {
        #[command(flatten)]
        versions: VersionArgs,

        /// Only these types
        #[arg(short = 't', long = "type", value_delimiter = ',')]
        kind: Vec<String>,

        /// Only dates on or after this day
        #[arg(long)]
        start: Option<String>,

        /// Only dates on or before this day
        #[arg(long)]
        end: Option<String>,

        /// Show dates NOT matching the filters
        #[arg(long)]
        inverse: bool,
    },

    /// Add a date
    Add {
        /// Type: sow_sent, pentest_ongoing, review, meeting, report_sent
        kind: String,

        /// Day, or first day of a range (e.g. 05-Jan-2024 or 2024-01-05)
        date: String,

        /// Last day of a range
        #[arg(long)]
        until: Option<String>,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete a date by its index (see `dates show`)
    Delete {
        /// 1-based index
        #[arg(short, long)]
        index: usize,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PersonAction {
    /// Show people
    Show {
        #[command(flatten)]
        versions: VersionArgs,

        /// Only these types
        #[arg(short = 't', long = "type", value_delimiter = ',')]
        kind: Vec<String>,

        /// Regular expression searched in the name
        #[arg(short, long)]
        name: Option<String>,

        /// Regular expression searched in the business unit
        #[arg(short, long)]
        business_unit: Option<String>,

        /// Regular expression searched in the email
        #[arg(short, long)]
        email: Option<String>,

        /// Regular expression searched in the role
        #[arg(short, long)]
        role: Option<String>,

        /// Show people NOT matching the filters
        #[arg(long)]
        inverse: bool,
    },

    /// Add a person
    Add {
        /// Type: requester, asset_owner, security_officer, technical_contact, author, reviewer
        kind: String,

        /// Name
        #[arg(short, long)]
        name: Option<String>,

        /// Business unit
        #[arg(short, long)]
        business_unit: Option<String>,

        /// Email
        #[arg(short, long)]
        email: Option<String>,

        /// Role
        #[arg(short, long)]
        role: Option<String>,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete a person by its index (see `people show`)
    Delete {
        /// 1-based index
        #[arg(short, long)]
        index: usize,

        /// Version to modify (default: latest)
        #[arg(long)]
        at: Option<String>,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let project = cli.project.as_deref();

    match cli.command {
        Some(Command::New { id, name }) => commands::new_project(project, &id, &name, output_mode),
        Some(Command::Config { action }) => commands::config_cmd(project, action, output_mode),
        Some(Command::Retest) => commands::retest(project, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("sereto v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("sereto v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'sereto --help' for usage");
                println!("Run 'sereto new <ID> --name <NAME>' to get started");
            }
            Ok(())
        },
    }
}
