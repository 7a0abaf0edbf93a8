use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hoslog
/// CLI logbook for driver Hours-of-Service, backed by SQLite
#[derive(Parser)]
#[command(
    name = "hoslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "An Hours-of-Service logbook: record duty status and check 11/14/70-hour compliance using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record one duty status entry
    Add {
        /// Driver identifier
        driver: String,

        /// Duty status (D/driving, ON/on_duty_not_driving, SB/sleeper_berth, OFF/off_duty)
        status: String,

        /// Start time (YYYY-MM-DD HH:MM local, or RFC 3339)
        start: String,

        /// End time (YYYY-MM-DD HH:MM local, or RFC 3339)
        end: String,

        #[arg(long, help = "Free-text note (location, remarks)")]
        note: Option<String>,
    },

    /// Import daily logs from a JSON file (all or nothing)
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// List a driver's entries grouped by log day
    List {
        driver: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Compute the HOS status of a driver
    Status {
        driver: String,

        #[arg(long, help = "Evaluation instant (default: now)")]
        at: Option<String>,

        #[arg(long, help = "Print the snapshot as JSON")]
        json: bool,

        #[arg(long, help = "Persist detected violations")]
        record: bool,
    },

    /// HOS status of every driver in the logbook
    Fleet {
        #[arg(long, help = "Evaluation instant (default: now)")]
        at: Option<String>,
    },

    /// List or resolve persisted violations
    Violations {
        #[arg(required_unless_present = "resolve")]
        driver: Option<String>,

        #[arg(long, help = "Show only open violations")]
        open: bool,

        #[arg(long, value_name = "ID", conflicts_with_all = ["driver", "open"])]
        resolve: Option<i64>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export duty entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export a single driver")]
        driver: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
