use crate::export::ReportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchclock
/// CLI application to track team attendance with SQLite
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A team attendance CLI: record check-ins/check-outs and build reports using SQLite",
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

    /// Log your daily work start time
    Checkin {
        /// Organization (external id); falls back to default_org
        #[arg(long)]
        org: Option<String>,

        /// Person checking in (external id)
        #[arg(long)]
        person: String,

        /// Display name used when the person is first registered
        #[arg(long)]
        name: Option<String>,

        /// Display name used when the organization is first registered
        #[arg(long = "org-name")]
        org_name: Option<String>,
    },

    /// Log your daily work end time with a work summary
    Checkout {
        /// Organization (external id); falls back to default_org
        #[arg(long)]
        org: Option<String>,

        /// Person checking out (external id)
        #[arg(long)]
        person: String,

        /// Day the checkout applies to (MM/DD/YY, up to the backdate
        /// limit days in the past); defaults to today
        #[arg(long, value_name = "MM/DD/YY")]
        date: Option<String>,

        /// Work summary note (required)
        #[arg(required = true, trailing_var_arg = true)]
        note: Vec<String>,
    },

    /// Display members' attendance records over a date range
    Report {
        /// Organization (external id); falls back to default_org
        #[arg(long)]
        org: Option<String>,

        /// Start date for the attendance report
        #[arg(long = "from", value_name = "MM/DD/YY")]
        from: String,

        /// End date for the attendance report
        #[arg(long = "to", value_name = "MM/DD/YY")]
        to: String,

        /// Only include members carrying this role
        #[arg(long)]
        role: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Output file (required for csv/json)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,
    },

    /// Manage an organization's roster
    Roster {
        #[command(subcommand)]
        action: RosterAction,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum RosterAction {
    /// Register a person in an organization's roster
    Add {
        /// Organization (external id); falls back to default_org
        #[arg(long)]
        org: Option<String>,

        /// Person to register (external id)
        #[arg(long)]
        person: String,

        /// Display name used when the person is first registered
        #[arg(long)]
        name: Option<String>,

        /// Role identifier; may be repeated
        #[arg(long = "role")]
        roles: Vec<String>,

        /// Mark the person as a bot (excluded from reports)
        #[arg(long)]
        bot: bool,
    },

    /// List an organization's roster
    List {
        /// Organization (external id); falls back to default_org
        #[arg(long)]
        org: Option<String>,

        /// Only show members carrying this role
        #[arg(long)]
        role: Option<String>,
    },
}
