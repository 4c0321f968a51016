use crate::core::filter::RecordFilter;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for auditcheck
/// CLI application to keep audit checklists in SQLite and export them
#[derive(Parser)]
#[command(
    name = "auditcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small audit checklist manager: record findings in SQLite and export XLSX/PDF reports",
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

/// Exact-match filters shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Only items with exactly this title")]
    pub title: Option<String>,

    #[arg(long, help = "Only items in exactly this area")]
    pub area: Option<String>,

    #[arg(long = "assigned-to", help = "Only items assigned to exactly this person")]
    pub assigned_to: Option<String>,
}

impl From<&FilterArgs> for RecordFilter {
    fn from(args: &FilterArgs) -> Self {
        RecordFilter {
            title: args.title.clone(),
            area: args.area.clone(),
            assigned_to: args.assigned_to.clone(),
        }
    }
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

    /// Manage the database (schema setup, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending schema setup and upgrades")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a checklist item
    Add {
        #[arg(long, help = "Item title")]
        title: String,

        #[arg(long, default_value = "", help = "Area or location inspected")]
        area: String,

        #[arg(long = "assigned-to", default_value = "", help = "Person responsible")]
        assigned_to: String,

        /// Inspection date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        #[arg(long, help = "Finding text (may span several lines)")]
        finding: Option<String>,

        /// Y = passed, T = not passed
        #[arg(long = "check", default_value = "T")]
        check: String,

        #[arg(long, help = "Recommendation text (may span several lines)")]
        recommendation: Option<String>,
    },

    /// Change some fields of an existing item
    Edit {
        /// Item id
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        area: Option<String>,

        #[arg(long = "assigned-to")]
        assigned_to: Option<String>,

        #[arg(long, help = "Inspection date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long)]
        finding: Option<String>,

        #[arg(long = "check", help = "Y = passed, T = not passed")]
        check: Option<String>,

        #[arg(long)]
        recommendation: Option<String>,
    },

    /// Delete an item by id
    Del {
        /// Item id
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List items
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long = "details", help = "Show every field, multi-line text in full")]
        details: bool,

        #[arg(
            long = "filter-values",
            help = "Show the values available for --title, --area and --assigned-to"
        )]
        filter_values: bool,
    },

    /// Search items by keyword in every text field
    Search {
        keyword: String,

        #[arg(long = "details", help = "Show every field, multi-line text in full")]
        details: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export the checklist to XLSX, PDF, CSV or JSON
    Export {
        /// Output format (inferred from --file when omitted, else xlsx)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Absolute output path (default: audit_checklist.<ext> in the current directory)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_name = "KEYWORD", help = "Export only items matching a keyword")]
        search: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}
