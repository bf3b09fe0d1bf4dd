use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ntflow
/// CLI application to track NT sampling tickets and cabin sessions with SQLite
#[derive(Parser)]
#[command(
    name = "ntflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track quality-sampling work tickets (NTs), cabin sessions and OEE metrics using SQLite",
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
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

        #[arg(long = "check", help = "Check database integrity and domain consistency")]
        check: bool,

        #[arg(long = "repair", help = "Force-close pause intervals orphaned by finished runs")]
        repair: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal change journal
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a new work ticket with its line items
    Create {
        /// Ticket number (e.g. NT-1001)
        number: String,

        /// Line item as CODE:DESCRIPTION:QTY:BATCH (repeatable)
        #[arg(long = "item", value_name = "SPEC", required = true)]
        items: Vec<String>,
    },

    /// Edit a ticket that nobody has claimed yet
    Edit {
        /// Ticket number
        number: String,

        /// New ticket number
        #[arg(long = "number", value_name = "NEW")]
        new_number: Option<String>,

        /// Upsert a line item as CODE:DESCRIPTION:QTY:BATCH (repeatable)
        #[arg(long = "item", value_name = "SPEC")]
        items: Vec<String>,

        /// Delete the line item with this code (repeatable)
        #[arg(long = "drop-item", value_name = "CODE")]
        drop_items: Vec<String>,
    },

    /// Delete a ticket still fully awaiting sampling
    Del {
        /// Ticket number
        number: String,

        /// Skip the confirmation prompt
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Claim an awaiting ticket for a cabin and start its timer
    Claim {
        /// Ticket number
        number: String,

        #[arg(long = "cabin", value_name = "NAME")]
        cabin: String,

        /// Operator badge (5 digits)
        #[arg(long = "operator", value_name = "BADGE")]
        operator: String,
    },

    /// Pause a running cabin session
    Pause {
        /// Cabin name
        cabin: String,

        /// Reason code: T=Troca de Turno, A=Almoço, M=Manutenção, R=Reunião, O=Outros
        #[arg(long = "reason", value_name = "CODE")]
        reason: String,

        /// Free-text note (mandatory with --reason O)
        #[arg(long = "note", default_value = "")]
        note: String,
    },

    /// Resume a paused cabin session
    Resume {
        /// Cabin name
        cabin: String,
    },

    /// Finish sampling for a cabin's active ticket
    Finish {
        /// Cabin name
        cabin: String,
    },

    /// Record the withdrawal (baixa) of a finished ticket
    Withdraw {
        /// Ticket number
        number: String,

        /// Sampling type: avr or conventional
        #[arg(long = "type", value_name = "TYPE")]
        sampling_type: String,

        /// Free-text notes
        #[arg(long = "notes", default_value = "")]
        notes: String,
    },

    /// List tickets and their line items
    List {
        /// Filter by stage (awaiting, sampling, withdrawal, finalized)
        #[arg(long)]
        status: Option<String>,

        /// Filter by cabin
        #[arg(long)]
        cabin: Option<String>,

        /// Filter by creation period (YYYY, YYYY-MM or YYYY-MM-DD)
        #[arg(long, short)]
        period: Option<String>,

        /// Show the line items of each ticket
        #[arg(long = "items")]
        items: bool,
    },

    /// Show the session state of every configured cabin
    Status {
        /// Only this cabin
        #[arg(long)]
        cabin: Option<String>,
    },

    /// Fleet metrics: stage counts, average cycle time, efficiency
    Stats {
        /// Restrict cycle/efficiency metrics to runs started in this
        /// period (YYYY, YYYY-MM or YYYY-MM-DD)
        #[arg(long, short)]
        period: Option<String>,
    },

    /// Export tickets, history or OEE records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Export tickets with their items (default)
        #[arg(long, conflicts_with_all = ["history", "oee"])]
        tickets: bool,

        /// Export withdrawal history
        #[arg(long, conflicts_with_all = ["tickets", "oee"])]
        history: bool,

        /// Export OEE records
        #[arg(long, conflicts_with_all = ["tickets", "history"])]
        oee: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
