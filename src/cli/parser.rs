use crate::export::ExportFormat;
use crate::store::StoreBackend;
use clap::{Parser, Subcommand};

/// Command-line interface definition for talleres
#[derive(Parser)]
#[command(
    name = "talleres",
    version = env!("CARGO_PKG_VERSION"),
    about = "Workshop register: view, filter, edit and save the shared worksheet of school workshops",
    long_about = None
)]
pub struct Cli {
    /// Configuration file to use instead of ~/.talleres/talleres.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the store location (sqlite file or csv directory)
    #[arg(global = true, long = "store", value_name = "PATH")]
    pub store: Option<String>,

    /// Override the store backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<StoreBackend>,

    /// Account name (admin or usuario)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Account secret
    #[arg(global = true, long = "password", env = "TALLERES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the store
    Init {
        /// Seed the worksheet from a CSV file in wire format
        #[arg(long, value_name = "FILE")]
        import: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Show the role of the logged-in account
    Whoami,

    /// List workshops
    List {
        #[arg(long, short, help = "Search by CCT or facility name")]
        filter: Option<String>,
    },

    /// Write the visible rows to an editable grid file
    Grid {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Search by CCT or facility name")]
        filter: Option<String>,

        #[arg(long)]
        force: bool,
    },

    /// Save an edited grid file back to the worksheet
    Save {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            short,
            help = "Filter the grid was generated with (must match the `grid` call)"
        )]
        filter: Option<String>,
    },

    /// Edit the visible rows in a text editor and save them
    Edit {
        #[arg(long, short, help = "Search by CCT or facility name")]
        filter: Option<String>,

        #[arg(long = "editor", help = "Editor to open the grid with")]
        editor: Option<String>,
    },

    /// Show workshop statistics for a period
    Stats {
        #[arg(long, help = "Start of the period (YYYY-MM-DD or DD/MM/YYYY)")]
        from: Option<String>,

        #[arg(long, help = "End of the period, inclusive (default: today)")]
        to: Option<String>,

        #[arg(long, help = "Print the statistics as JSON")]
        json: bool,
    },

    /// Export the worksheet
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Search by CCT or facility name")]
        filter: Option<String>,

        #[arg(long)]
        force: bool,
    },

    /// Replace the worksheet with a CSV file in wire format (admin only)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Print the store audit trail
    Audit {
        #[arg(long, short = 'n', help = "Show only the most recent entries")]
        limit: Option<usize>,
    },
}
