use crate::core::dashboard::Period;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for opsboard
#[derive(Parser)]
#[command(
    name = "opsboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Operations dashboard: locations, churn and upsell tracking against a monthly sales target",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the session file
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Run in test mode (no config file update, no file logging)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        /// Create an administrator account right away
        #[arg(long = "admin-email", requires = "admin_password")]
        admin_email: Option<String>,

        #[arg(long = "admin-password", requires = "admin_email")]
        admin_password: Option<String>,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the current session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Revenue progress against the monthly target
    Dashboard {
        #[arg(long, short, value_enum, help = "current or previous month")]
        period: Option<Period>,
    },

    /// Show or set the monthly sales target
    Target {
        #[arg(long = "set", value_name = "AMOUNT", help = "New monthly target (admin only)")]
        set: Option<String>,
    },

    /// Company locations
    Map {
        #[command(subcommand)]
        action: MapAction,
    },

    /// Churn (customer loss) events
    Churn {
        #[command(subcommand)]
        action: ChurnAction,
    },

    /// Upsell (customer expansion) events
    Upsell {
        #[command(subcommand)]
        action: UpsellAction,
    },

    /// Client notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Manage credentials (admin only)
    User {
        #[command(subcommand)]
        action: UserAction,
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

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,
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
}

#[derive(Subcommand)]
pub enum MapAction {
    /// List locations as map markers
    List(LocationFilterArgs),

    /// Add a location (admin only)
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        country: String,
        #[arg(long = "lat", allow_hyphen_values = true)]
        latitude: String,
        #[arg(long = "lon", allow_hyphen_values = true)]
        longitude: String,
    },

    /// Edit a location
    Edit {
        id: i64,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long = "lat", allow_hyphen_values = true)]
        latitude: Option<String>,
        #[arg(long = "lon", allow_hyphen_values = true)]
        longitude: Option<String>,
    },
}

#[derive(Args, Default)]
pub struct LocationFilterArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

/// Date window shared by the churn and upsell lists.
#[derive(Args, Default)]
pub struct DateWindowArgs {
    #[arg(long, value_name = "YYYY-MM-DD", help = "Earliest event date (inclusive)")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Latest event date (inclusive)")]
    pub to: Option<String>,

    /// Period expression: YYYY, YYYY-MM, YYYY-MM-DD or a `start:end` range
    /// of the same shape (e.g. 2025-01:2025-03). Overrides --from/--to.
    #[arg(long, short = 'p', value_name = "RANGE")]
    pub period: Option<String>,
}

#[derive(Subcommand)]
pub enum ChurnAction {
    /// List churn events, newest first
    List {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        squad: Option<String>,
        #[command(flatten)]
        window: DateWindowArgs,
    },

    /// Record a churn (admin only)
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        reason: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,
        #[arg(long)]
        ltv: String,
        #[arg(long)]
        manager: String,
        #[arg(long = "lost")]
        lost_value: String,
        #[arg(long, default_value = "")]
        squad: String,
    },

    /// Edit a churn event; blank text clears an optional field
    Edit {
        id: i64,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        ltv: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long = "lost")]
        lost_value: Option<String>,
        #[arg(long)]
        squad: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UpsellAction {
    /// List upsell events, newest first
    List {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        squad: Option<String>,
        #[command(flatten)]
        window: DateWindowArgs,
    },

    /// Record an upsell (admin only)
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        service: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,
        #[arg(long)]
        manager: String,
        #[arg(long = "gained")]
        gained_value: String,
        #[arg(long, default_value = "")]
        squad: String,
    },

    /// Edit an upsell event; blank text clears an optional field
    Edit {
        id: i64,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long = "gained")]
        gained_value: Option<String>,
        #[arg(long)]
        squad: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// List notes, most recently updated first
    List {
        #[arg(long, short, help = "Match client name or note text")]
        search: Option<String>,
    },

    /// Add a note
    Add {
        #[arg(long)]
        client: String,
        #[arg(long)]
        text: String,
    },

    /// Rewrite a note
    Edit {
        id: String,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },

    /// Delete a note
    Del {
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create credentials
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "member", help = "admin or member")]
        role: String,
    },
}
