use crate::export::{ExportFormat, ExportKind};
use clap::{Parser, Subcommand};

/// Command-line interface definition for kitatime
/// CLI application to track daycare staff hours with SQLite
#[derive(Parser)]
#[command(
    name = "kitatime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daycare staff time tracking: hours, absences, monthly locks and staffing ratios",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (default: `default_user` from the configuration)
    #[arg(global = true, long = "as", value_name = "USERNAME")]
    pub as_user: Option<String>,

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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage staff records
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Book working time and absences
    Entry {
        #[command(subcommand)]
        action: EntryCmd,
    },

    /// Lock, unlock and inspect monthly locks
    Lock {
        #[command(subcommand)]
        action: LockCmd,
    },

    /// Weekly, monthly and annual statistics
    Stats {
        #[command(subcommand)]
        action: StatsCmd,
    },

    /// Child headcounts per time slot and staffing requirements
    Child {
        #[command(subcommand)]
        action: ChildCmd,
    },

    /// Facility-wide calendar events
    Event {
        #[command(subcommand)]
        action: EventCmd,
    },

    /// Export entries, child counts or events
    Export {
        #[arg(long, value_enum, default_value = "entries")]
        what: ExportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range (start:end)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import time entries from a CSV file
    Import {
        #[arg(long, value_name = "FILE", required_unless_present = "template")]
        file: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "file",
            help = "Write an example import file instead of importing"
        )]
        template: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCmd {
    /// Create a user (admin only)
    Add {
        username: String,

        #[arg(long = "name", help = "Full name")]
        full_name: String,

        #[arg(long, default_value = "staff", help = "staff, leadership or admin")]
        role: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long = "weekly", default_value_t = 0.0, help = "Contract hours per week")]
        weekly_hours: f64,

        #[arg(long = "additional", default_value_t = 0.0, help = "Additional hours per week")]
        additional_hours: f64,

        #[arg(long = "days", default_value_t = 5, help = "Working days per week")]
        work_days_per_week: u32,

        #[arg(long = "vacation", default_value_t = 32, help = "Vacation days per year")]
        vacation_days: u32,
    },

    /// List users
    List {
        #[arg(long, help = "Include deactivated users")]
        all: bool,
    },

    /// Show one user (default: yourself)
    Show { username: Option<String> },

    /// Change a user's contract or personal data
    Update {
        username: String,

        #[arg(long = "name")]
        full_name: Option<String>,

        #[arg(long, help = "Email address (empty string clears it)")]
        email: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long = "weekly")]
        weekly_hours: Option<f64>,

        #[arg(long = "additional")]
        additional_hours: Option<f64>,

        #[arg(long = "days")]
        work_days_per_week: Option<u32>,

        #[arg(long = "vacation")]
        vacation_days: Option<u32>,
    },

    /// Re-activate a user
    Activate { username: String },

    /// Deactivate a user
    Deactivate { username: String },
}

#[derive(Subcommand)]
pub enum EntryCmd {
    /// Book a new entry
    Add {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        #[arg(
            long = "type",
            default_value = "work",
            help = "work, sick, child_sick, vacation, education_leave, observation, internship"
        )]
        entry_type: String,

        #[arg(long, help = "Work subtype, e.g. time_with_children (work only)")]
        subtype: Option<String>,

        #[arg(long, default_value_t = 0.0)]
        hours: f64,

        #[arg(long, default_value_t = 0.0)]
        days: f64,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long, help = "Book for another user (leadership/admin)")]
        user: Option<String>,
    },

    /// Change an existing entry
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type")]
        entry_type: Option<String>,

        #[arg(long, help = "Work subtype; 'none' clears it")]
        subtype: Option<String>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long)]
        days: Option<f64>,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Delete an entry
    Del { id: i64 },

    /// List entries
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Entries of another user (leadership/admin)")]
        user: Option<String>,

        #[arg(long, help = "Entries of every user (leadership/admin)")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum LockCmd {
    /// Lock a month for one user
    Set {
        user: String,

        /// Month to lock (YYYY-MM)
        period: String,
    },

    /// Lock a month for several users (admin only)
    Bulk {
        period: String,

        #[arg(long, value_delimiter = ',', help = "Usernames; all active users when omitted")]
        users: Vec<String>,
    },

    /// Remove a lock by id
    Release { id: i64 },

    /// Remove the locks of a month for several users (admin only)
    ReleaseBulk {
        period: String,

        #[arg(long, value_delimiter = ',')]
        users: Vec<String>,
    },

    /// List existing locks
    List {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        user: Option<String>,
    },

    /// Lock status of every active user for a month
    Status { period: String },

    /// Remind users whose month is still open
    Remind {
        period: String,

        #[arg(long, help = "Days until the deadline (default from config)")]
        days: Option<u32>,

        #[arg(long, value_delimiter = ',')]
        users: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum StatsCmd {
    /// Work hours of one week against the weekly target
    Week {
        #[arg(long, help = "Any day of the week (default: today)")]
        date: Option<String>,

        #[arg(long)]
        user: Option<String>,

        #[arg(long, help = "All active users (leadership/admin)")]
        team: bool,

        #[arg(long)]
        json: bool,
    },

    /// Work hours of one month against the monthly target
    Month {
        /// YYYY-MM (default: current month)
        period: Option<String>,

        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        team: bool,

        #[arg(long)]
        json: bool,
    },

    /// Per-category totals of one year
    Year {
        year: Option<i32>,

        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ChildCmd {
    /// Record a headcount
    Add {
        date: String,

        #[arg(help = "Time slot, 08:00 to 16:00 in 30 minute steps")]
        slot: String,

        #[arg(long = "under3", default_value_t = 0)]
        under_3: i64,

        #[arg(long = "over3", default_value_t = 0)]
        over_3: i64,
    },

    /// Change a headcount
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        slot: Option<String>,

        #[arg(long = "under3")]
        under_3: Option<i64>,

        #[arg(long = "over3")]
        over_3: Option<i64>,
    },

    /// Delete a headcount (leadership/admin)
    Del { id: i64 },

    /// List headcounts
    List {
        #[arg(long, short)]
        period: Option<String>,
    },

    /// Required staff per recorded slot
    Stats {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Valid time slots
    Slots,
}

#[derive(Subcommand)]
pub enum EventCmd {
    /// Create an event (leadership/admin)
    Add {
        date: String,

        #[arg(help = "Event type, see `event types`")]
        event_type: String,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Change an event (leadership/admin)
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type")]
        event_type: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Delete an event (leadership/admin)
    Del { id: i64 },

    /// List events
    List {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long = "type")]
        event_type: Option<String>,
    },

    /// Events of a year or one month
    Calendar {
        year: i32,

        #[arg(long)]
        month: Option<u32>,
    },

    /// Count of a year's events by type and month
    Stats {
        year: i32,

        #[arg(long)]
        json: bool,
    },

    /// Allowed event types
    Types,
}
