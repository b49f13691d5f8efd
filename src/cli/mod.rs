//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod completions;
pub mod consumable;
pub mod context;
pub mod dashboard;
pub mod equipment;
pub mod handlers;
pub mod init;
pub mod patient;
pub mod procedure;
pub mod rounds;
pub mod status;
pub mod visit;
pub mod volunteer;

pub use args::{DateRangeArgs, GlobalOptions, ListArgs, OutputFormat, PageArgs, parse_date};
pub use context::CommandContext;

/// carectl - command-line companion for the palliative-care visit service
#[derive(Parser, Debug)]
#[command(name = "carectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "CARECTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "CARECTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override session file location
    #[arg(long, global = true, env = "CARECTL_SESSION", hide_env = true)]
    pub session: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "CARECTL_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CARECTL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize carectl configuration
    Init,

    /// Sign in with email and password
    Login {
        /// Account email (prompted if omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted if omitted)
        #[arg(long, env = "CARECTL_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored credential
    Logout,

    /// Show configuration and session status
    Status,

    /// Show who is signed in
    Whoami,

    /// Manage patients (admin)
    #[command(subcommand)]
    Patient(PatientCommands),

    /// Manage volunteers (admin)
    #[command(subcommand)]
    Volunteer(VolunteerCommands),

    /// Manage equipment and its allocation (admin)
    #[command(subcommand)]
    Equipment(EquipmentCommands),

    /// Manage consumable stock (admin)
    #[command(subcommand)]
    Consumable(ConsumableCommands),

    /// Manage procedures (admin)
    #[command(subcommand)]
    Procedure(ProcedureCommands),

    /// List, assign and export visits (admin)
    #[command(subcommand)]
    Visit(VisitCommands),

    /// Show admin dashboard counters
    Dashboard,

    /// Volunteer rounds: today's visits, completed visits, reports
    #[command(subcommand)]
    Rounds(RoundsCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   carectl completion bash > /etc/bash_completion.d/carectl
  zsh:    carectl completion zsh > \"${fpath[1]}/_carectl\"
  fish:   carectl completion fish > ~/.config/fish/completions/carectl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Patient subcommands
#[derive(Subcommand, Debug)]
pub enum PatientCommands {
    /// List patients
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Register a new patient
    Add {
        #[arg(long)]
        name: String,

        /// 10-digit mobile number
        #[arg(long)]
        mobile: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        address: String,

        /// Primary medical condition
        #[arg(long)]
        condition: String,

        #[arg(long)]
        emergency_contact: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
    },

    /// Delete a patient
    Delete {
        /// Patient ID
        id: i64,
    },

    /// Set a patient's home location
    Locate {
        /// Patient ID
        id: i64,

        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
    },

    /// Export patients as CSV
    Export {
        /// Only patients matching this search
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}

/// Volunteer management subcommands
#[derive(Subcommand, Debug)]
pub enum VolunteerCommands {
    /// List volunteers
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Register a volunteer account
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Initial password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Discipline, e.g. Nurse
        #[arg(long)]
        specialization: Option<String>,
    },

    /// Delete a volunteer
    Delete {
        /// Volunteer ID
        id: i64,
    },
}

/// Equipment subcommands
#[derive(Subcommand, Debug)]
pub enum EquipmentCommands {
    /// List equipment
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Add equipment
    Add {
        #[arg(long)]
        name: String,

        /// Equipment type ID (see `equipment types`)
        #[arg(long = "type")]
        type_id: i64,
    },

    /// Delete equipment
    Delete {
        /// Equipment ID
        id: i64,
    },

    /// Allocate equipment to a patient
    Allocate {
        /// Equipment ID
        id: i64,

        /// Patient ID
        #[arg(long)]
        patient: i64,
    },

    /// Return allocated equipment
    Deallocate {
        /// Equipment ID
        id: i64,
    },

    /// List equipment types
    Types,

    /// Create an equipment type
    AddType {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
}

/// Consumable subcommands
#[derive(Subcommand, Debug)]
pub enum ConsumableCommands {
    /// List consumables
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Add a consumable
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        /// Opening stock
        #[arg(long, default_value_t = 0)]
        stock: i64,

        /// Unit, e.g. pieces
        #[arg(long)]
        unit: String,
    },

    /// Increase stock
    AddStock {
        /// Consumable ID
        id: i64,

        #[arg(long, short = 'q')]
        quantity: i64,
    },

    /// Decrease stock
    SubtractStock {
        /// Consumable ID
        id: i64,

        #[arg(long, short = 'q')]
        quantity: i64,
    },

    /// Delete a consumable
    Delete {
        /// Consumable ID
        id: i64,
    },

    /// Usage totals over a date range
    Usage {
        #[command(flatten)]
        range: DateRangeArgs,
    },
}

/// Procedure subcommands
#[derive(Subcommand, Debug)]
pub enum ProcedureCommands {
    /// List procedures
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Add a procedure
    Add {
        /// Procedure name
        name: String,
    },

    /// Delete a procedure
    Delete {
        /// Procedure ID
        id: i64,
    },
}

/// Visit subcommands
#[derive(Subcommand, Debug)]
pub enum VisitCommands {
    /// List visits
    List {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        range: DateRangeArgs,

        /// Filter by status (pending, completed, cancelled)
        #[arg(long)]
        status: Option<String>,
    },

    /// Assign a volunteer to patients for a date
    ///
    /// Without flags, walks through the four-step wizard.
    Assign {
        /// Patient ID (repeatable)
        #[arg(long = "patient")]
        patients: Vec<i64>,

        /// Volunteer ID
        #[arg(long)]
        volunteer: Option<i64>,

        /// Visit date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<chrono::NaiveDate>,
    },

    /// Export visits as CSV
    Export {
        #[command(flatten)]
        range: DateRangeArgs,

        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}

/// Volunteer-side subcommands
#[derive(Subcommand, Debug)]
pub enum RoundsCommands {
    /// Visits assigned for today
    Today {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Completed visits
    Completed {
        #[command(flatten)]
        list: PageArgs,
    },

    /// Submit a visit report
    Report {
        /// Visit ID
        visit: i64,

        /// Outcome (completed, pending, cancelled)
        #[arg(long, default_value = "completed")]
        status: String,

        /// Procedure ID performed (repeatable)
        #[arg(long = "procedure")]
        procedures: Vec<i64>,

        /// Consumable used, as ID=QUANTITY (repeatable)
        #[arg(long = "consumable", value_parser = rounds::parse_usage)]
        consumables: Vec<crate::client::models::ConsumableUsage>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show volunteer dashboard counters
    Dashboard,
}
