use crate::model::{ComplaintStatus, OptionKind, Priority};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plaints")]
#[command(
    author,
    version,
    about = "A college complaint desk: taxonomy lookups, validated intake, and status tracking"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for plaints.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new complaint store in the current directory
    Init {
        /// Do not write the built-in taxonomy to the option store
        #[arg(long)]
        no_seed: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Address to bind (defaults to server.host from the config)
        #[arg(long, env = "PLAINTS_HOST")]
        host: Option<String>,

        /// Port to bind (defaults to server.port from the config)
        #[arg(short, long, env = "PLAINTS_PORT")]
        port: Option<u16>,
    },

    /// Submit a complaint
    Submit {
        /// Submitter email
        #[arg(long)]
        email: String,

        /// Submitter department
        #[arg(long)]
        department: String,

        /// Complaint category
        #[arg(short, long)]
        category: String,

        /// Subcategory within the category ("other" requires --sub-other)
        #[arg(short, long)]
        sub_category: String,

        /// Free-text subcategory when --sub-category is "other"
        #[arg(long)]
        sub_other: Option<String>,

        /// What happened
        #[arg(short = 'd', long)]
        description: String,

        /// File to attach (pdf, doc, docx, jpg, jpeg, png; at most 5 MiB)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a complaint by tracking ID or internal ID
    Show {
        /// Tracking ID (e.g. CMP-8F3K2Q1Z) or internal ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List complaints
    #[command(visible_alias = "ls")]
    List {
        /// Only complaints submitted from this email
        #[arg(short, long)]
        email: Option<String>,

        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,

        /// Only complaints that are not resolved or rejected
        #[arg(long, conflicts_with = "status")]
        open: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a complaint's status
    Status {
        /// Tracking ID or internal ID
        id: String,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List taxonomy options
    Options {
        /// Option type (all types when omitted)
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Parent category, required for subcategories
        #[arg(long)]
        parent: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the priority a category and subcategory would receive
    Priority {
        category: String,
        sub_category: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Open,
    InProgress,
    Resolved,
    Rejected,
}

impl From<StatusArg> for ComplaintStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => ComplaintStatus::Open,
            StatusArg::InProgress => ComplaintStatus::InProgress,
            StatusArg::Resolved => ComplaintStatus::Resolved,
            StatusArg::Rejected => ComplaintStatus::Rejected,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
            PriorityArg::Urgent => Priority::Urgent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Category,
    Department,
    #[value(name = "subCategory", alias = "sub-category")]
    SubCategory,
}

impl From<KindArg> for OptionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Category => OptionKind::Category,
            KindArg::Department => OptionKind::Department,
            KindArg::SubCategory => OptionKind::SubCategory,
        }
    }
}
