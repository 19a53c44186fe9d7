//! CLI argument definitions for the DMT builder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dmt_model::{ImportType, Operation, SortEntry, TableName};

#[derive(Parser)]
#[command(
    name = "dmt",
    version,
    about = "DMT builder - turn key-column exports into UD import files",
    long_about = "Build UD08-UD11 lookup tables, Part and Category files, and an import\n\
                  playlist from a six-column key export (CSV or spreadsheet).\n\n\
                  Any answer not given as a flag is asked interactively."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build UD tables and a playlist from one or two source files.
    Build(BuildArgs),

    /// Build a Part file (and optional categories) for a single part number.
    Part(PartArgs),

    /// Show the effective settings and where they were loaded from.
    Config,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Source file (.csv, .xlsx, .xlsm, .xls, .ods).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Source file for the delete pass of a delete-and-add run.
    #[arg(long = "delete-file", value_name = "PATH")]
    pub delete_file: Option<PathBuf>,

    /// Source file for the add pass of a delete-and-add run.
    #[arg(long = "add-file", value_name = "PATH")]
    pub add_file: Option<PathBuf>,

    /// What the playlist should do.
    #[arg(long = "operation", value_enum)]
    pub operation: Option<OperationArg>,

    /// Import type (detected from Key1 when omitted).
    #[arg(long = "type", value_enum)]
    pub import_type: Option<ImportTypeArg>,

    /// Tables to include in the playlist, comma separated (UD11 is always written).
    #[arg(long = "tables", value_name = "TABLES", value_delimiter = ',')]
    pub tables: Vec<TableName>,

    /// UD09 sort rank for a dropdown value; repeat for several values.
    #[arg(long = "sort", value_name = "VALUE=RANK")]
    pub sort: Vec<SortEntry>,

    /// Variant parent part number; enables the Part file.
    #[arg(long = "part", value_name = "PARENT")]
    pub part: Option<String>,

    /// Website code for the Part file.
    #[arg(long = "website", value_name = "CODE")]
    pub website: Option<String>,

    #[command(flatten)]
    pub new_part: NewPartArgs,

    #[command(flatten)]
    pub categories: CategoryArgs,

    /// Base directory for output folders (default: next to each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Never prompt; unanswered questions take their defaults.
    #[arg(long = "no-input")]
    pub no_input: bool,
}

#[derive(Args)]
pub struct PartArgs {
    /// Part number to build.
    #[arg(value_name = "PART_ID")]
    pub part_id: Option<String>,

    /// Website code for the Part file.
    #[arg(long = "website", value_name = "CODE")]
    pub website: Option<String>,

    #[command(flatten)]
    pub new_part: NewPartArgs,

    #[command(flatten)]
    pub categories: CategoryArgs,

    /// Base directory for the output folder (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Never prompt; unanswered questions take their defaults.
    #[arg(long = "no-input")]
    pub no_input: bool,
}

#[derive(Args)]
pub struct NewPartArgs {
    /// The part number does not exist yet; add descriptive columns.
    #[arg(long = "new-part")]
    pub new_part: bool,

    /// PartDescription for a new part.
    #[arg(long = "description", value_name = "TEXT", requires = "new_part")]
    pub description: Option<String>,

    /// ProdCode for a new part.
    #[arg(long = "prod-code", value_name = "CODE", requires = "new_part")]
    pub prod_code: Option<String>,
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Category string to assign; repeat for several categories.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Website code for category rows.
    #[arg(long = "category-website", value_name = "CODE")]
    pub website: Option<String>,

    /// The categories are new; also write their UD08 definitions.
    #[arg(long = "new-category")]
    pub new_category: bool,

    /// Part number the categories are assigned to (default: the Part parent).
    #[arg(long = "category-parent", value_name = "PART")]
    pub parent: Option<String>,
}

/// CLI operation choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OperationArg {
    Add,
    Delete,
    Both,
}

impl From<OperationArg> for Operation {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::Add => Operation::Add,
            OperationArg::Delete => Operation::Delete,
            OperationArg::Both => Operation::Both,
        }
    }
}

/// CLI import type choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ImportTypeArg {
    Variant,
    Attribute,
}

impl From<ImportTypeArg> for ImportType {
    fn from(value: ImportTypeArg) -> Self {
        match value {
            ImportTypeArg::Variant => ImportType::Variant,
            ImportTypeArg::Attribute => ImportType::Attribute,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
