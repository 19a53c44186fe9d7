//! Data model for DMT import builds.
//!
//! - [`source`]: normalized input rows
//! - [`rows`]: derived UD row shapes
//! - [`part`]: Part rows in their existing/new variants
//! - [`record`]: rendering typed rows into header + cell tables
//! - [`table_name`]: identities of output tables
//! - [`params`]: the immutable parameter bundle for one run

pub mod params;
pub mod part;
pub mod record;
pub mod rows;
pub mod source;
pub mod table_name;

pub use params::{
    CategoryOptions, DerivationParams, FileRole, ImportType, MAX_RANK, Operation, PartOptions,
    SortAssignment, SortEntry, SortEntryError, parse_rank,
};
pub use part::{
    DEFAULT_CLASS_ID, DEFAULT_LIFECYCLE_STAGE, NewPartRow, PartDetails, PartRow, PartTable,
    SHOW_LISTING,
};
pub use record::{Ranked, Table, TableRecord, format_bool};
pub use rows::{AttributeGroupRow, COPY_NEEDED, CategoryDefinitionRow, LabeledRow};
pub use source::{DEFAULT_COMPANY, KEY_COLUMNS, REQUIRED_COLUMNS, SourceRow};
pub use table_name::{ParseTableNameError, TableName};
