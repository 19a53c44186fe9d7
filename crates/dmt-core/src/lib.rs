//! Table derivation engine.
//!
//! Every derivation here is a pure function of the source rows and the run
//! parameters: no I/O, no prompting, no shared accumulators. Each table is a
//! projection of the level above it followed by a stable distinct.

pub mod attribute;
pub mod category;
pub mod dedupe;
pub mod derive;
pub mod part;
pub mod sort_order;
pub mod variant;

pub use attribute::{AttributeTables, AttributeUd09, build_attribute_tables};
pub use category::{
    CATEGORY_KEY1, build_category_assignments, build_category_definitions, build_category_ud08,
    build_category_ud11_for_parent, category_parent,
};
pub use dedupe::distinct_by;
pub use derive::{category_tables, derive_run, source_company};
pub use part::{build_part_table, build_single_part};
pub use sort_order::{SortRanks, reconcile_ranks};
pub use variant::{VariantTables, build_variant_tables};
