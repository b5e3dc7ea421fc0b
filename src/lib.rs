//! Student roster core: free-text record parsing, deduplicated admission and
//! School -> Track -> Grade grouping.
//!
//! Layers, leaves first:
//! - `record`: the Record shape and its normalized name key
//! - `schools`: track classifier (school table, sentinel, grade order)
//! - `parse`: line parser (ordered pattern matchers)
//! - `registry` + `store`: the roster as one consistency unit, bulk import
//! - `group`: hierarchical aggregation with counts
//! - `codec`: flat-file (CSV-like) persistence format
//! - `render`: text/HTML views of a grouped tree

pub mod codec;
pub mod diagnostics;
pub mod group;
pub mod parse;
pub mod record;
pub mod registry;
pub mod render;
pub mod schools;
pub mod store;

pub type Result<T> = anyhow::Result<T>;

pub use group::{Tree, group};
pub use parse::{ParseFailure, parse_line};
pub use record::{RawFields, Record, name_key};
pub use registry::Registry;
pub use schools::{Classifier, SchoolsSpec};
pub use store::{ImportSummary, RosterError, Store};
