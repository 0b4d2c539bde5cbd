//! Dynamic SQL helpers: typed values, field registries, partial-update
//! `SET` clauses and filtered `SELECT`s.

pub mod fields;
pub mod filter;
pub mod partial_update;
pub mod value;

pub use fields::{FieldKind, FieldRegistry, FieldSpec, COMPANY_FIELDS, JOB_FIELDS};
pub use filter::{Op, Predicate, SelectQuery};
pub use partial_update::PartialUpdate;
pub use value::SqlValue;
