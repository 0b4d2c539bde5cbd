//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the dynamic SQL builders,
//! and repository functions for the `companies` and `jobs` tables. HTTP
//! concerns live in the `api` crate.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod sql;

pub use pool::{DbPool, PoolConfig};
pub use error::DbError;
