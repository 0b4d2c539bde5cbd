//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Listing queries are assembled with [`crate::sql::SelectQuery`] and
//! partial updates with [`crate::sql::PartialUpdate`].

pub mod companies;
pub mod jobs;
