//! Durable per-profile storage for the tour's completion flag.

pub mod libsql_backend;
pub mod traits;

pub use libsql_backend::LibSqlFlagStore;
pub use traits::{FlagStore, MemoryFlagStore};
