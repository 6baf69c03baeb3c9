//! Vector index implementations.
//!
//! Available backends:
//! - `MemoryIndex` - In-process index for tests and dry runs
//! - `SqliteIndex` - SQLite file under the persist directory

pub mod memory;
pub mod sqlite;

pub use memory::MemoryIndex;
pub use sqlite::SqliteIndex;
