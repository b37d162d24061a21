//! Shared value types.

pub mod change_set;
pub mod collections;

pub use change_set::ChangeSet;
