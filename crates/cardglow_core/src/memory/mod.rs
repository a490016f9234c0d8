//! # Memory Management
//!
//! Fixed-capacity index pools. Slots are allocated once when an owner is
//! created and recycled for its whole lifetime.

mod free_list;

pub use free_list::FreeList;
