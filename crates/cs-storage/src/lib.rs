//! cs-storage - Storage library for comment-service
//!
//! This crate provides the document store implementations behind
//! [`cs_core::store::DocumentStore`].

mod fs_store;
mod memory;

pub use fs_store::FileSystemStore;
pub use memory::MemoryStore;
