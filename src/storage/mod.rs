//! Host store subsystem
//!
//! The engine persists through the `HostStore` capability: a synchronous,
//! string-keyed get/set/remove interface. Two implementations ship with the
//! crate, mirroring the two stores a browser host provides:
//!
//! - `FileStore`: durable, one file per key
//! - `MemoryStore`: session-scoped, lives with the process

mod backend;
mod errors;
mod local;
mod memory;

pub use backend::HostStore;
pub use errors::{StoreError, StoreResult};
pub use local::FileStore;
pub use memory::MemoryStore;
