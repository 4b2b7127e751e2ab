pub mod store;
pub use store::{RecordStore, StoreError};
pub mod memory_store;
pub use memory_store::MemoryStore;
