pub mod collection;
pub mod due;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod stats;
pub mod store;

pub use collection::*;
pub use due::*;
pub use errors::*;
pub use models::*;
pub use scheduler::*;
pub use stats::*;
pub use store::memory::MemoryStore;
pub use store::CollectionStore;
