pub mod offline_cache;
pub mod record_store;

pub use offline_cache::{OfflineCache, PendingWrite};
pub use record_store::RecordStore;
