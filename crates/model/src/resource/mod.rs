//! Resource addressing: typed keys and the per-type capacity catalog.
mod catalog;
mod key;

pub use catalog::ResourceCatalog;
pub use key::{ResourceKey, ResourceType};
