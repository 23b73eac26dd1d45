//! Background tasks behind the store runtime.
//!
//! The store worker executes contract commands against the single-owner
//! workspace; the save worker drains queued snapshots onto the repository.

mod saver;
mod store;

pub(crate) use saver::SaveWorker;
pub(crate) use store::{Command, StoreWorker};
