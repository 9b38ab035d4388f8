//! Infrastructure: document store, error translation, locking, state wiring.

pub mod keyed_lock;
pub mod state;
pub mod store;
pub mod store_errors;
