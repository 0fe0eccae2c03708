//! In-memory storage backend for testing.
//!
//! Implements [`tablegate_core::storage::TableStore`] over plain maps, with
//! just enough filter-expression evaluation to answer the clause grammar
//! the compiler emits, plus fault injection for the failure paths the
//! handlers must survive.

mod eval;
mod store;

pub use store::MemoryStore;
