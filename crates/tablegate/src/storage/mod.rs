//! Storage backends implementing the core `TableStore` trait.

pub mod dynamodb;
pub mod memory;
