//! Declarative attribute filters and the expression compiler.

mod compiler;
mod error;
mod types;

pub use compiler::{compile, CompiledExpression};
pub use error::FilterError;
pub use types::{FilterClause, FilterOp};
