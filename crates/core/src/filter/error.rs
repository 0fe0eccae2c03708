use thiserror::Error;

/// Errors that can occur while parsing or compiling filters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("BETWEEN isn't a supported operation. Please pass in two filters using \">\" and \"<\" operators")]
    BetweenUnsupported,
    #[error("\"{0}\" isn't a supported filter operation")]
    UnsupportedOperation(String),
    #[error("The filter on \"{0}\" compares against a value but no CompareValue was passed in")]
    MissingCompareValue(String),
}
