use thiserror::Error;

/// Failure to read a duration such as `10s` or `250ms`.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("'{0}' is not a duration, expected a number followed by a unit (e.g. 10s, 250ms)")]
    Syntax(String),
    #[error("unit '{0}' not supported")]
    UnitNotSupported(String),
}
