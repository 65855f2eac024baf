//! Error types.

use thiserror::Error;

/// Errors returned by [`format_table`](crate::format_table).
///
/// Conversion itself never fails on malformed HTML; structural problems
/// are surfaced through [`Converter::ok`](crate::Converter::ok) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableFormatError {
    /// The input contained no `|`-delimited rows to format.
    #[error("table region contains no parsable rows")]
    NoRows,
}
