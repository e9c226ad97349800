use crate::{
    cursor::CursorState, driver::DriverError, row::RowError, session::SessionError,
    value::SemanticType,
};
use thiserror::Error as ThisError;

///
/// CursorError
///
/// Scrollable-cursor failures. Driver failures carry a human-readable action
/// description plus the original cause and are never auto-retried;
/// type-incompatibility names both types and never coerces.
///

#[derive(Debug, ThisError)]
pub enum CursorError {
    #[error("cursor is closed (while {action})")]
    Closed { action: &'static str },

    #[error("driver failure while {action}")]
    Driver {
        action: &'static str,
        #[source]
        source: DriverError,
    },

    #[error("no current row (cursor state is {state})")]
    NoCurrentRow { state: CursorState },

    #[error("column index {index} out of range for a row of {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error("requested column type {requested} is not compatible with mapped column type {declared}")]
    TypeMismatch {
        requested: SemanticType,
        declared: SemanticType,
    },

    #[error("typed column access is unavailable while a row transformer is active")]
    HolderRowAccess,

    #[error(transparent)]
    Row(#[from] RowError),

    #[error("non-scalar hydration failed")]
    Hydration {
        #[source]
        source: SessionError,
    },
}
