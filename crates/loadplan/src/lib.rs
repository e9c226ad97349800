//! Load-plan subsystem: query-space graph expansion, result-row processing
//! with projection auto-discovery, and a scrollable result cursor.
#![warn(unreachable_pub)]

pub mod cursor;
pub mod driver;
pub mod error;
pub mod graph;
pub mod meta;
pub mod plan;
pub mod row;
pub mod session;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary only; errors and seam traits stay one level down.
///

pub mod prelude {
    pub use crate::{
        cursor::{CursorState, ScrollableCursor},
        graph::{Join, QuerySpace, QuerySpaces, SpaceUid},
        plan::{CompiledPlan, Projection},
        row::ProcessedRow,
        value::{SemanticType, Value},
    };
}
