//! Crate-level aggregate over the per-area errors.

use crate::{
    cursor::CursorError, driver::DriverError, graph::GraphError, meta::MappingError,
    plan::PlanError, row::RowError, session::SessionError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Umbrella error for callers driving the whole pipeline (compile a graph,
/// open a cursor, navigate). Each area keeps its own error type; this just
/// funnels them through one `?`-friendly surface.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
