//! Unit-of-work seam: hydration, post-row hooks, and cursor cleanup tracking.

use crate::{row::ProcessedRow, value::Value};
use derive_more::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error as ThisError;

static NEXT_CURSOR_ID: AtomicU64 = AtomicU64::new(1);

///
/// CursorId
///
/// Handle keying session-tracked cleanup resources to one live cursor.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CursorId(u64);

impl CursorId {
    pub(crate) fn allocate() -> Self {
        Self(NEXT_CURSOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

///
/// SessionError
///

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("failed to hydrate '{mapping}' for key {key:?}: {message}")]
    HydrationFailed {
        mapping: String,
        key: Value,
        message: String,
    },

    #[error("cursor cleanup failed: {message}")]
    CleanupFailed { message: String },
}

///
/// SessionContext
///
/// The surrounding unit of work. Hydrates non-scalar returns, observes each
/// materialized row, and tracks per-cursor cleanup resources.
///

pub trait SessionContext {
    /// Resolve an entity/collection reference for a non-scalar return.
    fn hydrate_entity(&mut self, mapping: &str, key: Value) -> Result<Value, SessionError>;

    /// Post-materialization hook, invoked after each successful row build.
    fn after_row_materialized(&mut self, row: &ProcessedRow);

    /// Track cleanup resources for a newly opened cursor.
    fn register_cursor(&mut self, cursor: CursorId);

    /// Release everything tracked for the cursor. Invoked on close even when
    /// the driver-side close failed.
    fn release_cursor(&mut self, cursor: CursorId) -> Result<(), SessionError>;
}

impl<T: SessionContext + ?Sized> SessionContext for &mut T {
    fn hydrate_entity(&mut self, mapping: &str, key: Value) -> Result<Value, SessionError> {
        (**self).hydrate_entity(mapping, key)
    }

    fn after_row_materialized(&mut self, row: &ProcessedRow) {
        (**self).after_row_materialized(row);
    }

    fn register_cursor(&mut self, cursor: CursorId) {
        (**self).register_cursor(cursor);
    }

    fn release_cursor(&mut self, cursor: CursorId) -> Result<(), SessionError> {
        (**self).release_cursor(cursor)
    }
}
