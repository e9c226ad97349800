//! Scrollable cursor: a stateful, bidirectionally navigable view over a
//! driver cursor, with eager per-row materialization.

mod error;
mod typed;


pub use error::CursorError;

use crate::{
    cursor::CursorState::{AfterLast, Closed, OnRow, Unpositioned},
    driver::{DriverCursor, DriverError},
    plan::{Projection, RowTransformer},
    row::{ProcessedRow, RowProcessor},
    session::{CursorId, SessionContext},
    value::{TypeResolver, Value},
};
use derive_more::Display;

///
/// CursorState
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum CursorState {
    Unpositioned,
    OnRow,
    AfterLast,
    Closed,
}

///
/// ScrollableCursor
///
/// Owns its driver handle exclusively until `close`, together with the
/// per-execution projection state and a single-row materialization cache.
/// Single-threaded: every navigation call may block on driver I/O.
///

pub struct ScrollableCursor<D, S>
where
    D: DriverCursor,
    S: SessionContext,
{
    id: CursorId,
    driver: D,
    session: S,
    projection: Projection,
    processor: RowProcessor,
    transformer: Option<Box<dyn RowTransformer>>,
    state: CursorState,
    row_cache: Option<ProcessedRow>,
}

impl<D, S> core::fmt::Debug for ScrollableCursor<D, S>
where
    D: DriverCursor,
    S: SessionContext,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollableCursor")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<D, S> ScrollableCursor<D, S>
where
    D: DriverCursor,
    S: SessionContext,
{
    /// Wrap an executed driver cursor. Live metadata is introspected here:
    /// open projections run auto-discovery, then aliases are resolved into
    /// column processors. The cursor registers itself with the session's
    /// cleanup registry.
    pub fn open(
        mut driver: D,
        mut projection: Projection,
        transformer: Option<Box<dyn RowTransformer>>,
        resolver: &dyn TypeResolver,
        mut session: S,
    ) -> Result<Self, CursorError> {
        // The handle is owned from the first argument on: a failed open must
        // still release it, best-effort, before surfacing the error.
        let processor = match Self::compile_processor(&driver, &mut projection, resolver) {
            Ok(processor) => processor,
            Err(err) => {
                if let Err(close_err) = driver.close() {
                    tracing::warn!(error = %close_err, "driver close failed while abandoning a cursor that did not open");
                }
                return Err(err);
            }
        };

        let id = CursorId::allocate();
        session.register_cursor(id);

        Ok(Self {
            id,
            driver,
            session,
            projection,
            processor,
            transformer,
            state: Unpositioned,
            row_cache: None,
        })
    }

    // Metadata introspection, auto-discovery, and alias resolution, split
    // out so the open path has a single failure point to clean up after.
    fn compile_processor(
        driver: &D,
        projection: &mut Projection,
        resolver: &dyn TypeResolver,
    ) -> Result<RowProcessor, CursorError> {
        let metadata = driver.metadata().map_err(|source| CursorError::Driver {
            action: "introspecting result metadata",
            source,
        })?;
        projection.auto_discover(&metadata, resolver);

        Ok(RowProcessor::build(projection, &metadata)?)
    }

    #[must_use]
    pub const fn state(&self) -> CursorState {
        self.state
    }

    #[must_use]
    pub const fn id(&self) -> CursorId {
        self.id
    }

    /// The cached current row, when positioned on one.
    #[must_use]
    pub const fn current_row(&self) -> Option<&ProcessedRow> {
        self.row_cache.as_ref()
    }

    pub fn next(&mut self) -> Result<bool, CursorError> {
        self.ensure_open("advancing to the next row")?;
        let moved = self.driver.next();
        self.after_move(moved, "advancing to the next row", AfterLast)
    }

    pub fn previous(&mut self) -> Result<bool, CursorError> {
        self.ensure_open("moving to the previous row")?;
        let moved = self.driver.previous();
        self.after_move(moved, "moving to the previous row", Unpositioned)
    }

    pub fn first(&mut self) -> Result<bool, CursorError> {
        self.ensure_open("moving to the first row")?;
        let moved = self.driver.first();
        self.after_move(moved, "moving to the first row", Unpositioned)
    }

    pub fn last(&mut self) -> Result<bool, CursorError> {
        self.ensure_open("moving to the last row")?;
        let moved = self.driver.last();
        self.after_move(moved, "moving to the last row", Unpositioned)
    }

    /// Move `delta` rows relative to the current position.
    pub fn scroll(&mut self, delta: i64) -> Result<bool, CursorError> {
        self.ensure_open("scrolling relative to the current row")?;
        let miss = if delta > 0 { AfterLast } else { Unpositioned };
        let moved = self.driver.relative(delta);
        self.after_move(moved, "scrolling relative to the current row", miss)
    }

    /// Move to a 0-based absolute row. Negative values are driver sentinels
    /// (count back from the last row) and bypass the index adjustment.
    pub fn absolute(&mut self, row: i64) -> Result<bool, CursorError> {
        self.ensure_open("moving to an absolute row")?;
        let target = if row >= 0 { row + 1 } else { row };
        let moved = self.driver.absolute(target);
        self.after_move(moved, "moving to an absolute row", Unpositioned)
    }

    /// Position before the first row. Pure positioning: no materialization.
    pub fn before_first(&mut self) -> Result<(), CursorError> {
        self.ensure_open("positioning before the first row")?;
        self.driver
            .before_first()
            .map_err(|source| CursorError::Driver {
                action: "positioning before the first row",
                source,
            })?;
        self.row_cache = None;
        self.state = Unpositioned;
        Ok(())
    }

    /// Position after the last row. Pure positioning: no materialization.
    pub fn after_last(&mut self) -> Result<(), CursorError> {
        self.ensure_open("positioning after the last row")?;
        self.driver
            .after_last()
            .map_err(|source| CursorError::Driver {
                action: "positioning after the last row",
                source,
            })?;
        self.row_cache = None;
        self.state = AfterLast;
        Ok(())
    }

    /// 0-based number of the current row; -1 when not on a row. The driver
    /// contract is 1-based; the conversion is this method's responsibility.
    pub fn row_number(&self) -> Result<i64, CursorError> {
        self.ensure_open("reading the row number")?;
        let position = self
            .driver
            .row_position()
            .map_err(|source| CursorError::Driver {
                action: "reading the row number",
                source,
            })?;
        Ok(position - 1)
    }

    /// Position on the 0-based row `row`; same sentinel handling as
    /// [`Self::absolute`].
    pub fn set_row_number(&mut self, row: i64) -> Result<bool, CursorError> {
        self.absolute(row)
    }

    /// Release the driver handle and session-tracked cleanup resources.
    /// Idempotent; a failed driver close is logged and swallowed so session
    /// cleanup still runs.
    pub fn close(&mut self) {
        if self.state == Closed {
            return;
        }
        self.state = Closed;
        self.row_cache = None;

        if let Err(err) = self.driver.close() {
            tracing::warn!(cursor = %self.id, error = %err, "driver close failed; continuing cleanup");
        }
        if let Err(err) = self.session.release_cursor(self.id) {
            tracing::warn!(cursor = %self.id, error = %err, "session cursor cleanup failed");
        }
    }

    /// Value at a 0-based logical column of the cached row.
    pub fn get(&self, column: usize) -> Result<&Value, CursorError> {
        let Some(row) = &self.row_cache else {
            return Err(CursorError::NoCurrentRow { state: self.state });
        };
        row.value_at(column).ok_or(CursorError::ColumnOutOfRange {
            index: column,
            width: row.width(),
        })
    }

    const fn has_transformer(&self) -> bool {
        self.transformer.is_some()
    }

    const fn ensure_open(&self, action: &'static str) -> Result<(), CursorError> {
        if matches!(self.state, Closed) {
            return Err(CursorError::Closed { action });
        }
        Ok(())
    }

    // Shared post-navigation transition: materialize on a hit, clear the
    // cache and take the direction-appropriate state on a miss.
    fn after_move(
        &mut self,
        moved: Result<bool, DriverError>,
        action: &'static str,
        miss: CursorState,
    ) -> Result<bool, CursorError> {
        match moved {
            Ok(true) => {
                self.materialize()?;
                self.state = OnRow;
                Ok(true)
            }
            Ok(false) => {
                self.row_cache = None;
                self.state = miss;
                Ok(false)
            }
            Err(source) => {
                // The driver position is unknown after a failure; the cursor
                // is no longer on any row.
                self.row_cache = None;
                self.state = Unpositioned;
                Err(CursorError::Driver { action, source })
            }
        }
    }

    // Eager materialization: hydrate non-scalar returns through the session,
    // run the row processor, then fire the post-row hook.
    fn materialize(&mut self) -> Result<(), CursorError> {
        let mut non_scalar_data = Vec::with_capacity(self.processor.non_scalar_slots().len());
        for slot in self.processor.non_scalar_slots() {
            let key = self
                .driver
                .read(slot.key_position, &slot.key_type)
                .map_err(|source| CursorError::Driver {
                    action: "extracting a non-scalar key column",
                    source,
                })?;
            let value = self
                .session
                .hydrate_entity(&slot.mapping, key)
                .map_err(|source| CursorError::Hydration { source })?;
            non_scalar_data.push(value);
        }

        let row = self.processor.build_result_row(
            &non_scalar_data,
            &self.driver,
            self.transformer.as_deref(),
            self.projection.aliases(),
        )?;
        self.session.after_row_materialized(&row);
        self.row_cache = Some(row);

        Ok(())
    }
}
